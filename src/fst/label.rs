//! Arc labels.

use std::fmt;

/// Input or output label of an arc.
///
/// Literal labels let insertion, deletion and rewrite scaffolding sit on a
/// single arc while a grammar is being assembled. They are expanded into
/// one-symbol chains before composition and optimization, so the matching
/// algorithms only ever see [`Label::Epsilon`] and [`Label::Symbol`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Label {
    /// The empty string.
    Epsilon,
    /// A single code point.
    Symbol(char),
    /// A string of two or more code points.
    Literal(Box<str>),
}

impl Label {
    /// Build a label from a string, collapsing empty strings to epsilon and
    /// single characters to symbols.
    pub fn from_text(text: &str) -> Self {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Label::Epsilon,
            (Some(c), None) => Label::Symbol(c),
            _ => Label::Literal(text.into()),
        }
    }

    /// True for the epsilon label.
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Label::Epsilon)
    }

    /// Number of code points the label spells.
    pub fn len(&self) -> usize {
        match self {
            Label::Epsilon => 0,
            Label::Symbol(_) => 1,
            Label::Literal(text) => text.chars().count(),
        }
    }

    /// True when the label spells the empty string.
    pub fn is_empty(&self) -> bool {
        self.is_epsilon()
    }

    /// Append the label's text to `out`.
    pub fn push_to(&self, out: &mut String) {
        match self {
            Label::Epsilon => {}
            Label::Symbol(c) => out.push(*c),
            Label::Literal(text) => out.push_str(text),
        }
    }

    /// Split the label into single-symbol labels.
    pub fn symbols(&self) -> Vec<Label> {
        match self {
            Label::Epsilon => Vec::new(),
            Label::Symbol(c) => vec![Label::Symbol(*c)],
            Label::Literal(text) => text.chars().map(Label::Symbol).collect(),
        }
    }
}

impl From<char> for Label {
    fn from(c: char) -> Self {
        Label::Symbol(c)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Epsilon => write!(f, "<eps>"),
            Label::Symbol(' ') => write!(f, "<space>"),
            Label::Symbol(c) => write!(f, "{}", c),
            Label::Literal(text) => write!(f, "{}", text),
        }
    }
}
