//! Grammars and the scaffolding shared by taggers and verbalizers.
//!
//! A [`Grammar`] is a named, non-empty automaton with a kind and a
//! determinism flag. The free functions in this module are the small
//! vocabulary every class grammar is written in: character classes,
//! space handling and the `name { field: "value" }` token syntax.
//!
//! # Example
//!
//! ```rust,ignore
//! use libtextnorm::fst::Fst;
//! use libtextnorm::grammar::{add_tokens, digit, tagged_field};
//!
//! let integer = tagged_field("integer", &digit().closure(1));
//! let cardinal = add_tokens("cardinal", &integer);
//!
//! assert_eq!(cardinal.shortest_path("42")?, "cardinal { integer: \"42\" }");
//! ```

mod registry;

pub use registry::{ClassGrammars, ClassRole, ClassSpec, GrammarRegistry, GraphBuilder};

use crate::config::InputCase;
use crate::fst::{Fst, FstError};
use std::collections::BTreeSet;
use std::fmt;

/// Punctuation characters tagged as `punctuation` tokens.
pub const PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '¡', '¿', '(', ')', '-'];

/// Non-alphanumeric symbols allowed inside words.
pub const SYMBOLS: &[char] = &['@', '$', '€', '%', '&', '/', '+', '=', '#', '_', 'º', 'ª', '\''];

/// Letters outside ASCII that the bundled locales use.
pub const EXTRA_LETTERS: &str = "áéíóúüñÁÉÍÓÚÜÑ";

/// Delimits field values in the tagged form; never part of the alphabet.
pub const QUOTE: char = '"';

/// Errors raised while building grammars.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GrammarError {
    /// A grammar accepts nothing.
    #[error("grammar '{name}' accepts no input")]
    Empty {
        /// Grammar name
        name: String,
    },
    /// Two classes were registered under the same name.
    #[error("class '{0}' registered twice")]
    DuplicateClass(String),
    /// An automaton operation failed during construction.
    #[error("automaton construction failed: {0}")]
    Fst(#[from] FstError),
}

/// Whether a grammar tags surface text or verbalizes tagged text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum GrammarKind {
    /// Surface text to tagged tokens
    Classify,
    /// Tagged tokens to surface text
    Verbalize,
}

impl fmt::Display for GrammarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarKind::Classify => f.write_str("classify"),
            GrammarKind::Verbalize => f.write_str("verbalize"),
        }
    }
}

/// Build-time switches passed to every class grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrammarOptions {
    /// Casing of the input text
    pub input_case: InputCase,
    /// Emit a single reading per span
    pub deterministic: bool,
}

impl Default for GrammarOptions {
    fn default() -> Self {
        GrammarOptions {
            input_case: InputCase::Cased,
            deterministic: true,
        }
    }
}

/// A named automaton.
#[derive(Debug, Clone)]
pub struct Grammar {
    name: String,
    kind: GrammarKind,
    fst: Fst,
    deterministic: bool,
}

impl Grammar {
    /// Wrap an automaton, rejecting one that accepts nothing.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::Empty`] when `fst` has no accepting path.
    pub fn new(
        name: impl Into<String>,
        kind: GrammarKind,
        fst: Fst,
        deterministic: bool,
    ) -> Result<Self, GrammarError> {
        let name = name.into();
        if fst.is_empty() {
            return Err(GrammarError::Empty { name });
        }
        Ok(Grammar {
            name,
            kind,
            fst,
            deterministic,
        })
    }

    /// Grammar name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Classify or verbalize.
    pub fn kind(&self) -> GrammarKind {
        self.kind
    }

    /// The underlying automaton.
    pub fn fst(&self) -> &Fst {
        &self.fst
    }

    /// False when the grammar may emit several outputs for one input.
    pub fn is_deterministic(&self) -> bool {
        self.deterministic
    }

    /// Cheapest rewrite of `input`.
    pub fn apply(&self, input: &str) -> crate::fst::Result<String> {
        self.fst.shortest_path(input)
    }
}

/// Letters: ASCII plus [`EXTRA_LETTERS`].
pub fn letters() -> impl Iterator<Item = char> {
    ('a'..='z').chain('A'..='Z').chain(EXTRA_LETTERS.chars())
}

/// Every non-space character the classifier accepts.
pub fn graphemes() -> BTreeSet<char> {
    letters()
        .chain('0'..='9')
        .chain(PUNCTUATION.iter().copied())
        .chain(SYMBOLS.iter().copied())
        .collect()
}

/// One decimal digit.
pub fn digit() -> Fst {
    Fst::char_set('0'..='9')
}

/// One digit from 1 to 9.
pub fn nonzero_digit() -> Fst {
    Fst::char_set('1'..='9')
}

/// One letter.
pub fn alpha() -> Fst {
    Fst::char_set(letters())
}

/// One lower-case letter or digit.
pub fn lower_alnum() -> Fst {
    Fst::char_set(
        letters()
            .filter(|c| c.is_lowercase())
            .chain('0'..='9'),
    )
}

/// One punctuation character.
pub fn punct() -> Fst {
    Fst::char_set(PUNCTUATION.iter().copied())
}

/// Any character except the space.
pub fn not_space() -> Fst {
    Fst::char_set(graphemes())
}

/// Any character except the double quote, the space included.
pub fn not_quote() -> Fst {
    let mut chars = graphemes();
    chars.insert(' ');
    Fst::char_set(chars)
}

/// Any non-space character that is not punctuation.
pub fn word_char() -> Fst {
    Fst::char_set(graphemes().into_iter().filter(|c| !PUNCTUATION.contains(c)))
}

/// Deletes any one of `chars`.
pub fn delete_any<I: IntoIterator<Item = char>>(chars: I) -> Fst {
    let pairs: Vec<(String, &str)> = chars.into_iter().map(|c| (c.to_string(), "")).collect();
    Fst::string_map(&pairs)
}

/// Deletes zero or more spaces.
pub fn delete_space() -> Fst {
    Fst::delete(" ").closure(0)
}

/// Rewrites one or more spaces as exactly one.
pub fn delete_extra_space() -> Fst {
    Fst::delete(" ").closure(1).concat(&Fst::insert(" "))
}

/// Inserts a single space.
pub fn insert_space() -> Fst {
    Fst::insert(" ")
}

/// `name { ` · `fst` · ` }`
pub fn add_tokens(name: &str, fst: &Fst) -> Fst {
    Fst::insert(&format!("{name} {{ "))
        .concat(fst)
        .concat(&Fst::insert(" }"))
}

/// Inverse scaffolding of [`add_tokens`], tolerant to spacing.
pub fn delete_tokens(name: &str, fst: &Fst) -> Fst {
    Fst::delete(name)
        .concat(&delete_space())
        .concat(&Fst::delete("{"))
        .concat(&delete_space())
        .concat(fst)
        .concat(&delete_space())
        .concat(&Fst::delete("}"))
}

/// `name: "` · `fst` · `"`
pub fn tagged_field(name: &str, fst: &Fst) -> Fst {
    Fst::insert(&format!("{name}: \""))
        .concat(fst)
        .concat(&Fst::insert("\""))
}

/// Reads the value of field `name`, dropping the field syntax.
pub fn field_extractor(name: &str) -> Fst {
    field_value_extractor(name, &not_quote().closure(1))
}

/// Like [`field_extractor`], restricted to values accepted by `value`.
pub fn field_value_extractor(name: &str, value: &Fst) -> Fst {
    Fst::delete(&format!("{name}:"))
        .concat(&delete_space())
        .concat(&Fst::delete("\""))
        .concat(value)
        .concat(&Fst::delete("\""))
}

/// Reads a nested `name { ... }` block through `fields`.
pub fn nested_extractor(name: &str, fields: &Fst) -> Fst {
    delete_tokens(name, fields)
}

/// Deletes trailing `preserve_order: true` and `field_order: "..."` markers.
pub fn delete_order_markers() -> Fst {
    let mut quoted = graphemes();
    quoted.insert(' ');
    let preserve = Fst::delete("preserve_order:")
        .concat(&delete_space())
        .concat(&Fst::delete("true"));
    let field_order = Fst::delete("field_order:")
        .concat(&delete_space())
        .concat(&Fst::delete("\""))
        .concat(&delete_any(quoted).closure(1))
        .concat(&Fst::delete("\""));
    delete_space()
        .concat(&preserve.union(&field_order))
        .closure(0)
}
