//! Tagged tokens: parsing, field ordering and serialization.
//!
//! The classifier emits lines such as
//!
//! ```text
//! tokens { date { day: "1" month: "enero" preserve_order: true } } tokens { word { name: "hola" } }
//! ```
//!
//! Each token has a class name and an ordered list of fields. A field value
//! is a quoted string, a bare flag (`true`) or a nested block of fields.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::char,
    combinator::{map, value},
    multi::many0,
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};
use rustc_hash::FxHashMap;
use std::fmt;

/// Marker keeping the fields in the order they were tagged.
pub const PRESERVE_ORDER: &str = "preserve_order";

/// Marker naming the field order explicitly (`field_order: "day month"`).
pub const FIELD_ORDER: &str = "field_order";

/// Longest excerpt of offending input quoted in error messages.
const EXCERPT_LEN: usize = 48;

/// Errors raised while reading tagged text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The text does not follow the token syntax.
    #[error("malformed token '{token}': {reason}")]
    Malformed {
        /// Offending token text
        token: String,
        /// What is wrong with it
        reason: String,
    },
    /// A token carries both `preserve_order` and `field_order`.
    #[error("token '{token}' carries both preserve_order and field_order")]
    AmbiguousOrderMarker {
        /// Offending token text
        token: String,
    },
}

/// The value of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// `name: "value"`
    Text(String),
    /// `name: value`
    Flag(String),
    /// `name { ... }`
    Nested(Vec<Field>),
}

/// A named field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name
    pub name: String,
    /// Field value
    pub value: FieldValue,
}

impl Field {
    /// A quoted text field.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Field {
            name: name.into(),
            value: FieldValue::Text(value.into()),
        }
    }

    /// A bare flag field.
    pub fn flag(name: impl Into<String>, value: impl Into<String>) -> Self {
        Field {
            name: name.into(),
            value: FieldValue::Flag(value.into()),
        }
    }

    /// A nested block.
    pub fn nested(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Field {
            name: name.into(),
            value: FieldValue::Nested(fields),
        }
    }

    fn is_order_marker(&self) -> bool {
        self.name == PRESERVE_ORDER || self.name == FIELD_ORDER
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            FieldValue::Text(text) => write!(f, "{}: \"{}\"", self.name, text),
            FieldValue::Flag(flag) => write!(f, "{}: {}", self.name, flag),
            FieldValue::Nested(fields) => write_block(f, &self.name, fields),
        }
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, name: &str, fields: &[Field]) -> fmt::Result {
    write!(f, "{name} {{")?;
    for field in fields {
        write!(f, " {field}")?;
    }
    f.write_str(" }")
}

/// How the verbalizer must order a token's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOrder {
    /// No marker: the class's canonical order applies
    Canonical,
    /// `preserve_order: true`: keep the tagged order
    Preserve,
    /// `field_order: "..."`: the listed order
    Explicit(Vec<String>),
}

/// One classified span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Semiotic class
    pub class_name: String,
    /// Fields in their current order
    pub fields: Vec<Field>,
}

impl Token {
    /// Create a token.
    pub fn new(class_name: impl Into<String>, fields: Vec<Field>) -> Self {
        Token {
            class_name: class_name.into(),
            fields,
        }
    }

    /// Parse a single `class { ... }` token.
    pub fn parse(text: &str) -> Result<Self, TokenError> {
        let mut tokens = parse_tokens(text)?;
        match tokens.len() {
            1 => Ok(tokens.remove(0)),
            n => Err(TokenError::Malformed {
                token: excerpt(text),
                reason: format!("expected one token, found {n}"),
            }),
        }
    }

    /// First field called `name`.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The order marker carried by the token.
    ///
    /// # Errors
    ///
    /// [`TokenError::AmbiguousOrderMarker`] when both markers are present,
    /// [`TokenError::Malformed`] when `field_order` is not a quoted list.
    pub fn field_order(&self) -> Result<FieldOrder, TokenError> {
        let preserve = self.field(PRESERVE_ORDER).is_some();
        match (preserve, self.field(FIELD_ORDER)) {
            (true, Some(_)) => Err(TokenError::AmbiguousOrderMarker {
                token: self.to_string(),
            }),
            (true, None) => Ok(FieldOrder::Preserve),
            (false, Some(Field {
                value: FieldValue::Text(names),
                ..
            })) => Ok(FieldOrder::Explicit(
                names.split_whitespace().map(str::to_string).collect(),
            )),
            (false, Some(_)) => Err(TokenError::Malformed {
                token: self.to_string(),
                reason: "field_order must be a quoted list of field names".to_string(),
            }),
            (false, None) => Ok(FieldOrder::Canonical),
        }
    }

    /// Put the fields in the order the verbalizer expects.
    ///
    /// `canonical` maps class names to their canonical field order; it is
    /// also applied to nested blocks named after a class. Order markers are
    /// moved to the end.
    pub fn arrange(&mut self, canonical: &FxHashMap<String, Vec<String>>) -> Result<(), TokenError> {
        let order = self.field_order()?;
        let (markers, fields): (Vec<Field>, Vec<Field>) = std::mem::take(&mut self.fields)
            .into_iter()
            .partition(Field::is_order_marker);

        let arranged = match &order {
            FieldOrder::Preserve => Ok(fields),
            FieldOrder::Explicit(names) => reorder(fields, names, true),
            FieldOrder::Canonical => match canonical.get(&self.class_name) {
                Some(names) => reorder(fields, names, false),
                None => Ok(fields),
            },
        };
        let mut arranged = match arranged {
            Ok(arranged) => arranged,
            Err((fields, missing)) => {
                self.fields = fields.into_iter().chain(markers).collect();
                return Err(TokenError::Malformed {
                    token: self.to_string(),
                    reason: format!("field_order names absent field '{missing}'"),
                });
            }
        };

        for field in &mut arranged {
            arrange_nested(field, canonical);
        }
        arranged.extend(markers);
        self.fields = arranged;
        Ok(())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_block(f, &self.class_name, &self.fields)
    }
}

fn arrange_nested(field: &mut Field, canonical: &FxHashMap<String, Vec<String>>) {
    if let FieldValue::Nested(fields) = &mut field.value {
        if let Some(names) = canonical.get(&field.name) {
            if let Ok(ordered) = reorder(std::mem::take(fields), names, false) {
                *fields = ordered;
            }
        }
        for inner in fields.iter_mut() {
            arrange_nested(inner, canonical);
        }
    }
}

/// Move the fields named in `names` to the front, in that order; the rest
/// keep their relative order. With `strict`, a name without a field fails
/// and hands the fields back with the missing name.
fn reorder(
    mut fields: Vec<Field>,
    names: &[String],
    strict: bool,
) -> Result<Vec<Field>, (Vec<Field>, String)> {
    let mut ordered = Vec::with_capacity(fields.len());
    for name in names {
        match fields.iter().position(|f| &f.name == name) {
            Some(index) => ordered.push(fields.remove(index)),
            None if strict => {
                ordered.extend(fields);
                return Err((ordered, name.clone()));
            }
            None => {}
        }
    }
    ordered.extend(fields);
    Ok(ordered)
}

/// Parse classifier output into tokens.
///
/// Accepts `tokens { class { ... } }` wrappers as well as bare
/// `class { ... }` tokens, separated by any amount of space.
///
/// # Errors
///
/// [`TokenError::Malformed`] on unbalanced braces, unterminated quotes,
/// missing names or any other syntax error.
pub fn parse_tokens(line: &str) -> Result<Vec<Token>, TokenError> {
    match token_line(line) {
        Ok(("", tokens)) => Ok(tokens),
        Ok((rest, _)) => Err(TokenError::Malformed {
            token: excerpt(rest),
            reason: diagnose(line),
        }),
        Err(e) => Err(TokenError::Malformed {
            token: excerpt(line),
            reason: format!("{e}"),
        }),
    }
}

fn excerpt(text: &str) -> String {
    let text = text.trim();
    match text.char_indices().nth(EXCERPT_LEN) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

/// Explain why `line` failed to parse.
fn diagnose(line: &str) -> String {
    let mut depth = 0i32;
    let mut in_quote = false;
    for c in line.chars() {
        match c {
            '"' => in_quote = !in_quote,
            '{' if !in_quote => depth += 1,
            '}' if !in_quote => {
                depth -= 1;
                if depth < 0 {
                    return "unexpected closing brace".to_string();
                }
            }
            _ => {}
        }
    }
    if in_quote {
        "unterminated quote".to_string()
    } else if depth > 0 {
        "unbalanced braces".to_string()
    } else {
        "missing class or field name".to_string()
    }
}

// ============================================================================
// Nom Parser Combinators
// ============================================================================

fn ws(input: &str) -> IResult<&str, ()> {
    value((), take_while(|c: char| c == ' ' || c == '\t'))(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

fn quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_while(|c| c != '"'), char('"'))(input)
}

fn bare(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && !matches!(c, '"' | '{' | '}'))(input)
}

fn block(input: &str) -> IResult<&str, Vec<Field>> {
    delimited(
        tuple((char('{'), ws)),
        many0(terminated(field, ws)),
        char('}'),
    )(input)
}

fn field(input: &str) -> IResult<&str, Field> {
    let (input, name) = terminated(identifier, ws)(input)?;
    let result = alt((
        map(preceded(tuple((char(':'), ws)), quoted), |v| Field::text(name, v)),
        map(preceded(tuple((char(':'), ws)), bare), |v| Field::flag(name, v)),
        map(block, |fields| Field::nested(name, fields)),
    ))(input);
    result
}

fn token(input: &str) -> IResult<&str, Token> {
    let (input, name) = terminated(identifier, ws)(input)?;
    let (input, fields) = block(input)?;
    Ok((input, Token::new(name, fields)))
}

fn wrapped(input: &str) -> IResult<&str, Token> {
    delimited(
        tuple((tag("tokens"), ws, char('{'), ws)),
        token,
        tuple((ws, char('}'))),
    )(input)
}

fn token_line(input: &str) -> IResult<&str, Vec<Token>> {
    preceded(ws, many0(terminated(alt((wrapped, token)), ws)))(input)
}
