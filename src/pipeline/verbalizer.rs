//! Token-by-token verbalization.

use super::{PipelineError, Result};
use crate::fst::{Fst, FstError};
use crate::grammar::{
    delete_extra_space, delete_space, delete_tokens, Grammar, GrammarKind, GrammarRegistry,
};
use crate::token::{parse_tokens, Token};
use rustc_hash::FxHashMap;
use std::time::Instant;
use tracing::{debug, trace};

/// Rule name of the sentence verbalizer.
pub const ALL: &str = "ALL";

/// Turns tagged tokens back into written text.
///
/// Each token is put in the field order its class verbalizer reads, then
/// run through that verbalizer alone. The combined sentence automaton is
/// kept for export.
#[derive(Debug, Clone)]
pub struct Verbalizer {
    classes: FxHashMap<String, Grammar>,
    orders: FxHashMap<String, Vec<String>>,
    all: Grammar,
}

impl Verbalizer {
    /// Collect the class verbalizers and build the sentence verbalizer.
    pub fn new(registry: &GrammarRegistry) -> Result<Self> {
        let started = Instant::now();

        let mut classes = FxHashMap::default();
        let mut orders = FxHashMap::default();
        for class in registry.classes() {
            classes.insert(class.name.clone(), class.verbalizer.clone());
            orders.insert(class.name.clone(), class.field_order.clone());
        }

        let union = Fst::union_all(registry.classes().iter().map(|c| (c.verbalizer.fst(), 0.0)))?;
        let token = delete_tokens("tokens", &union);
        let sentence = delete_space()
            .concat(&token)
            .concat(&delete_extra_space().concat(&token).closure(0))
            .concat(&delete_space())
            .optimize();
        let all = Grammar::new(ALL, GrammarKind::Verbalize, sentence, true)?;

        debug!(
            classes = classes.len(),
            all_states = all.fst().num_states(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "built verbalizer"
        );

        Ok(Verbalizer {
            classes,
            orders,
            all,
        })
    }

    /// Verbalize a tagged line, joining the tokens with single spaces.
    ///
    /// # Errors
    ///
    /// [`PipelineError::MalformedToken`] when the text does not parse,
    /// names an unknown class or carries fields its class cannot read;
    /// [`PipelineError::AmbiguousOrderMarker`] when a token carries both
    /// order markers.
    pub fn verbalize(&self, tagged: &str) -> Result<String> {
        let tokens = parse_tokens(tagged)?;
        let mut words = Vec::with_capacity(tokens.len());
        for token in tokens {
            words.push(self.verbalize_token(token)?);
        }
        Ok(words.join(" "))
    }

    /// Verbalize one token.
    pub fn verbalize_token(&self, mut token: Token) -> Result<String> {
        let grammar = self.classes.get(&token.class_name).ok_or_else(|| {
            PipelineError::MalformedToken {
                token: token.to_string(),
                reason: format!("no verbalizer for class '{}'", token.class_name),
            }
        })?;
        token.arrange(&self.orders)?;

        let text = token.to_string();
        match grammar.apply(&text) {
            Ok(written) => {
                trace!(class = %token.class_name, %written, "verbalized token");
                Ok(written)
            }
            Err(FstError::NoMatch) => Err(PipelineError::MalformedToken {
                reason: format!("fields do not fit the {} verbalizer", token.class_name),
                token: text,
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// Verbalizer of `class`.
    pub fn class(&self, class: &str) -> Option<&Grammar> {
        self.classes.get(class)
    }

    /// Canonical field order of every class.
    pub fn field_orders(&self) -> &FxHashMap<String, Vec<String>> {
        &self.orders
    }

    /// The sentence verbalizer over `tokens { ... }` lines.
    pub fn all(&self) -> &Grammar {
        &self.all
    }
}
