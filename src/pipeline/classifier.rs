//! Sentence-level tagging.
//!
//! The classifier is the weighted union of every semiotic tagger, wrapped
//! in `tokens { ... }`, with punctuation allowed on either side of a token
//! and runs of spaces between tokens collapsed to one.

use super::{PipelineError, Result};
use crate::fst::Fst;
use crate::grammar::{
    add_tokens, delete_extra_space, delete_space, insert_space, ClassRole, Grammar,
    GrammarError, GrammarKind, GrammarRegistry,
};
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::{debug, trace};

/// Rule name of the sentence tagger.
pub const TOKENIZE_AND_CLASSIFY: &str = "TOKENIZE_AND_CLASSIFY";

/// Cost of each token boundary.
const SPACE_WEIGHT: f32 = 1.1;

/// Full-sentence tagger.
#[derive(Debug, Clone)]
pub struct Classifier {
    grammar: Grammar,
    alphabet: BTreeSet<char>,
}

impl Classifier {
    /// Assemble the sentence tagger from the registered classes.
    ///
    /// # Errors
    ///
    /// Fails when no semiotic class is registered or a class weight is
    /// invalid.
    pub fn new(registry: &GrammarRegistry) -> Result<Self> {
        let started = Instant::now();

        let token = role_union(registry, ClassRole::Semiotic)?.ok_or_else(|| {
            GrammarError::Empty {
                name: TOKENIZE_AND_CLASSIFY.to_string(),
            }
        })?;
        let unit = match role_union(registry, ClassRole::Punctuation)? {
            Some(punct) => {
                let leading = punct.concat(&insert_space()).closure(0);
                let trailing = insert_space().concat(&punct).closure(0);
                let attached = leading.concat(&token).concat(&trailing);
                let bare = punct.concat(&trailing);
                attached.union(&bare)
            }
            None => token,
        };

        let separator = delete_extra_space().add_weight(SPACE_WEIGHT)?;
        let sentence = delete_space()
            .concat(&unit)
            .concat(&separator.concat(&unit).closure(0))
            .concat(&delete_space())
            .optimize();

        let grammar = Grammar::new(
            TOKENIZE_AND_CLASSIFY,
            GrammarKind::Classify,
            sentence,
            registry.options().deterministic,
        )?;
        let alphabet = grammar.fst().input_alphabet();

        debug!(
            states = grammar.fst().num_states(),
            arcs = grammar.fst().num_arcs(),
            alphabet = alphabet.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "built sentence classifier"
        );

        Ok(Classifier { grammar, alphabet })
    }

    /// Tag `line`, returning up to `k` readings, cheapest first.
    ///
    /// Surrounding spaces are ignored and a blank line tags to the empty
    /// string.
    ///
    /// # Errors
    ///
    /// [`PipelineError::UnsupportedSymbol`] for line breaks and characters
    /// outside [`Classifier::alphabet`], [`PipelineError::NoMatch`] when no
    /// reading exists.
    pub fn classify(&self, line: &str, k: usize) -> Result<Vec<String>> {
        let line = line.trim_matches(' ');
        if let Some(c) = line.chars().find(|c| !self.alphabet.contains(c)) {
            return Err(PipelineError::UnsupportedSymbol(c));
        }
        if line.is_empty() {
            return Ok(vec![String::new()]);
        }

        let started = Instant::now();
        let paths = self.grammar.fst().k_shortest_paths(line, k.max(1))?;
        trace!(
            input_chars = line.chars().count(),
            candidates = paths.len(),
            best_weight = paths.first().map(|p| p.weight.value()),
            elapsed_us = started.elapsed().as_micros() as u64,
            "classified line"
        );
        Ok(paths.into_iter().map(|path| path.output).collect())
    }

    /// The sentence tagger.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Characters the tagger can read.
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }
}

/// Weighted union of the taggers with `role`, each wrapped in `tokens { }`.
fn role_union(registry: &GrammarRegistry, role: ClassRole) -> Result<Option<Fst>> {
    let taggers: Vec<(&Fst, f32)> = registry
        .with_role(role)
        .map(|class| (class.tagger.fst(), class.weight))
        .collect();
    if taggers.is_empty() {
        return Ok(None);
    }
    Ok(Some(add_tokens("tokens", &Fst::union_all(taggers)?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{
        digit, field_extractor, tagged_field, word_char, ClassSpec, GrammarOptions,
    };

    fn registry() -> GrammarRegistry {
        let specs = vec![
            ClassSpec::new(
                "cardinal",
                1.1,
                &["integer"],
                |_| {
                    Ok(tagged_field(
                        "integer",
                        &Fst::string_map(&[("uno", "1"), ("dos", "2")]).union(&digit().closure(1)),
                    ))
                },
                |_| Ok(field_extractor("integer")),
            ),
            ClassSpec::new(
                "word",
                100.0,
                &["name"],
                |_| Ok(tagged_field("name", &word_char().closure(1))),
                |_| Ok(field_extractor("name")),
            ),
            ClassSpec::new(
                "punctuation",
                1.1,
                &["name"],
                |_| Ok(tagged_field("name", &Fst::accept(","))),
                |_| Ok(field_extractor("name")),
            )
            .punctuation(),
        ];
        GrammarRegistry::build(specs, GrammarOptions::default()).unwrap()
    }

    #[test]
    fn test_classify_prefers_semiotic_class() {
        let classifier = Classifier::new(&registry()).unwrap();
        assert_eq!(
            classifier.classify("dos", 1).unwrap(),
            vec!["tokens { cardinal { integer: \"2\" } }"]
        );
    }

    #[test]
    fn test_classify_collapses_spaces_and_splits_punctuation() {
        let classifier = Classifier::new(&registry()).unwrap();
        assert_eq!(
            classifier.classify("  hola,   uno ", 1).unwrap(),
            vec![
                "tokens { word { name: \"hola\" } } tokens { punctuation { name: \",\" } } \
                 tokens { cardinal { integer: \"1\" } }"
            ]
        );
    }

    #[test]
    fn test_classify_rejects_unknown_symbols() {
        let classifier = Classifier::new(&registry()).unwrap();
        assert_eq!(
            classifier.classify("hola\nmundo", 1),
            Err(PipelineError::UnsupportedSymbol('\n'))
        );
        assert_eq!(
            classifier.classify("hola \u{263A}", 1),
            Err(PipelineError::UnsupportedSymbol('\u{263A}'))
        );
    }

    #[test]
    fn test_classify_blank_line() {
        let classifier = Classifier::new(&registry()).unwrap();
        assert_eq!(classifier.classify("   ", 3).unwrap(), vec![String::new()]);
    }

    #[test]
    fn test_classify_candidates_are_ordered() {
        let classifier = Classifier::new(&registry()).unwrap();
        let candidates = classifier.classify("uno", 3).unwrap();
        assert_eq!(candidates[0], "tokens { cardinal { integer: \"1\" } }");
        assert_eq!(candidates[1], "tokens { word { name: \"uno\" } }");
    }

    #[test]
    fn test_classifier_requires_semiotic_classes() {
        let registry = GrammarRegistry::build(Vec::new(), GrammarOptions::default()).unwrap();
        assert!(matches!(
            Classifier::new(&registry),
            Err(PipelineError::Grammar(_))
        ));
    }
}
