//! Two-stage text normalization: classify, then verbalize.
//!
//! A [`Normalizer`] owns the frozen grammars of one locale. Tagging runs the
//! sentence [`Classifier`] over a line and yields `tokens { ... }` text;
//! verbalization parses that text back into tokens and runs each through
//! its class [`Verbalizer`].
//!
//! # Example
//!
//! ```rust,ignore
//! use libtextnorm::prelude::*;
//!
//! let normalizer = Normalizer::new(NormalizerConfig::default())?;
//!
//! let tagged = normalizer.classify_and_tag("el uno de enero", true)?;
//! assert_eq!(normalizer.verbalize(tagged.best())?, "el 1 de enero");
//!
//! assert_eq!(normalizer.normalize("cinco kilómetros")?, "5 km");
//! ```
//!
//! # Thread Safety
//!
//! [`Normalizer`] is `Send + Sync`. Every automaton is built before
//! [`Normalizer::new`] returns and is only read afterwards, so one instance
//! can serve any number of threads behind an `Arc`.

mod classifier;
mod error;
mod verbalizer;

pub use classifier::{Classifier, TOKENIZE_AND_CLASSIFY};
pub use error::{PipelineError, Result};
pub use verbalizer::{Verbalizer, ALL};

use crate::config::NormalizerConfig;
use crate::grammar::{GrammarOptions, GrammarRegistry};
use crate::locale::{self, Locale};
use std::fmt;
use std::time::Instant;
use tracing::{debug, trace};

/// Step of the normalization flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Surface text to tagged tokens
    Classifying,
    /// Tagged tokens to written text
    Verbalizing,
}

impl Stage {
    /// The stage after this one, `None` once verbalization is done.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Classifying => Some(Stage::Verbalizing),
            Stage::Verbalizing => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Classifying => f.write_str("classifying"),
            Stage::Verbalizing => f.write_str("verbalizing"),
        }
    }
}

/// Result of tagging a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tagging {
    /// The single best reading
    Single(String),
    /// Distinct readings, cheapest first
    Candidates(Vec<String>),
}

impl Tagging {
    /// The cheapest reading.
    pub fn best(&self) -> &str {
        match self {
            Tagging::Single(tagged) => tagged,
            Tagging::Candidates(candidates) => candidates.first().map_or("", String::as_str),
        }
    }

    /// Every reading, cheapest first.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Tagging::Single(tagged) => vec![tagged],
            Tagging::Candidates(candidates) => candidates,
        }
    }
}

/// The normalization pipeline for one locale.
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: NormalizerConfig,
    registry: GrammarRegistry,
    classifier: Classifier,
    verbalizer: Verbalizer,
}

impl Normalizer {
    /// Build the pipeline for the configured language.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration or when a grammar cannot be
    /// built. Every grammar is built here, never on first use.
    pub fn new(config: NormalizerConfig) -> Result<Self> {
        let locale = locale::for_language(config.language);
        Self::with_locale(config, locale.as_ref())
    }

    /// Build the pipeline from an explicit locale.
    pub fn with_locale(config: NormalizerConfig, locale: &dyn Locale) -> Result<Self> {
        config.validate()?;
        if locale.language() != config.language {
            return Err(PipelineError::Config(format!(
                "locale '{}' does not match configured language '{}'",
                locale.language(),
                config.language
            )));
        }

        let started = Instant::now();
        let options = GrammarOptions {
            input_case: config.input_case,
            deterministic: config.deterministic,
        };
        let registry = GrammarRegistry::build(locale.classes()?, options)?;
        let classifier = Classifier::new(&registry)?;
        let verbalizer = Verbalizer::new(&registry)?;

        debug!(
            language = %config.language,
            input_case = %config.input_case,
            deterministic = config.deterministic,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "normalizer ready"
        );

        Ok(Normalizer {
            config,
            registry,
            classifier,
            verbalizer,
        })
    }

    /// Tag `text`.
    ///
    /// With `deterministic` the single best reading is returned, otherwise
    /// up to `max_candidates` distinct readings, cheapest first.
    ///
    /// # Errors
    ///
    /// [`PipelineError::UnsupportedSymbol`] for characters no grammar reads,
    /// [`PipelineError::NoMatch`] when no reading exists.
    pub fn classify_and_tag(&self, text: &str, deterministic: bool) -> Result<Tagging> {
        self.stage(Stage::Classifying, || {
            if deterministic {
                let best = self.classifier.classify(text, 1)?.into_iter().next();
                best.map(Tagging::Single).ok_or(PipelineError::NoMatch)
            } else {
                self.classifier
                    .classify(text, self.config.max_candidates)
                    .map(Tagging::Candidates)
            }
        })
    }

    /// Verbalize tagged text.
    ///
    /// # Errors
    ///
    /// [`PipelineError::MalformedToken`] or
    /// [`PipelineError::AmbiguousOrderMarker`] when the text is not
    /// well-formed tagged output.
    pub fn verbalize(&self, tagged: &str) -> Result<String> {
        self.stage(Stage::Verbalizing, || self.verbalizer.verbalize(tagged))
    }

    /// Tag with the best reading, then verbalize.
    pub fn normalize(&self, text: &str) -> Result<String> {
        let tagging = self.classify_and_tag(text, true)?;
        self.verbalize(tagging.best())
    }

    /// Distinct verbalizations of the top tagged readings.
    ///
    /// Readings whose verbalization fails are skipped; the first failure is
    /// returned only when no reading verbalizes.
    pub fn normalize_candidates(&self, text: &str) -> Result<Vec<String>> {
        let candidates = self.classify_and_tag(text, false)?.into_vec();
        let mut written: Vec<String> = Vec::with_capacity(candidates.len());
        let mut first_error = None;
        for tagged in &candidates {
            match self.verbalize(tagged) {
                Ok(text) => {
                    if !written.contains(&text) {
                        written.push(text);
                    }
                }
                Err(err) => {
                    first_error.get_or_insert(err);
                }
            }
        }
        match (written.is_empty(), first_error) {
            (true, Some(err)) => Err(err),
            _ => Ok(written),
        }
    }

    fn stage<T>(&self, stage: Stage, run: impl FnOnce() -> Result<T>) -> Result<T> {
        let started = Instant::now();
        let result = run();
        match &result {
            Ok(_) => trace!(
                %stage,
                next = ?stage.next(),
                elapsed_us = started.elapsed().as_micros() as u64,
                "stage complete"
            ),
            Err(err) => debug!(%stage, error = %err, "stage failed"),
        }
        result
    }

    /// Configuration the pipeline was built with.
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Per-class grammars.
    pub fn registry(&self) -> &GrammarRegistry {
        &self.registry
    }

    /// The sentence tagger.
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// The verbalizer.
    pub fn verbalizer(&self) -> &Verbalizer {
        &self.verbalizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Language;
    use crate::fst::Fst;
    use crate::grammar::{field_extractor, tagged_field, word_char, ClassSpec, GrammarError};

    struct Tiny;

    impl Locale for Tiny {
        fn language(&self) -> Language {
            Language::Es
        }

        fn classes(&self) -> std::result::Result<Vec<ClassSpec>, GrammarError> {
            Ok(vec![
                ClassSpec::new(
                    "cardinal",
                    1.1,
                    &["integer"],
                    |options| {
                        let mut numbers = Fst::string_map(&[("dos", "2")]);
                        if !options.deterministic {
                            numbers = numbers.union(&Fst::cross("dos", "II").add_weight(0.5)?);
                        }
                        Ok(tagged_field("integer", &numbers))
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
            ])
        }
    }

    fn normalizer(deterministic: bool) -> Normalizer {
        let config = NormalizerConfig::builder()
            .deterministic(deterministic)
            .build()
            .unwrap();
        Normalizer::with_locale(config, &Tiny).unwrap()
    }

    #[test]
    fn test_normalizer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Normalizer>();
    }

    #[test]
    fn test_stage_flow() {
        assert_eq!(Stage::Classifying.next(), Some(Stage::Verbalizing));
        assert_eq!(Stage::Verbalizing.next(), None);
        assert_eq!(Stage::Classifying.to_string(), "classifying");
    }

    #[test]
    fn test_classify_and_tag_deterministic() {
        let normalizer = normalizer(true);
        assert_eq!(
            normalizer.classify_and_tag("tengo dos", true).unwrap(),
            Tagging::Single(
                "tokens { word { name: \"tengo\" } } tokens { cardinal { integer: \"2\" } }"
                    .to_string()
            )
        );
        assert_eq!(normalizer.normalize("tengo dos").unwrap(), "tengo 2");
    }

    #[test]
    fn test_candidates() {
        let normalizer = normalizer(false);
        let tagging = normalizer.classify_and_tag("dos", false).unwrap();
        assert_eq!(
            tagging.clone().into_vec(),
            vec![
                "tokens { cardinal { integer: \"2\" } }",
                "tokens { cardinal { integer: \"II\" } }",
                "tokens { word { name: \"dos\" } }",
            ]
        );
        assert_eq!(tagging.best(), "tokens { cardinal { integer: \"2\" } }");
        assert_eq!(
            normalizer.normalize_candidates("dos").unwrap(),
            vec!["2", "II", "dos"]
        );
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = NormalizerConfig {
            max_candidates: 0,
            ..NormalizerConfig::default()
        };
        assert!(matches!(
            Normalizer::with_locale(config, &Tiny),
            Err(PipelineError::Config(_))
        ));
    }
}
