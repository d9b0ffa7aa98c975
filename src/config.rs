//! Normalizer configuration.
//!
//! A [`NormalizerConfig`] selects the locale, the casing the grammars expect
//! and whether decoding returns one normalization or several candidates.
//!
//! # Example
//!
//! ```rust,ignore
//! use libtextnorm::config::{InputCase, NormalizerConfig};
//!
//! let config = NormalizerConfig::builder()
//!     .input_case(InputCase::LowerCased)
//!     .deterministic(false)
//!     .max_candidates(5)
//!     .build()?;
//! ```

use std::fmt;
use std::str::FromStr;

/// Errors raised while assembling or loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `max_candidates` must allow at least one candidate.
    #[error("max_candidates must be at least 1")]
    ZeroCandidates,
    /// An enum-valued option had an unrecognized spelling.
    #[error("unknown {option} value '{value}'")]
    UnknownValue {
        /// Option being parsed
        option: &'static str,
        /// Offending value
        value: String,
    },
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid JSON for this schema.
    #[cfg(feature = "serialization")]
    #[error("invalid configuration file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Locales with bundled grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Language {
    /// Spanish
    #[default]
    #[cfg_attr(feature = "serialization", serde(rename = "es"))]
    Es,
}

impl Language {
    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Language::Es => "es",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "es" | "spanish" => Ok(Language::Es),
            _ => Err(ConfigError::UnknownValue {
                option: "language",
                value: s.to_string(),
            }),
        }
    }
}

/// Casing the classifier expects from its input.
///
/// Only the whitelist class is case sensitive: with [`InputCase::Cased`] it
/// also accepts capitalized spoken forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum InputCase {
    /// Input is entirely lower case
    LowerCased,
    /// Input may contain capitals
    #[default]
    Cased,
}

impl fmt::Display for InputCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputCase::LowerCased => f.write_str("lower_cased"),
            InputCase::Cased => f.write_str("cased"),
        }
    }
}

impl FromStr for InputCase {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lower_cased" | "lower" => Ok(InputCase::LowerCased),
            "cased" => Ok(InputCase::Cased),
            _ => Err(ConfigError::UnknownValue {
                option: "input_case",
                value: s.to_string(),
            }),
        }
    }
}

/// Options shared by every stage of a normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct NormalizerConfig {
    /// Locale whose grammars are loaded
    pub language: Language,
    /// Casing of the input text
    pub input_case: InputCase,
    /// Build grammars that emit a single reading per span
    pub deterministic: bool,
    /// Upper bound on candidates returned in non-deterministic decoding
    pub max_candidates: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            language: Language::Es,
            input_case: InputCase::Cased,
            deterministic: true,
            max_candidates: 3,
        }
    }
}

impl NormalizerConfig {
    /// Start a builder from the defaults.
    pub fn builder() -> NormalizerConfigBuilder {
        NormalizerConfigBuilder::new()
    }

    /// Check option values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_candidates == 0 {
            return Err(ConfigError::ZeroCandidates);
        }
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    ///
    /// Missing keys take their default values.
    #[cfg(feature = "serialization")]
    pub fn from_json_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config: NormalizerConfig = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }
}

/// Fluent construction of a [`NormalizerConfig`].
#[derive(Debug, Clone, Default)]
pub struct NormalizerConfigBuilder {
    config: NormalizerConfig,
}

impl NormalizerConfigBuilder {
    /// Builder seeded with [`NormalizerConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the locale.
    pub fn language(mut self, language: Language) -> Self {
        self.config.language = language;
        self
    }

    /// Set the expected input casing.
    pub fn input_case(mut self, input_case: InputCase) -> Self {
        self.config.input_case = input_case;
        self
    }

    /// Choose single-reading or multi-reading grammars.
    pub fn deterministic(mut self, deterministic: bool) -> Self {
        self.config.deterministic = deterministic;
        self
    }

    /// Set the candidate limit for non-deterministic decoding.
    pub fn max_candidates(mut self, max_candidates: usize) -> Self {
        self.config.max_candidates = max_candidates;
        self
    }

    /// Validate and return the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCandidates`] when `max_candidates` is 0.
    pub fn build(self) -> Result<NormalizerConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
