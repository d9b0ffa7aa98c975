//! Error types for the normalization pipeline.

use crate::config::ConfigError;
use crate::fst::FstError;
use crate::grammar::GrammarError;
use crate::token::TokenError;

/// Errors that can occur while tagging or verbalizing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    /// No accepting path exists for the input.
    #[error("no grammar accepts the input")]
    NoMatch,

    /// The input contains a character outside the grammar alphabet.
    #[error("unsupported symbol {0:?}")]
    UnsupportedSymbol(char),

    /// Tagged text does not parse, or names a class without a verbalizer.
    #[error("malformed token '{token}': {reason}")]
    MalformedToken {
        /// Offending token text
        token: String,
        /// What is wrong with it
        reason: String,
    },

    /// A token carries both order markers.
    #[error("token '{token}' carries both preserve_order and field_order")]
    AmbiguousOrderMarker {
        /// Offending token text
        token: String,
    },

    /// Grammar construction failed at load time.
    #[error("grammar construction failed: {0}")]
    Grammar(#[from] GrammarError),

    /// The configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<FstError> for PipelineError {
    fn from(err: FstError) -> Self {
        match err {
            FstError::NoMatch => PipelineError::NoMatch,
            other => PipelineError::Grammar(GrammarError::Fst(other)),
        }
    }
}

impl From<TokenError> for PipelineError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed { token, reason } => {
                PipelineError::MalformedToken { token, reason }
            }
            TokenError::AmbiguousOrderMarker { token } => {
                PipelineError::AmbiguousOrderMarker { token }
            }
        }
    }
}

impl From<ConfigError> for PipelineError {
    fn from(err: ConfigError) -> Self {
        PipelineError::Config(err.to_string())
    }
}

/// A specialized `Result` type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
