//! # libtextnorm
//!
//! Inverse text normalization with weighted finite-state transducers.
//!
//! Spoken-form text is tagged into semiotic tokens (cardinals, dates,
//! money amounts, ...) by a weighted union of per-class grammars, then each
//! token is verbalized into its written form:
//!
//! ```text
//! "el uno de enero"
//!   -> tokens { word { name: "el" } } tokens { date { day: "1" month: "enero" preserve_order: true } }
//!   -> "el 1 de enero"
//! ```
//!
//! The grammars are built on the tropical-semiring automata of [`fst`];
//! the Spanish tables live in [`locale::es`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use libtextnorm::prelude::*;
//!
//! let normalizer = Normalizer::new(NormalizerConfig::default())?;
//! assert_eq!(normalizer.normalize("cinco dólares")?, "$5");
//!
//! let tagged = normalizer.classify_and_tag("veintiuno", false)?;
//! for candidate in tagged.into_vec() {
//!     println!("{candidate}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod fst;
pub mod grammar;
pub mod locale;
pub mod pipeline;
pub mod token;

#[cfg(feature = "serialization")]
pub mod serialization;

/// CLI interface and utilities
#[cfg(feature = "cli")]
pub mod cli;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::config::{InputCase, Language, NormalizerConfig};
    pub use crate::fst::{Fst, FstError, Label, Path, Weight};
    pub use crate::grammar::{
        ClassRole, ClassSpec, Grammar, GrammarError, GrammarKind, GrammarOptions,
        GrammarRegistry,
    };
    pub use crate::locale::Locale;
    pub use crate::pipeline::{Normalizer, PipelineError, Stage, Tagging};
    pub use crate::token::{Field, FieldValue, Token};

    #[cfg(feature = "serialization")]
    pub use crate::serialization::{
        ArchiveFormat, AttSerializer, BincodeSerializer, FstSerializer, GrammarArchive,
        JsonSerializer,
    };

    #[cfg(feature = "compression")]
    pub use crate::serialization::GzipSerializer;
}
