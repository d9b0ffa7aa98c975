//! Automaton serialization support.
//!
//! This module persists single automata and whole [`GrammarArchive`]s using
//! bincode, JSON or the OpenFst AT&T text format, with optional gzip
//! compression.
//!
//! # Example
//!
//! ```rust,ignore
//! use libtextnorm::prelude::*;
//! use libtextnorm::serialization::{BincodeSerializer, FstSerializer};
//! use std::fs::File;
//!
//! let fst = Fst::cross("uno", "1");
//!
//! // Serialize to file
//! let file = File::create("uno.bin")?;
//! BincodeSerializer::serialize(&fst, file)?;
//!
//! // Deserialize from file
//! let file = File::open("uno.bin")?;
//! let loaded = BincodeSerializer::deserialize(file)?;
//! ```

use crate::fst::{Fst, FstError};
use std::io::{Read, Write};

// Serializer implementations
mod archive;
mod att_impl;
mod bincode_impl;
mod json_impl;

#[cfg(feature = "compression")]
mod compression_impl;

// Re-exports
pub use self::archive::{export_grammars, ArchiveFormat, GrammarArchive, REDUP};
pub use self::att_impl::AttSerializer;
pub use self::bincode_impl::BincodeSerializer;
pub use self::json_impl::JsonSerializer;

#[cfg(feature = "compression")]
pub use self::compression_impl::GzipSerializer;

/// Trait for serializing and deserializing automata.
///
/// Loaded automata are validated: every arc must point at an existing state
/// and carry a non-negative weight.
pub trait FstSerializer {
    /// Serialize an automaton to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    fn serialize<W: Write>(fst: &Fst, writer: W) -> Result<(), SerializationError>;

    /// Deserialize an automaton from a reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or decoding fails, or if the decoded
    /// automaton is inconsistent.
    fn deserialize<R: Read>(reader: R) -> Result<Fst, SerializationError>;

    /// Serialize a rule-name to automaton map.
    fn serialize_archive<W: Write>(
        archive: &GrammarArchive,
        writer: W,
    ) -> Result<(), SerializationError>;

    /// Deserialize a rule-name to automaton map.
    fn deserialize_archive<R: Read>(reader: R) -> Result<GrammarArchive, SerializationError>;
}

/// Errors that can occur during serialization/deserialization.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// Error during bincode serialization
    #[error("Bincode error: {0}")]
    Bincode(#[from] bincode::Error),
    /// Error during JSON serialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The decoded automaton is inconsistent
    #[error("Invalid automaton: {0}")]
    Fst(#[from] FstError),
    /// Malformed AT&T text
    #[error("AT&T format error at line {line}: {reason}")]
    Att {
        /// One-based line number
        line: usize,
        /// What is wrong with it
        reason: String,
    },
}

/// Re-validate an automaton produced by a decoder.
pub(crate) fn validated(fst: Fst) -> Result<Fst, FstError> {
    let (states, start) = fst.into_parts();
    Fst::from_parts(states, start)
}
