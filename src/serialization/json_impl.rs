//! JSON serializer for human-readable format.

use crate::fst::Fst;
use std::io::{Read, Write};

use super::{validated, FstSerializer, GrammarArchive, SerializationError};

/// JSON serializer for human-readable format.
///
/// Useful for inspecting small grammars; large grammars are better stored
/// with [`BincodeSerializer`](super::BincodeSerializer).
pub struct JsonSerializer;

impl FstSerializer for JsonSerializer {
    fn serialize<W: Write>(fst: &Fst, writer: W) -> Result<(), SerializationError> {
        serde_json::to_writer_pretty(writer, fst)?;
        Ok(())
    }

    fn deserialize<R: Read>(reader: R) -> Result<Fst, SerializationError> {
        let fst: Fst = serde_json::from_reader(reader)?;
        Ok(validated(fst)?)
    }

    fn serialize_archive<W: Write>(
        archive: &GrammarArchive,
        writer: W,
    ) -> Result<(), SerializationError> {
        serde_json::to_writer_pretty(writer, archive)?;
        Ok(())
    }

    fn deserialize_archive<R: Read>(reader: R) -> Result<GrammarArchive, SerializationError> {
        let archive: GrammarArchive = serde_json::from_reader(reader)?;
        archive.validated()
    }
}
