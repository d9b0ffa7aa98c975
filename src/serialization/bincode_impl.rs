//! Bincode serializer for compact binary format.

use crate::fst::Fst;
use std::io::{Read, Write};

use super::{validated, FstSerializer, GrammarArchive, SerializationError};

/// Bincode serializer for compact binary format.
///
/// The fastest format to load; use it for deployed grammars.
pub struct BincodeSerializer;

impl FstSerializer for BincodeSerializer {
    fn serialize<W: Write>(fst: &Fst, mut writer: W) -> Result<(), SerializationError> {
        bincode::serialize_into(&mut writer, fst)?;
        Ok(())
    }

    fn deserialize<R: Read>(mut reader: R) -> Result<Fst, SerializationError> {
        let fst: Fst = bincode::deserialize_from(&mut reader)?;
        Ok(validated(fst)?)
    }

    fn serialize_archive<W: Write>(
        archive: &GrammarArchive,
        mut writer: W,
    ) -> Result<(), SerializationError> {
        bincode::serialize_into(&mut writer, archive)?;
        Ok(())
    }

    fn deserialize_archive<R: Read>(mut reader: R) -> Result<GrammarArchive, SerializationError> {
        let archive: GrammarArchive = bincode::deserialize_from(&mut reader)?;
        archive.validated()
    }
}
