//! Gzip compression wrapper for serializers.

use crate::fst::Fst;
use std::io::{Read, Write};

use super::{FstSerializer, GrammarArchive, SerializationError};

/// Gzip-compressed serializer wrapper.
///
/// This wrapper applies gzip compression to any underlying serializer.
///
/// # Example
///
/// ```rust,ignore
/// use libtextnorm::fst::Fst;
/// use libtextnorm::serialization::{BincodeSerializer, FstSerializer, GzipSerializer};
/// use std::fs::File;
///
/// let fst = Fst::cross("uno", "1");
///
/// // Serialize with gzip compression
/// let file = File::create("uno.bin.gz")?;
/// GzipSerializer::<BincodeSerializer>::serialize(&fst, file)?;
///
/// // Deserialize
/// let file = File::open("uno.bin.gz")?;
/// let loaded = GzipSerializer::<BincodeSerializer>::deserialize(file)?;
/// ```
pub struct GzipSerializer<S> {
    _inner: std::marker::PhantomData<S>,
}

impl<S: FstSerializer> FstSerializer for GzipSerializer<S> {
    fn serialize<W: Write>(fst: &Fst, writer: W) -> Result<(), SerializationError> {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut encoder = GzEncoder::new(writer, Compression::default());
        S::serialize(fst, &mut encoder)?;
        encoder.finish().map_err(SerializationError::Io)?;
        Ok(())
    }

    fn deserialize<R: Read>(reader: R) -> Result<Fst, SerializationError> {
        use flate2::read::GzDecoder;

        S::deserialize(GzDecoder::new(reader))
    }

    fn serialize_archive<W: Write>(
        archive: &GrammarArchive,
        writer: W,
    ) -> Result<(), SerializationError> {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut encoder = GzEncoder::new(writer, Compression::default());
        S::serialize_archive(archive, &mut encoder)?;
        encoder.finish().map_err(SerializationError::Io)?;
        Ok(())
    }

    fn deserialize_archive<R: Read>(reader: R) -> Result<GrammarArchive, SerializationError> {
        use flate2::read::GzDecoder;

        S::deserialize_archive(GzDecoder::new(reader))
    }
}
