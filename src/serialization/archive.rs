//! Grammar archives: named automata exported for deployment.

use crate::fst::Fst;
use crate::pipeline::{Normalizer, ALL, TOKENIZE_AND_CLASSIFY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use super::{
    validated, AttSerializer, BincodeSerializer, FstSerializer, JsonSerializer, SerializationError,
};

/// Rule name of the reduplication acceptor shipped with the verbalizer.
pub const REDUP: &str = "REDUP";

/// Rule-name to automaton map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrammarArchive {
    rules: BTreeMap<String, Fst>,
}

impl GrammarArchive {
    /// Empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// The sentence tagger under [`TOKENIZE_AND_CLASSIFY`].
    pub fn classify(normalizer: &Normalizer) -> Self {
        let mut archive = Self::new();
        archive.insert(
            TOKENIZE_AND_CLASSIFY,
            normalizer.classifier().grammar().fst().clone(),
        );
        archive
    }

    /// The sentence verbalizer under [`ALL`], plus the [`REDUP`] acceptor.
    pub fn verbalize(normalizer: &Normalizer) -> Self {
        let mut archive = Self::new();
        archive.insert(ALL, normalizer.verbalizer().all().fst().clone());
        archive.insert(REDUP, Fst::accept(REDUP));
        archive
    }

    /// Add or replace a rule.
    pub fn insert(&mut self, name: impl Into<String>, fst: Fst) {
        self.rules.insert(name.into(), fst);
    }

    /// Look up a rule.
    pub fn get(&self, name: &str) -> Option<&Fst> {
        self.rules.get(name)
    }

    /// Rules in name order.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &Fst)> {
        self.rules.iter().map(|(name, fst)| (name.as_str(), fst))
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the archive holds no rule.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub(crate) fn validated(self) -> Result<Self, SerializationError> {
        let mut rules = BTreeMap::new();
        for (name, fst) in self.rules {
            rules.insert(name, validated(fst)?);
        }
        Ok(GrammarArchive { rules })
    }
}

/// On-disk format of exported archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchiveFormat {
    /// bincode, `.bin`
    #[default]
    Bincode,
    /// JSON, `.json`
    Json,
    /// AT&T text, `.att`
    Att,
}

impl ArchiveFormat {
    /// File extension.
    pub fn extension(self) -> &'static str {
        match self {
            ArchiveFormat::Bincode => "bin",
            ArchiveFormat::Json => "json",
            ArchiveFormat::Att => "att",
        }
    }

    /// Write `archive` to `path`.
    pub fn write(self, archive: &GrammarArchive, path: &Path) -> Result<(), SerializationError> {
        let writer = BufWriter::new(File::create(path)?);
        match self {
            ArchiveFormat::Bincode => BincodeSerializer::serialize_archive(archive, writer),
            ArchiveFormat::Json => JsonSerializer::serialize_archive(archive, writer),
            ArchiveFormat::Att => AttSerializer::serialize_archive(archive, writer),
        }
    }

    /// Read an archive from `path`.
    pub fn read(self, path: &Path) -> Result<GrammarArchive, SerializationError> {
        let reader = File::open(path)?;
        match self {
            ArchiveFormat::Bincode => BincodeSerializer::deserialize_archive(reader),
            ArchiveFormat::Json => JsonSerializer::deserialize_archive(reader),
            ArchiveFormat::Att => AttSerializer::deserialize_archive(reader),
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveFormat::Bincode => f.write_str("bincode"),
            ArchiveFormat::Json => f.write_str("json"),
            ArchiveFormat::Att => f.write_str("att"),
        }
    }
}

impl FromStr for ArchiveFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bincode" | "bin" => Ok(ArchiveFormat::Bincode),
            "json" => Ok(ArchiveFormat::Json),
            "att" | "text" => Ok(ArchiveFormat::Att),
            other => Err(format!(
                "unknown archive format '{other}' (expected bincode, json or att)"
            )),
        }
    }
}

/// Export the tagger and verbalizer archives of `normalizer`.
///
/// Writes `<dir>/classify/tokenize_and_classify.<ext>` and
/// `<dir>/verbalize/verbalize.<ext>`, creating directories as needed, and
/// returns the written paths.
pub fn export_grammars(
    normalizer: &Normalizer,
    output_dir: &Path,
    format: ArchiveFormat,
) -> Result<Vec<PathBuf>, SerializationError> {
    let targets = [
        (
            "classify",
            "tokenize_and_classify",
            GrammarArchive::classify(normalizer),
        ),
        ("verbalize", "verbalize", GrammarArchive::verbalize(normalizer)),
    ];

    let mut written = Vec::with_capacity(targets.len());
    for (dir, stem, archive) in targets {
        let dir = output_dir.join(dir);
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{stem}.{}", format.extension()));
        format.write(&archive, &path)?;
        debug!(path = %path.display(), %format, rules = archive.len(), "exported archive");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_rules_are_sorted() {
        let mut archive = GrammarArchive::new();
        archive.insert("b", Fst::accept("b"));
        archive.insert("a", Fst::accept("a"));
        let names: Vec<&str> = archive.rules().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(archive.len(), 2);
        assert!(!archive.is_empty());
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<ArchiveFormat>().unwrap(), ArchiveFormat::Json);
        assert_eq!("att".parse::<ArchiveFormat>().unwrap().extension(), "att");
        assert!("far".parse::<ArchiveFormat>().is_err());
    }

    #[test]
    fn test_write_and_read_every_format() {
        let dir = tempfile::tempdir().unwrap();
        let mut archive = GrammarArchive::new();
        archive.insert(REDUP, Fst::accept(REDUP));
        archive.insert("ONE", Fst::cross("uno", "1"));

        for format in [ArchiveFormat::Bincode, ArchiveFormat::Json, ArchiveFormat::Att] {
            let path = dir.path().join(format!("rules.{}", format.extension()));
            format.write(&archive, &path).unwrap();
            let loaded = format.read(&path).unwrap();
            assert_eq!(loaded.len(), 2, "{format}");
            assert_eq!(
                loaded.get("ONE").unwrap().shortest_path("uno").unwrap(),
                "1",
                "{format}"
            );
            assert!(loaded.get(REDUP).unwrap().accepts(REDUP), "{format}");
        }
    }
}
