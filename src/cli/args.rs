//! CLI argument definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::InputCase;
use crate::serialization::ArchiveFormat;

#[derive(Parser)]
#[command(name = "textnorm")]
#[command(about = "Weighted finite-state inverse text normalization")]
#[command(version)]
pub struct Cli {
    /// Configuration file (JSON)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Casing the grammars expect (overrides the configuration file)
    #[arg(long, global = true, value_enum)]
    pub input_case: Option<InputCaseArg>,

    /// Build grammars that keep alternative readings
    #[arg(long, global = true)]
    pub non_deterministic: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Tag and verbalize text
    Normalize {
        /// Text to normalize (reads stdin line by line when omitted)
        text: Option<String>,

        /// Print every distinct normalization of the top readings
        #[arg(long)]
        candidates: bool,
    },

    /// Print the tagged form of text
    Tag {
        /// Text to tag (reads stdin line by line when omitted)
        text: Option<String>,

        /// Print the top readings instead of the best one
        #[arg(long)]
        candidates: bool,
    },

    /// Verbalize tagged text
    Verbalize {
        /// Tagged text (reads stdin line by line when omitted)
        tagged: Option<String>,
    },

    /// Export the sentence grammars as archives
    Export {
        /// Directory receiving classify/ and verbalize/
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Archive format
        #[arg(short, long, value_enum, default_value = "bincode")]
        format: FormatArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputCaseArg {
    /// Input is lower cased
    #[value(name = "lower_cased")]
    LowerCased,
    /// Input keeps its original casing
    Cased,
}

impl From<InputCaseArg> for InputCase {
    fn from(arg: InputCaseArg) -> Self {
        match arg {
            InputCaseArg::LowerCased => InputCase::LowerCased,
            InputCaseArg::Cased => InputCase::Cased,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Bincode binary format
    Bincode,
    /// JSON format
    Json,
    /// OpenFst AT&T text format
    Att,
}

impl From<FormatArg> for ArchiveFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Bincode => ArchiveFormat::Bincode,
            FormatArg::Json => ArchiveFormat::Json,
            FormatArg::Att => ArchiveFormat::Att,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "textnorm",
            "export",
            "--output-dir",
            "out",
            "--format",
            "att",
            "--input-case",
            "lower_cased",
        ])
        .unwrap();
        assert_eq!(cli.input_case, Some(InputCaseArg::LowerCased));
        match cli.command {
            Commands::Export { output_dir, format } => {
                assert_eq!(output_dir, PathBuf::from("out"));
                assert_eq!(ArchiveFormat::from(format), ArchiveFormat::Att);
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn test_parse_tag_candidates() {
        let cli =
            Cli::try_parse_from(["textnorm", "--non-deterministic", "tag", "dos", "--candidates"])
                .unwrap();
        assert!(cli.non_deterministic);
        assert!(matches!(
            cli.command,
            Commands::Tag { text: Some(ref t), candidates: true } if t == "dos"
        ));
    }
}
