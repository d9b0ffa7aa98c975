//! CLI command implementations

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::config::NormalizerConfig;
use crate::pipeline::{Normalizer, Tagging};
use crate::serialization::{export_grammars, ArchiveFormat};

use super::args::{Cli, Commands};

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let normalizer = Normalizer::new(config).context("failed to build grammars")?;

    match cli.command {
        Commands::Normalize { text, candidates } => {
            for_each_line(text, |line| cmd_normalize(&normalizer, line, candidates))
        }
        Commands::Tag { text, candidates } => {
            for_each_line(text, |line| cmd_tag(&normalizer, line, candidates))
        }
        Commands::Verbalize { tagged } => for_each_line(tagged, |line| {
            Ok(vec![normalizer
                .verbalize(line)
                .with_context(|| format!("failed to verbalize '{line}'"))?])
        }),
        Commands::Export { output_dir, format } => {
            cmd_export(&normalizer, &output_dir, format.into())
        }
    }
}

/// Resolve the configuration from the file and the global flags.
fn load_config(cli: &Cli) -> Result<NormalizerConfig> {
    let mut config = match &cli.config {
        Some(path) => NormalizerConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => NormalizerConfig::default(),
    };
    if let Some(input_case) = cli.input_case {
        config.input_case = input_case.into();
    }
    if cli.non_deterministic {
        config.deterministic = false;
    }
    config.validate()?;
    Ok(config)
}

/// Run `process` on `text`, or on every stdin line when `text` is absent.
fn for_each_line<F>(text: Option<String>, mut process: F) -> Result<()>
where
    F: FnMut(&str) -> Result<Vec<String>>,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(text) = text {
        for output in process(&text)? {
            writeln!(out, "{output}")?;
        }
        return Ok(());
    }

    let stdin = io::stdin();
    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line.context("failed to read stdin")?;
        let outputs = process(&line).with_context(|| format!("line {}", index + 1))?;
        for output in outputs {
            writeln!(out, "{output}")?;
        }
    }
    Ok(())
}

/// Normalize command
fn cmd_normalize(normalizer: &Normalizer, line: &str, candidates: bool) -> Result<Vec<String>> {
    if candidates {
        Ok(normalizer.normalize_candidates(line)?)
    } else {
        Ok(vec![normalizer.normalize(line)?])
    }
}

/// Tag command
fn cmd_tag(normalizer: &Normalizer, line: &str, candidates: bool) -> Result<Vec<String>> {
    match normalizer.classify_and_tag(line, !candidates)? {
        Tagging::Single(tagged) => Ok(vec![tagged]),
        Tagging::Candidates(tagged) => Ok(tagged
            .into_iter()
            .enumerate()
            .map(|(rank, t)| format!("{}. {}", (rank + 1).to_string().cyan(), t))
            .collect()),
    }
}

/// Export command
fn cmd_export(normalizer: &Normalizer, output_dir: &Path, format: ArchiveFormat) -> Result<()> {
    let written = export_grammars(normalizer, output_dir, format)
        .with_context(|| format!("failed to export grammars to {}", output_dir.display()))?;

    println!("{}", "Exported grammars".bold().underline());
    println!();
    for path in &written {
        println!("  {}", path.display().to_string().green());
    }
    println!();
    println!("{} archive(s) written as {}", written.len(), format);
    Ok(())
}
