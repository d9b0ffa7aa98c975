//! textnorm - inverse text normalization with weighted finite-state grammars
//!
//! Tags spoken-form text into semiotic tokens, verbalizes them into written
//! form and exports the compiled grammars.

use clap::Parser;
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use libtextnorm::cli::commands;
use libtextnorm::cli::Cli;

fn main() {
    let filter = EnvFilter::try_from_env("TEXTNORM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        process::exit(1);
    }
}
