//! CLI interface for libtextnorm
//!
//! Provides the `normalize`, `tag`, `verbalize` and `export` commands.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
