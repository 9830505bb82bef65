//! Command-line argument definitions for the Mooring CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input path, the output path, the
//! configuration file, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Mooring converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input draw.io file
    #[arg(help = "Path to the input draw.io file")]
    pub input: String,

    /// Path to the output draw.io file; defaults to the input path with
    /// `_anchor` appended before the extension
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
