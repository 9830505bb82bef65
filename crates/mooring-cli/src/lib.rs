//! CLI logic for the Mooring converter.
//!
//! This module contains the core CLI logic for the Mooring converter.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{ffi::OsStr, fs, path::Path};

use log::info;

use mooring::{ModelBuilder, MooringError};

/// Run the Mooring CLI application
///
/// This function processes the input diagram through the Mooring pipeline
/// and writes the resulting draw.io document to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `MooringError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Extraction errors
/// - Conversion errors
/// - Layout errors
pub fn run(args: &Args) -> Result<(), MooringError> {
    info!(input_path = args.input; "Processing diagram");

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Process the diagram using the ModelBuilder API
    let builder = ModelBuilder::new(app_config);
    let tables = builder.extract(&source)?;
    let converted = builder.convert_all(&tables)?;
    let markup = builder.render_drawio(&converted)?;

    // Write output file
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| derive_output_path(&args.input));
    fs::write(&output, markup)?;

    info!(output_file = output, table_count = converted.len(); "Converted model exported");

    Ok(())
}

/// Derive the default output path: `_anchor` appended to the input's file
/// stem, extension preserved (`vault.xml` → `vault_anchor.xml`).
pub fn derive_output_path(input: &str) -> String {
    let path = Path::new(input);
    let stem = path
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or_default();
    let file_name = match path.extension().and_then(OsStr::to_str) {
        Some(extension) => format!("{stem}_anchor.{extension}"),
        None => format!("{stem}_anchor"),
    };
    path.with_file_name(file_name).to_string_lossy().into_owned()
}
