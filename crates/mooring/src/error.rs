//! Error types for Mooring operations.
//!
//! This module provides the main error type [`MooringError`] which wraps
//! the error conditions of the three pipeline stages plus file I/O. Every
//! variant is fatal: the pipeline writes either the full converted document
//! or nothing.

use std::io;

use thiserror::Error;

use mooring_parser::ExtractError;

use crate::{convert::ConvertError, layout::LayoutError};

/// The main error type for Mooring operations.
#[derive(Debug, Error)]
pub enum MooringError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("conversion error: {0}")]
    Convert(#[from] ConvertError),

    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}
