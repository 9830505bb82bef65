//! Error types for schema extraction.
//!
//! Every [`ExtractError`] is fatal: a malformed table shape invalidates the
//! structural assertions the converter relies on, so there is no
//! partial-result recovery during extraction.

use thiserror::Error;

/// Error type for the extraction lifecycle.
///
/// Structural variants name the offending diagram node so the diagram
/// author can find the shape that does not follow the recognized table
/// convention.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid XML document: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("table cell labeled `{label}` has no id attribute")]
    MissingTableId { label: String },

    #[error("row cell in table `{table}` has no id attribute")]
    MissingRowId { table: String },

    #[error("cell `{id}` has no label")]
    MissingLabel { id: String },

    #[error("unexpected child count of {count} for row `{row}`")]
    UnexpectedRowShape { row: String, count: usize },
}
