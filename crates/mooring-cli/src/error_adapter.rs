//! Error adapter for converting MooringError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error
//! types and miette's rich diagnostic formatting used in the CLI. Mooring
//! errors carry no source-code spans (they name diagram nodes instead), so
//! the adapter contributes an error code and a help hint per pipeline
//! stage.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use mooring::MooringError;

/// Adapter wrapping a [`MooringError`] for rendering by miette.
pub struct ErrorAdapter<'a>(pub &'a MooringError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            MooringError::Io(_) => "mooring::io",
            MooringError::Extract(_) => "mooring::extract",
            MooringError::Convert(_) => "mooring::convert",
            MooringError::Layout(_) => "mooring::layout",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            MooringError::Extract(_) => {
                "check that every table shape follows the recognized convention: \
                 a labeled container whose rows hold a flag cell and a name cell"
            }
            MooringError::Convert(_) => {
                "check the key shape of the named table: hubs need exactly one PK \
                 and one plain column, satellites exactly one PK"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a [`MooringError`] into the list of reportable errors.
///
/// Mooring errors are always singular (there is no multi-diagnostic
/// stage), so the list holds exactly one adapter.
pub fn to_reportables(err: &MooringError) -> Vec<ErrorAdapter<'_>> {
    vec![ErrorAdapter(err)]
}
