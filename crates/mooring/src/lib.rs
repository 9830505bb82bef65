//! Mooring - converts draw.io Data Vault schemas into Anchor Modeling diagrams.
//!
//! Extraction, conversion, layout, and markup rendering for Data Vault
//! diagrams: hubs, links, and satellites drawn as table shapes become
//! anchors, ties, and attributes in a freshly laid-out draw.io document.

pub mod config;

mod convert;
mod error;
mod export;
mod layout;

pub use mooring_core::{geometry, schema};

pub use convert::{ConvertError, convert};
pub use error::MooringError;
pub use layout::{DiagramLayout, LayoutError, PlacedTable, Relation};

use log::{debug, info, trace};

use config::AppConfig;
use schema::Table;

/// Builder for processing Data Vault diagrams through the Mooring pipeline.
///
/// # Examples
///
/// ```rust,no_run
/// use mooring::{ModelBuilder, config::AppConfig};
///
/// let source = std::fs::read_to_string("vault.xml").unwrap();
///
/// let builder = ModelBuilder::new(AppConfig::default());
/// let tables = builder.extract(&source).expect("Failed to extract");
/// let converted = builder.convert_all(&tables).expect("Failed to convert");
/// let markup = builder.render_drawio(&converted).expect("Failed to render");
/// ```
#[derive(Default)]
pub struct ModelBuilder {
    config: AppConfig,
}

impl ModelBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Extract the Data Vault table list from a draw.io document.
    ///
    /// # Errors
    ///
    /// Returns `MooringError` for invalid XML or malformed table shapes.
    pub fn extract(&self, source: &str) -> Result<Vec<Table>, MooringError> {
        info!("Extracting Data Vault schema");
        let tables = mooring_parser::parse_document(source)?;
        debug!(count = tables.len(); "Schema extracted");
        Ok(tables)
    }

    /// Convert every Data Vault table and flatten the results, preserving
    /// input table order.
    ///
    /// # Errors
    ///
    /// Returns `MooringError` when a table violates its key-shape
    /// invariant or is already an Anchor table.
    pub fn convert_all(&self, tables: &[Table]) -> Result<Vec<Table>, MooringError> {
        let mut converted = Vec::new();
        for table in tables {
            let outputs = convert::convert(table)?;
            info!(table = table.name(), outputs = outputs.len(); "Converted table");
            trace!(outputs:? = outputs; "Conversion outputs");
            converted.extend(outputs);
        }
        Ok(converted)
    }

    /// Lay out the converted tables and render the output draw.io document.
    ///
    /// # Errors
    ///
    /// Returns `MooringError` when layout invariants are violated (a table
    /// that was never converted, or a key no anchor owns).
    pub fn render_drawio(&self, tables: &[Table]) -> Result<String, MooringError> {
        info!("Calculating layout");
        let diagram = layout::layout(tables, self.config.layout())?;
        info!(
            placements = diagram.placements().len(),
            relations = diagram.relations().len();
            "Layout calculated"
        );
        Ok(export::render(&diagram))
    }
}
