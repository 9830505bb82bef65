//! Schema extraction for the Mooring converter.
//!
//! This crate reconstructs typed [`Table`]s from a loosely-structured
//! draw.io diagram tree. A Data Vault table is drawn as a container
//! `mxCell` whose label carries the kind prefix (`h_`, `l_`, `s_`); each
//! direct child cell is one column row, and each row holds one or two
//! label cells (flag text and column name).
//!
//! Extraction is strict: missing identifiers, missing labels, and rows
//! with unexpected child counts abort the whole run, since a malformed
//! table invalidates the key-shape assertions downstream.

pub mod error;

pub use error::ExtractError;

use log::{info, warn};
use roxmltree::{Document, Node};

use mooring_core::schema::{Column, ColumnFlag, Table, TableKind, VaultKind, is_system_column};

/// Parse a draw.io document into the full Data Vault table list.
///
/// Runs [`find_tables`] and [`parse_table`] for each [`VaultKind`] in
/// extraction order (hubs, links, satellites).
///
/// # Errors
///
/// Returns [`ExtractError`] for invalid XML or any table shape that does
/// not follow the recognized convention.
pub fn parse_document(source: &str) -> Result<Vec<Table>, ExtractError> {
    let doc = Document::parse(source)?;

    let mut tables = Vec::new();
    for kind in VaultKind::ALL {
        for cell in find_tables(&doc, kind) {
            tables.push(parse_table(&doc, cell, kind)?);
        }
    }

    info!(count = tables.len(); "Extracted Data Vault tables");
    Ok(tables)
}

/// Find every candidate table-container cell for one Data Vault kind.
///
/// A candidate is any `mxCell` whose label starts with the kind's prefix
/// (for example `h_` for hubs).
pub fn find_tables<'a, 'input>(doc: &'a Document<'input>, kind: VaultKind) -> Vec<Node<'a, 'input>> {
    let found: Vec<_> = doc
        .descendants()
        .filter(|node| node.has_tag_name("mxCell"))
        .filter(|node| {
            node.attribute("value")
                .is_some_and(|value| value.starts_with(kind.prefix()))
        })
        .collect();

    let labels = found
        .iter()
        .map(|node| node.attribute("value").unwrap_or("`name not found`"))
        .collect::<Vec<_>>()
        .join("; ");
    info!(kind:% = kind, tables = labels; "Found table group");

    found
}

/// Reconstruct one [`Table`] from its container cell.
///
/// Each direct child of the container is a column row; each row's own
/// children hold the flag text and the column name. A row with one child
/// has no flag text. A row with two children is disambiguated by matching
/// either label, case-insensitively, against the flag vocabulary
/// (`""`, `FK`, `PK`); when neither or both labels match, the first label
/// wins the flag slot (an unrecognized first label degrades to a plain
/// flag, since `SYS` is never author-written). Any other child count is a
/// fatal structural error naming the row.
///
/// Column names in the system set are forced to [`ColumnFlag::Sys`]
/// regardless of any flag text found in the diagram.
///
/// # Errors
///
/// Returns [`ExtractError`] when the container or one of its rows is
/// missing an id or label, or a row has an unexpected child count.
pub fn parse_table<'a, 'input>(
    doc: &'a Document<'input>,
    cell: Node<'a, 'input>,
    kind: VaultKind,
) -> Result<Table, ExtractError> {
    let table_name = cell.attribute("value").ok_or_else(|| ExtractError::MissingLabel {
        id: cell.attribute("id").unwrap_or("?").to_string(),
    })?;
    let table_id = cell.attribute("id").ok_or_else(|| ExtractError::MissingTableId {
        label: table_name.to_string(),
    })?;

    let mut columns = Vec::new();
    for row in child_cells(doc, table_id) {
        let row_id = row.attribute("id").ok_or_else(|| ExtractError::MissingRowId {
            table: table_name.to_string(),
        })?;

        let innards: Vec<_> = child_cells(doc, row_id).collect();
        let (flag, name) = match innards.as_slice() {
            [only] => {
                let name = only.attribute("value").unwrap_or("");
                (ColumnFlag::None, name.to_string())
            }
            [first, second] => disambiguate_row(
                first.attribute("value").unwrap_or(""),
                second.attribute("value").unwrap_or(""),
                row_id,
            ),
            other => {
                return Err(ExtractError::UnexpectedRowShape {
                    row: row_id.to_string(),
                    count: other.len(),
                });
            }
        };

        if name.is_empty() {
            return Err(ExtractError::MissingLabel {
                id: row_id.to_string(),
            });
        }

        let flag = if is_system_column(&name) {
            ColumnFlag::Sys
        } else {
            flag
        };

        info!(table = table_name, flag:% = flag, column = name; "Found column");
        columns.push(Column::new(flag, name));
    }

    Ok(Table::new(table_name, TableKind::Vault(kind), columns))
}

/// All `mxCell` nodes whose `parent` attribute is `parent_id`, in document
/// order.
fn child_cells<'a, 'input>(
    doc: &'a Document<'input>,
    parent_id: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    doc.descendants()
        .filter(|node| node.has_tag_name("mxCell"))
        .filter(move |node| node.attribute("parent") == Some(parent_id))
}

/// Split a two-label row into (flag, name).
///
/// Whichever label matches the flag vocabulary is the flag and the other
/// is the name, independent of left/right order. Ambiguous rows (both or
/// neither matching) resolve to the first label as the flag.
fn disambiguate_row(first: &str, second: &str, row_id: &str) -> (ColumnFlag, String) {
    match (ColumnFlag::from_label(first), ColumnFlag::from_label(second)) {
        (Some(flag), None) => (flag, second.to_string()),
        (None, Some(flag)) => (flag, first.to_string()),
        (Some(flag), Some(_)) => {
            warn!(row = row_id, first = first, second = second;
                "Both row labels match the flag vocabulary; first label wins as flag");
            (flag, second.to_string())
        }
        (None, None) => {
            warn!(row = row_id, first = first, second = second;
                "Neither row label matches the flag vocabulary; first label wins as flag");
            (ColumnFlag::None, second.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pk_label_first() {
        let (flag, name) = disambiguate_row("PK", "customer_id", "r1");
        assert_eq!(flag, ColumnFlag::Pk);
        assert_eq!(name, "customer_id");
    }

    #[test]
    fn test_pk_label_second() {
        let (flag, name) = disambiguate_row("customer_id", "pk", "r1");
        assert_eq!(flag, ColumnFlag::Pk);
        assert_eq!(name, "customer_id");
    }

    #[test]
    fn test_empty_flag_label() {
        let (flag, name) = disambiguate_row("", "customer_code", "r1");
        assert_eq!(flag, ColumnFlag::None);
        assert_eq!(name, "customer_code");
    }

    #[test]
    fn test_two_labels_both_matching_first_wins_as_flag() {
        let (flag, name) = disambiguate_row("PK", "FK", "r1");
        assert_eq!(flag, ColumnFlag::Pk);
        assert_eq!(name, "FK");
    }

    #[test]
    fn test_two_labels_neither_matching_first_wins_as_flag() {
        // The first label occupies the flag slot; unrecognized flag text
        // degrades to a plain flag rather than failing.
        let (flag, name) = disambiguate_row("id", "customer_id", "r1");
        assert_eq!(flag, ColumnFlag::None);
        assert_eq!(name, "customer_id");
    }
}
