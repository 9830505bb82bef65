//! Deterministic placement and relation inference for converted tables.
//!
//! Layout runs two passes over the converted table list, in input order:
//!
//! 1. **Anchors** stack vertically along the left border. Each anchor
//!    records its PK cell id and a "next free x" cursor, both keyed by the
//!    PK column name.
//! 2. **Non-anchors**: every PK-flagged column yields one relation from
//!    the anchor owning that key name to this table's PK cell —
//!    connectivity is re-derived purely from key-name equality, not
//!    carried over from the input diagram. Attributes are placed at their
//!    key's x cursor (advancing it), ties are all parked at one fixed
//!    off-canvas point.
//!
//! The two accumulator maps are local to one [`layout`] call.

use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use mooring_core::{
    geometry::Point,
    schema::{AnchorKind, Column, ColumnFlag, Table, TableKind},
};

use crate::{config::LayoutConfig, export::row_container_id};

/// A converted table with its assigned canvas position.
#[derive(Debug, Clone)]
pub struct PlacedTable {
    table: Table,
    position: Point,
}

impl PlacedTable {
    fn new(table: Table, position: Point) -> Self {
        Self { table, position }
    }

    /// Borrow the placed table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Get the table's canvas position.
    pub fn position(&self) -> Point {
        self.position
    }
}

/// A directed edge from an anchor's PK cell to a dependent table's PK cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    source: String,
    target: String,
}

impl Relation {
    fn new(source: String, target: String) -> Self {
        Self { source, target }
    }

    /// Cell id of the owning anchor's PK row.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Cell id of the dependent table's PK row.
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// The fully laid-out diagram: positioned tables plus inferred relations.
#[derive(Debug)]
pub struct DiagramLayout {
    placements: Vec<PlacedTable>,
    relations: Vec<Relation>,
}

impl DiagramLayout {
    /// All placed tables, anchors first (in input order), then non-anchors.
    pub fn placements(&self) -> &[PlacedTable] {
        &self.placements
    }

    /// All inferred relations, in discovery order.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }
}

/// Layout invariant violations. All fatal.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("table `{table}` has not been converted yet: {kind}")]
    NotConverted { table: String, kind: String },

    #[error("anchor `{table}` must have exactly one PK column, found {count}")]
    AnchorKeyShape { table: String, count: usize },

    #[error("no anchor owns key `{key}` referenced by table `{table}`")]
    UnknownAnchorKey { table: String, key: String },

    #[error("attribute `{table}` has no PK column")]
    AttributeWithoutKey { table: String },
}

/// Assign canvas positions to every converted table and infer the relation
/// edges from shared key-column names.
///
/// # Errors
///
/// Returns [`LayoutError`] when a Data Vault table reaches layout, an
/// anchor has a malformed key shape, or a non-anchor references a key no
/// anchor owns.
pub fn layout(tables: &[Table], config: &LayoutConfig) -> Result<DiagramLayout, LayoutError> {
    let mut placements = Vec::new();

    // Pass 1: anchors. Both maps are keyed by PK column name.
    let mut anchor_pk_cells: IndexMap<String, String> = IndexMap::new();
    let mut x_cursors: IndexMap<String, Point> = IndexMap::new();

    let mut y_cursor = config.y_offset();
    for table in tables {
        let kind = anchor_kind(table)?;
        if kind != AnchorKind::Anchor {
            continue;
        }

        let pk = single_pk(table)?;
        anchor_pk_cells.insert(pk.name().to_string(), row_container_id(table, pk));

        let position = Point::new(config.x_offset(), y_cursor);
        debug!(table = table.name(), x = position.x(), y = position.y(); "Placed anchor");
        placements.push(PlacedTable::new(table.clone(), position));

        x_cursors.insert(
            pk.name().to_string(),
            Point::new(config.x_offset() + table.width() + config.x_offset(), y_cursor),
        );
        y_cursor += table.height() + config.y_offset();
    }

    // Pass 2: ties and attributes.
    let mut relations = Vec::new();
    for table in tables {
        let kind = anchor_kind(table)?;
        if kind == AnchorKind::Anchor {
            continue;
        }

        let pk_columns: Vec<&Column> = table.columns_with_flag(ColumnFlag::Pk).collect();
        for pk in &pk_columns {
            let source = anchor_pk_cells.get(pk.name()).ok_or_else(|| {
                LayoutError::UnknownAnchorKey {
                    table: table.name().to_string(),
                    key: pk.name().to_string(),
                }
            })?;
            relations.push(Relation::new(source.clone(), row_container_id(table, pk)));
        }

        match kind {
            AnchorKind::Attribute => {
                let key = pk_columns
                    .first()
                    .ok_or_else(|| LayoutError::AttributeWithoutKey {
                        table: table.name().to_string(),
                    })?;
                let cursor =
                    x_cursors
                        .get_mut(key.name())
                        .ok_or_else(|| LayoutError::UnknownAnchorKey {
                            table: table.name().to_string(),
                            key: key.name().to_string(),
                        })?;

                debug!(table = table.name(), x = cursor.x(), y = cursor.y(); "Placed attribute");
                placements.push(PlacedTable::new(table.clone(), *cursor));
                *cursor = cursor.with_x(cursor.x() + table.width() + config.x_offset());
            }
            AnchorKind::Tie => {
                placements.push(PlacedTable::new(table.clone(), config.tie_corner()));
            }
            AnchorKind::Anchor => unreachable!("anchors are placed in the first pass"),
        }
    }

    Ok(DiagramLayout {
        placements,
        relations,
    })
}

/// The table's Anchor kind, or an error for Data Vault tables, which may
/// not be laid out.
fn anchor_kind(table: &Table) -> Result<AnchorKind, LayoutError> {
    match table.kind() {
        TableKind::Anchor(kind) => Ok(kind),
        TableKind::Vault(_) => Err(LayoutError::NotConverted {
            table: table.name().to_string(),
            kind: table.kind().to_string(),
        }),
    }
}

/// The anchor's single PK column.
fn single_pk(table: &Table) -> Result<&Column, LayoutError> {
    let pks: Vec<&Column> = table.columns_with_flag(ColumnFlag::Pk).collect();
    match pks.as_slice() {
        [pk] => Ok(*pk),
        other => Err(LayoutError::AnchorKeyShape {
            table: table.name().to_string(),
            count: other.len(),
        }),
    }
}
