//! Schema model types for Data Vault and Anchor tables.
//!
//! This module contains the in-memory schema representation shared by the
//! whole conversion pipeline. Tables are read-only value objects: the
//! extractor constructs them once from the diagram tree, the converter maps
//! them to fresh Anchor-kind tables, and the emitter consumes the converted
//! list without mutating it.
//!
//! # Pipeline Position
//!
//! ```text
//! draw.io XML
//!     ↓ extract (mooring-parser)
//! Vec<Table> tagged with VaultKind
//!     ↓ convert (mooring)
//! Vec<Table> tagged with AnchorKind
//!     ↓ layout + export (mooring)
//! draw.io markup
//! ```

use std::fmt;

/// Names of the implicit audit columns appended to every generated table.
///
/// Columns with these names are forced to [`ColumnFlag::Sys`] during
/// extraction regardless of any flag text in the diagram.
pub const SYSTEM_COLUMN_NAMES: [&str; 2] = ["source_id", "load_dttm"];

/// Returns true if `name` belongs to the fixed system-column set.
pub fn is_system_column(name: &str) -> bool {
    SYSTEM_COLUMN_NAMES.contains(&name)
}

/// Builds the system column list appended to generated tables.
pub fn system_columns() -> Vec<Column> {
    SYSTEM_COLUMN_NAMES
        .iter()
        .map(|name| Column::new(ColumnFlag::Sys, *name))
        .collect()
}

/// Role marker for a table column.
///
/// `Pk` and `Fk` come from flag text in the diagram; `Sys` is forced for
/// members of [`SYSTEM_COLUMN_NAMES`]; everything else is `None` (a plain
/// descriptive attribute).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnFlag {
    /// Plain descriptive attribute (no flag text).
    #[default]
    None,
    /// Primary key.
    Pk,
    /// Foreign key.
    Fk,
    /// System metadata column.
    Sys,
}

impl ColumnFlag {
    /// Parses a row label into a flag, case-insensitively.
    ///
    /// Only the author-writable vocabulary is recognized: the empty string,
    /// `"FK"`, and `"PK"`. `Sys` is never written by diagram authors, so it
    /// is not part of the vocabulary. Returns `None` when the label is not
    /// a flag at all (it is then a column name).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_uppercase().as_str() {
            "" => Some(ColumnFlag::None),
            "FK" => Some(ColumnFlag::Fk),
            "PK" => Some(ColumnFlag::Pk),
            _ => None,
        }
    }

    /// Returns the flag text as rendered in the diagram.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnFlag::None => "",
            ColumnFlag::Pk => "PK",
            ColumnFlag::Fk => "FK",
            ColumnFlag::Sys => "SYS",
        }
    }
}

impl fmt::Display for ColumnFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single table column: a flag plus a non-empty name.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    flag: ColumnFlag,
    name: String,
}

impl Column {
    /// Create a new column.
    pub fn new(flag: ColumnFlag, name: impl Into<String>) -> Self {
        Self {
            flag,
            name: name.into(),
        }
    }

    /// Get the column's flag.
    pub fn flag(&self) -> ColumnFlag {
        self.flag
    }

    /// Get the column's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Data Vault table kinds, the input side of the conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultKind {
    Hub,
    Link,
    Satellite,
}

impl VaultKind {
    /// All Data Vault kinds, in extraction order.
    pub const ALL: [VaultKind; 3] = [VaultKind::Hub, VaultKind::Link, VaultKind::Satellite];

    /// One-character type code used as the table name prefix.
    pub fn code(self) -> char {
        match self {
            VaultKind::Hub => 'h',
            VaultKind::Link => 'l',
            VaultKind::Satellite => 's',
        }
    }

    /// Name prefix identifying tables of this kind in the diagram.
    pub fn prefix(self) -> &'static str {
        match self {
            VaultKind::Hub => "h_",
            VaultKind::Link => "l_",
            VaultKind::Satellite => "s_",
        }
    }
}

impl fmt::Display for VaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VaultKind::Hub => "hub",
            VaultKind::Link => "link",
            VaultKind::Satellite => "satellite",
        };
        write!(f, "{name}")
    }
}

/// Anchor Modeling table kinds, the output side of the conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    Anchor,
    Tie,
    Attribute,
}

impl AnchorKind {
    /// One-character type code used as the table name prefix.
    pub fn code(self) -> char {
        match self {
            AnchorKind::Anchor => 'a',
            AnchorKind::Tie => 't',
            AnchorKind::Attribute => 'r',
        }
    }
}

impl fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnchorKind::Anchor => "anchor",
            AnchorKind::Tie => "tie",
            AnchorKind::Attribute => "attribute",
        };
        write!(f, "{name}")
    }
}

/// Table kind tag: one of two disjoint variant sets.
///
/// Only `Vault` tables may be converted; only `Anchor` tables may be laid
/// out and emitted. Matching on this enum is exhaustive everywhere so a new
/// kind is a compile-time decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Vault(VaultKind),
    Anchor(AnchorKind),
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Vault(kind) => write!(f, "{kind}"),
            TableKind::Anchor(kind) => write!(f, "{kind}"),
        }
    }
}

/// A schema table: a prefixed name, a kind tag, and an ordered column list.
///
/// Tables are value objects and never mutated after construction. The name
/// always begins with a one-character type code (`h`/`l`/`s` on input,
/// `a`/`t`/`r` on output) followed by an underscore-joined descriptive
/// name; [`Table::stem`] exposes everything after the code.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    kind: TableKind,
    columns: Vec<Column>,
}

impl Table {
    /// Fixed rendered width of every table shape, in canvas units.
    pub const WIDTH: i32 = 180;

    /// Rendered height per column row, in canvas units.
    pub const ROW_HEIGHT: f64 = 37.5;

    /// Create a new table.
    pub fn new(name: impl Into<String>, kind: TableKind, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            kind,
            columns,
        }
    }

    /// Get the table name, including its type-code prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the table's kind tag.
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Borrow the ordered column list.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The descriptive part of the name: everything after the one-character
    /// type code, leading underscore included (`"h_customer"` → `"_customer"`).
    pub fn stem(&self) -> &str {
        &self.name[1..]
    }

    /// Rendered width of the table shape.
    pub fn width(&self) -> i32 {
        Self::WIDTH
    }

    /// Rendered height of the table shape, proportional to the column count.
    pub fn height(&self) -> i32 {
        (Self::ROW_HEIGHT * self.columns.len() as f64).ceil() as i32
    }

    /// Iterate over columns carrying the given flag, in source order.
    pub fn columns_with_flag(&self, flag: ColumnFlag) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(move |column| column.flag() == flag)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}
