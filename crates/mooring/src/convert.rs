//! Data Vault to Anchor Modeling conversion rules.
//!
//! [`convert`] is a pure function from one Data Vault table to the list of
//! Anchor tables it becomes:
//!
//! - hub → one anchor plus one business-key attribute;
//! - link → one tie, columns carried through unchanged;
//! - satellite → one attribute per plain column.
//!
//! Names keep their descriptive part and only swap the one-character type
//! code (`h_customer` → `a_customer`). System columns are appended to every
//! generated table except ties, which pass their columns through as-is.

use log::debug;
use thiserror::Error;

use mooring_core::schema::{
    AnchorKind, Column, ColumnFlag, Table, TableKind, VaultKind, system_columns,
};

/// Conversion invariant violations. All fatal: they indicate either
/// malformed upstream data or misuse of the converter.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(
        "hub `{table}` must have exactly one PK and one plain column, \
         found {pk_count} PK and {plain_count} plain"
    )]
    HubKeyShape {
        table: String,
        pk_count: usize,
        plain_count: usize,
    },

    #[error("satellite `{table}` must have exactly one PK column, found {pk_count}")]
    SatelliteKeyShape { table: String, pk_count: usize },

    #[error("table `{table}` is already anchor kind: {kind}")]
    AlreadyConverted { table: String, kind: AnchorKind },
}

/// Convert one Data Vault table into its Anchor Modeling equivalent(s).
///
/// Pure and total over the three Data Vault kinds. Calling it on an
/// already-Anchor table is a contract violation and returns
/// [`ConvertError::AlreadyConverted`].
///
/// # Errors
///
/// Returns [`ConvertError`] when the table violates its key-shape
/// invariant or is not a Data Vault table.
pub fn convert(table: &Table) -> Result<Vec<Table>, ConvertError> {
    match table.kind() {
        TableKind::Vault(VaultKind::Hub) => convert_hub(table),
        TableKind::Vault(VaultKind::Link) => Ok(vec![convert_link(table)]),
        TableKind::Vault(VaultKind::Satellite) => convert_satellite(table),
        TableKind::Anchor(kind) => Err(ConvertError::AlreadyConverted {
            table: table.name().to_string(),
            kind,
        }),
    }
}

/// Rewrites the type-code prefix: `h_customer` → e.g. `a_customer`.
fn renamed(kind: AnchorKind, table: &Table) -> String {
    format!("{}{}", kind.code(), table.stem())
}

/// hub → [anchor, business-key attribute].
fn convert_hub(table: &Table) -> Result<Vec<Table>, ConvertError> {
    let pk: Vec<Column> = table.columns_with_flag(ColumnFlag::Pk).cloned().collect();
    let business_key: Vec<Column> = table.columns_with_flag(ColumnFlag::None).cloned().collect();
    if pk.len() != 1 || business_key.len() != 1 {
        return Err(ConvertError::HubKeyShape {
            table: table.name().to_string(),
            pk_count: pk.len(),
            plain_count: business_key.len(),
        });
    }

    let mut anchor_columns = pk.clone();
    anchor_columns.extend(system_columns());
    let anchor = Table::new(
        renamed(AnchorKind::Anchor, table),
        TableKind::Anchor(AnchorKind::Anchor),
        anchor_columns,
    );

    let mut attribute_columns = pk;
    attribute_columns.extend(business_key);
    attribute_columns.extend(system_columns());
    let attribute = Table::new(
        format!("{}_business_key", renamed(AnchorKind::Attribute, table)),
        TableKind::Anchor(AnchorKind::Attribute),
        attribute_columns,
    );

    Ok(vec![anchor, attribute])
}

/// link → [tie].
///
/// Links are assumed to already be structured as many-to-many tie tables
/// rather than transactional links, so no key synthesis is performed and
/// the original columns are carried through unchanged.
fn convert_link(table: &Table) -> Table {
    Table::new(
        renamed(AnchorKind::Tie, table),
        TableKind::Anchor(AnchorKind::Tie),
        table.columns().to_vec(),
    )
}

/// satellite → one attribute per plain column.
///
/// A satellite with zero plain columns legitimately produces zero tables.
fn convert_satellite(table: &Table) -> Result<Vec<Table>, ConvertError> {
    let pk: Vec<Column> = table.columns_with_flag(ColumnFlag::Pk).cloned().collect();
    if pk.len() != 1 {
        return Err(ConvertError::SatelliteKeyShape {
            table: table.name().to_string(),
            pk_count: pk.len(),
        });
    }

    let mut attributes = Vec::new();
    for column in table.columns() {
        if column.flag() != ColumnFlag::None {
            debug!(table = table.name(), column = column.name(), flag:% = column.flag();
                "Skipped non-plain column while splitting satellite");
            continue;
        }

        let mut columns = pk.clone();
        columns.push(column.clone());
        columns.extend(system_columns());
        attributes.push(Table::new(
            format!("{}_{}", renamed(AnchorKind::Attribute, table), column.name()),
            TableKind::Anchor(AnchorKind::Attribute),
            columns,
        ));
    }

    Ok(attributes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mooring_core::schema::SYSTEM_COLUMN_NAMES;

    fn hub() -> Table {
        Table::new(
            "h_customer",
            TableKind::Vault(VaultKind::Hub),
            vec![
                Column::new(ColumnFlag::Pk, "customer_id"),
                Column::new(ColumnFlag::None, "customer_code"),
                Column::new(ColumnFlag::Sys, "source_id"),
                Column::new(ColumnFlag::Sys, "load_dttm"),
            ],
        )
    }

    fn satellite() -> Table {
        Table::new(
            "s_customer_profile",
            TableKind::Vault(VaultKind::Satellite),
            vec![
                Column::new(ColumnFlag::Pk, "customer_id"),
                Column::new(ColumnFlag::None, "name"),
                Column::new(ColumnFlag::None, "email"),
                Column::new(ColumnFlag::Sys, "source_id"),
            ],
        )
    }

    fn column_names(table: &Table) -> Vec<&str> {
        table.columns().iter().map(Column::name).collect()
    }

    #[test]
    fn test_hub_becomes_anchor_and_business_key_attribute() {
        let tables = convert(&hub()).unwrap();
        assert_eq!(tables.len(), 2);

        let anchor = &tables[0];
        assert_eq!(anchor.name(), "a_customer");
        assert_eq!(anchor.kind(), TableKind::Anchor(AnchorKind::Anchor));
        assert_eq!(
            column_names(anchor),
            vec!["customer_id", "source_id", "load_dttm"]
        );

        let attribute = &tables[1];
        assert_eq!(attribute.name(), "r_customer_business_key");
        assert_eq!(attribute.kind(), TableKind::Anchor(AnchorKind::Attribute));
        assert_eq!(
            column_names(attribute),
            vec!["customer_id", "customer_code", "source_id", "load_dttm"]
        );
    }

    #[test]
    fn test_hub_without_business_key_fails() {
        let bad = Table::new(
            "h_customer",
            TableKind::Vault(VaultKind::Hub),
            vec![Column::new(ColumnFlag::Pk, "customer_id")],
        );
        let err = convert(&bad).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::HubKeyShape {
                pk_count: 1,
                plain_count: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_hub_with_two_pks_fails() {
        let bad = Table::new(
            "h_customer",
            TableKind::Vault(VaultKind::Hub),
            vec![
                Column::new(ColumnFlag::Pk, "customer_id"),
                Column::new(ColumnFlag::Pk, "customer_id_2"),
                Column::new(ColumnFlag::None, "customer_code"),
            ],
        );
        assert!(matches!(
            convert(&bad).unwrap_err(),
            ConvertError::HubKeyShape { pk_count: 2, .. }
        ));
    }

    #[test]
    fn test_link_passes_columns_through_unchanged() {
        let link = Table::new(
            "l_customer_order",
            TableKind::Vault(VaultKind::Link),
            vec![
                Column::new(ColumnFlag::Pk, "customer_id"),
                Column::new(ColumnFlag::Pk, "order_id"),
                Column::new(ColumnFlag::Sys, "load_dttm"),
            ],
        );
        let tables = convert(&link).unwrap();

        assert_eq!(tables.len(), 1);
        let tie = &tables[0];
        assert_eq!(tie.name(), "t_customer_order");
        assert_eq!(tie.kind(), TableKind::Anchor(AnchorKind::Tie));
        assert_eq!(tie.columns(), link.columns());
    }

    #[test]
    fn test_satellite_splits_into_one_attribute_per_plain_column() {
        let tables = convert(&satellite()).unwrap();
        assert_eq!(tables.len(), 2);

        let names: Vec<_> = tables.iter().map(Table::name).collect();
        assert_eq!(
            names,
            vec!["r_customer_profile_name", "r_customer_profile_email"]
        );

        for (table, own_column) in tables.iter().zip(["name", "email"]) {
            assert_eq!(table.kind(), TableKind::Anchor(AnchorKind::Attribute));
            let mut expected = vec!["customer_id", own_column];
            expected.extend(SYSTEM_COLUMN_NAMES);
            assert_eq!(column_names(table), expected);
        }
    }

    #[test]
    fn test_satellite_with_no_plain_columns_produces_nothing() {
        let bare = Table::new(
            "s_customer_audit",
            TableKind::Vault(VaultKind::Satellite),
            vec![
                Column::new(ColumnFlag::Pk, "customer_id"),
                Column::new(ColumnFlag::Sys, "load_dttm"),
            ],
        );
        assert!(convert(&bare).unwrap().is_empty());
    }

    #[test]
    fn test_satellite_without_pk_fails() {
        let bad = Table::new(
            "s_customer_profile",
            TableKind::Vault(VaultKind::Satellite),
            vec![Column::new(ColumnFlag::None, "name")],
        );
        assert!(matches!(
            convert(&bad).unwrap_err(),
            ConvertError::SatelliteKeyShape { pk_count: 0, .. }
        ));
    }

    #[test]
    fn test_converting_an_anchor_table_is_rejected() {
        let anchor = Table::new(
            "a_customer",
            TableKind::Anchor(AnchorKind::Anchor),
            vec![Column::new(ColumnFlag::Pk, "customer_id")],
        );
        assert!(matches!(
            convert(&anchor).unwrap_err(),
            ConvertError::AlreadyConverted {
                kind: AnchorKind::Anchor,
                ..
            }
        ));
    }
}
