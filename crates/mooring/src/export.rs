//! draw.io markup rendering for the laid-out diagram.
//!
//! Every table contributes one container `mxCell` plus one row group per
//! rendered column: PK rows first (bold), then plain rows, then system
//! rows, each group preserving source column order. Relations become
//! `entityRelationEdgeStyle` edges with mandatory-one arrows at both ends.
//! The whole page is wrapped in the stock draw.io `mxfile` boilerplate.

use std::fmt::Write;

use mooring_core::schema::{Column, ColumnFlag, Table};

use crate::layout::{DiagramLayout, PlacedTable, Relation};

const DOCUMENT_PREFIX: &str = r#"<mxfile host="app.diagrams.net" version="26.1.1">
  <diagram name="Page-1" id="mooring-anchor-model">
    <mxGraphModel dx="2735" dy="1730" grid="1" gridSize="10" guides="1" tooltips="1" connect="1" arrows="1" fold="1" page="1" pageScale="1" pageWidth="1100" pageHeight="850" background="none" math="0" shadow="0">
      <root>
        <mxCell id="0" />
        <mxCell id="1" parent="0" />
"#;

const DOCUMENT_SUFFIX: &str = r#"      </root>
    </mxGraphModel>
  </diagram>
</mxfile>
"#;

/// Cell id of the row group holding one column, shared between layout
/// (relation endpoints) and rendering.
pub(crate) fn row_container_id(table: &Table, column: &Column) -> String {
    format!("{}_{}_container", table.name(), column.name())
}

/// Serialize the laid-out diagram into a complete draw.io document.
pub fn render(layout: &DiagramLayout) -> String {
    let mut out = String::new();
    out.push_str(DOCUMENT_PREFIX);
    for placed in layout.placements() {
        render_table(&mut out, placed);
    }
    for relation in layout.relations() {
        render_relation(&mut out, relation);
    }
    out.push_str(DOCUMENT_SUFFIX);
    out
}

fn render_table(out: &mut String, placed: &PlacedTable) {
    let table = placed.table();
    let name = escape_xml(table.name());

    let _ = write!(
        out,
        r#"        <mxCell id="{name}" value="{name}" style="shape=table;startSize=30;container=1;collapsible=1;childLayout=tableLayout;fixedRows=1;rowLines=0;fontStyle=1;align=center;resizeLast=1;html=1;" vertex="1" parent="1">
          <mxGeometry x="{x}" y="{y}" width="{width}" height="{height}" as="geometry" />
        </mxCell>
"#,
        x = placed.position().x(),
        y = placed.position().y(),
        width = table.width(),
        height = table.height(),
    );

    // Kind ordering is fixed regardless of source column order; source
    // order is preserved within each kind.
    for column in table.columns_with_flag(ColumnFlag::Pk) {
        render_key_row(out, table, column);
    }
    for column in table.columns_with_flag(ColumnFlag::None) {
        render_plain_row(out, table, column);
    }
    for column in table.columns_with_flag(ColumnFlag::Sys) {
        render_plain_row(out, table, column);
    }
}

/// A PK row: closed bottom border, bold flag and underlined-bold name.
fn render_key_row(out: &mut String, table: &Table, column: &Column) {
    let container = escape_xml(&row_container_id(table, column));
    let _ = write!(
        out,
        r#"        <mxCell id="{container}" value="" style="shape=tableRow;horizontal=0;startSize=0;swimlaneHead=0;swimlaneBody=0;fillColor=none;collapsible=0;dropTarget=0;points=[[0,0.5],[1,0.5]];portConstraint=eastwest;top=0;left=0;right=0;bottom=1;" vertex="1" parent="{table}">
          <mxGeometry y="30" width="180" height="30" as="geometry" />
        </mxCell>
        <mxCell id="{table}_{column}_flag" value="{flag}" style="shape=partialRectangle;connectable=0;fillColor=none;top=0;left=0;bottom=0;right=0;fontStyle=1;overflow=hidden;whiteSpace=wrap;html=1;" vertex="1" parent="{container}">
          <mxGeometry width="30" height="30" as="geometry">
            <mxRectangle width="30" height="30" as="alternateBounds" />
          </mxGeometry>
        </mxCell>
        <mxCell id="{table}_{column}_column" value="{column}" style="shape=partialRectangle;connectable=0;fillColor=none;top=0;left=0;bottom=0;right=0;align=left;spacingLeft=6;fontStyle=5;overflow=hidden;whiteSpace=wrap;html=1;" vertex="1" parent="{container}">
          <mxGeometry x="30" width="150" height="30" as="geometry">
            <mxRectangle width="150" height="30" as="alternateBounds" />
          </mxGeometry>
        </mxCell>
"#,
        table = escape_xml(table.name()),
        column = escape_xml(column.name()),
        flag = escape_xml(column.flag().as_str()),
    );
}

/// A plain or system row: open borders, regular text.
fn render_plain_row(out: &mut String, table: &Table, column: &Column) {
    let container = escape_xml(&row_container_id(table, column));
    let _ = write!(
        out,
        r#"        <mxCell id="{container}" value="" style="shape=tableRow;horizontal=0;startSize=0;swimlaneHead=0;swimlaneBody=0;fillColor=none;collapsible=0;dropTarget=0;points=[[0,0.5],[1,0.5]];portConstraint=eastwest;top=0;left=0;right=0;bottom=0;" vertex="1" parent="{table}">
          <mxGeometry y="60" width="180" height="30" as="geometry" />
        </mxCell>
        <mxCell id="{table}_{column}_flag" value="{flag}" style="shape=partialRectangle;connectable=0;fillColor=none;top=0;left=0;bottom=0;right=0;editable=1;overflow=hidden;whiteSpace=wrap;html=1;" vertex="1" parent="{container}">
          <mxGeometry width="30" height="30" as="geometry">
            <mxRectangle width="30" height="30" as="alternateBounds" />
          </mxGeometry>
        </mxCell>
        <mxCell id="{table}_{column}_column" value="{column}" style="shape=partialRectangle;connectable=0;fillColor=none;top=0;left=0;bottom=0;right=0;align=left;spacingLeft=6;overflow=hidden;whiteSpace=wrap;html=1;" vertex="1" parent="{container}">
          <mxGeometry x="30" width="150" height="30" as="geometry">
            <mxRectangle width="150" height="30" as="alternateBounds" />
          </mxGeometry>
        </mxCell>
"#,
        table = escape_xml(table.name()),
        column = escape_xml(column.name()),
        flag = escape_xml(column.flag().as_str()),
    );
}

fn render_relation(out: &mut String, relation: &Relation) {
    let source = escape_xml(relation.source());
    let target = escape_xml(relation.target());
    let _ = write!(
        out,
        r#"        <mxCell id="{source}_to_{target}" value="" style="edgeStyle=entityRelationEdgeStyle;fontSize=12;html=1;endArrow=ERmandOne;startArrow=ERmandOne;rounded=0;exitX=1;exitY=0.5;exitDx=0;exitDy=0;entryX=0;entryY=0.5;entryDx=0;entryDy=0;" edge="1" parent="1" source="{source}" target="{target}">
          <mxGeometry width="100" height="100" relative="1" as="geometry" />
        </mxCell>
"#,
    );
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::LayoutConfig, layout::layout};
    use mooring_core::schema::{AnchorKind, TableKind};

    fn rendered(tables: Vec<Table>) -> String {
        let layout = layout(&tables, &LayoutConfig::default()).unwrap();
        render(&layout)
    }

    fn anchor_customer() -> Table {
        Table::new(
            "a_customer",
            TableKind::Anchor(AnchorKind::Anchor),
            vec![
                Column::new(ColumnFlag::Pk, "customer_id"),
                Column::new(ColumnFlag::Sys, "source_id"),
                Column::new(ColumnFlag::Sys, "load_dttm"),
            ],
        )
    }

    #[test]
    fn test_document_wrapper_and_container_cell() {
        let out = rendered(vec![anchor_customer()]);

        assert!(out.starts_with("<mxfile"));
        assert!(out.trim_end().ends_with("</mxfile>"));
        assert!(out.contains(r#"<mxCell id="a_customer" value="a_customer""#));
        assert!(out.contains(r#"<mxGeometry x="50" y="100" width="180" height="113""#));
    }

    #[test]
    fn test_row_kind_ordering_overrides_source_order() {
        // Source order: plain, sys, PK. Rendered order must be PK, plain, sys.
        let table = Table::new(
            "r_customer_business_key",
            TableKind::Anchor(AnchorKind::Attribute),
            vec![
                Column::new(ColumnFlag::None, "customer_code"),
                Column::new(ColumnFlag::Sys, "source_id"),
                Column::new(ColumnFlag::Pk, "customer_id"),
            ],
        );
        let out = rendered(vec![anchor_customer(), table]);

        let pk = out
            .find("r_customer_business_key_customer_id_container")
            .unwrap();
        let plain = out
            .find("r_customer_business_key_customer_code_container")
            .unwrap();
        let sys = out
            .find("r_customer_business_key_source_id_container")
            .unwrap();
        assert!(pk < plain);
        assert!(plain < sys);
    }

    #[test]
    fn test_key_rows_are_bold() {
        let out = rendered(vec![anchor_customer()]);
        let key_cell_start = out.find(r#"id="a_customer_customer_id_column""#).unwrap();
        let key_cell = &out[key_cell_start..key_cell_start + 300];
        assert!(key_cell.contains("fontStyle=5"));
    }

    #[test]
    fn test_relation_edge_cell() {
        let attribute = Table::new(
            "r_customer_business_key",
            TableKind::Anchor(AnchorKind::Attribute),
            vec![
                Column::new(ColumnFlag::Pk, "customer_id"),
                Column::new(ColumnFlag::None, "customer_code"),
            ],
        );
        let out = rendered(vec![anchor_customer(), attribute]);

        assert!(out.contains(
            r#"id="a_customer_customer_id_container_to_r_customer_business_key_customer_id_container""#
        ));
        assert!(out.contains(r#"source="a_customer_customer_id_container""#));
        assert!(out.contains(r#"target="r_customer_business_key_customer_id_container""#));
        assert!(out.contains("endArrow=ERmandOne;startArrow=ERmandOne"));
    }

    #[test]
    fn test_labels_are_xml_escaped() {
        assert_eq!(escape_xml("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
        assert_eq!(escape_xml("plain_name"), "plain_name");
    }
}
