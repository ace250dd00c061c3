//! JSON builder: the document as an ordered list of typed blocks.

use super::{DocumentBuilder, ReportError, ReportFormat, Table, TableCursor, TableRow};
use indexmap::IndexMap;
use serde::Serialize;

/// JSON document builder
pub struct JsonBuilder {
    title: String,
    blocks: Vec<Block>,
    cursor: TableCursor,
    /// Pretty print output
    pretty: bool,
}

impl JsonBuilder {
    /// Create a new JSON builder with the document title
    #[must_use]
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            blocks: Vec::new(),
            cursor: TableCursor::new(),
            pretty: true,
        }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl DocumentBuilder for JsonBuilder {
    fn heading(&mut self, level: u8, text: &str) -> Result<(), ReportError> {
        self.cursor.ensure_closed("heading")?;
        self.blocks.push(Block::Heading {
            level,
            text: text.to_string(),
        });
        Ok(())
    }

    fn paragraph(&mut self, text: &str) -> Result<(), ReportError> {
        self.cursor.ensure_closed("paragraph")?;
        self.blocks.push(Block::Paragraph {
            text: text.to_string(),
        });
        Ok(())
    }

    fn create_table(&mut self, headers: &[&str], width_hints: &[u16]) -> Result<(), ReportError> {
        self.cursor.open(headers, width_hints)
    }

    fn add_row(&mut self, cells: &[&str]) -> Result<(), ReportError> {
        self.cursor.push_row(cells)
    }

    fn show_table(&mut self, widths: &[u16]) -> Result<(), ReportError> {
        let table = self.cursor.close(widths)?;
        self.blocks.push(Block::from_table(table));
        Ok(())
    }

    fn render(&self) -> Result<Vec<u8>, ReportError> {
        self.cursor.ensure_closed("render")?;
        let document = JsonDocument {
            title: &self.title,
            generator: concat!("mlbom-doc ", env!("CARGO_PKG_VERSION")),
            content: &self.blocks,
        };
        let mut out = if self.pretty {
            serde_json::to_vec_pretty(&document)?
        } else {
            serde_json::to_vec(&document)?
        };
        out.push(b'\n');
        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// ============================================================================
// JSON Structures
// ============================================================================

#[derive(Serialize)]
struct JsonDocument<'a> {
    title: &'a str,
    generator: &'static str,
    content: &'a [Block],
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Block {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph {
        text: String,
    },
    Table {
        headers: Vec<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        widths: Vec<u16>,
        rows: Vec<JsonRow>,
    },
}

impl Block {
    fn from_table(table: Table) -> Self {
        let widths = table
            .column_weights()
            .into_iter()
            .map(|w| u16::try_from(w).unwrap_or(u16::MAX))
            .collect();
        let rows = table
            .rows
            .into_iter()
            .map(|row| match row {
                TableRow::Cells(cells) => {
                    JsonRow::Cells(table.headers.iter().cloned().zip(cells).collect())
                }
                TableRow::Label(label) => JsonRow::Label { label },
            })
            .collect();
        Self::Table {
            headers: table.headers,
            widths,
            rows,
        }
    }
}

/// A row keyed by column header, or a spanning label
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum JsonRow {
    Cells(IndexMap<String, String>),
    Label { label: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn rendered(builder: &JsonBuilder) -> Value {
        serde_json::from_slice(&builder.render().expect("render")).expect("valid json")
    }

    #[test]
    fn test_document_envelope() {
        let mut builder = JsonBuilder::new("MLBOM Summary");
        builder.heading(1, "MLBOM Summary").expect("heading");
        let doc = rendered(&builder);
        assert_eq!(doc["title"], "MLBOM Summary");
        assert!(doc["generator"]
            .as_str()
            .is_some_and(|g| g.starts_with("mlbom-doc ")));
        assert_eq!(doc["content"][0]["type"], "heading");
        assert_eq!(doc["content"][0]["level"], 1);
    }

    #[test]
    fn test_rows_keyed_by_header_in_order() {
        let mut builder = JsonBuilder::new("t");
        builder.create_table(&["Parameter", "Value"], &[20, 35]).expect("create");
        builder.add_row(&["Properties"]).expect("label");
        builder.add_row(&["epochs", "10"]).expect("row");
        builder.show_table(&[5, 9]).expect("show");

        let doc = rendered(&builder);
        let table = &doc["content"][0];
        assert_eq!(table["type"], "table");
        assert_eq!(table["widths"], serde_json::json!([5, 9]));
        assert_eq!(table["rows"][0], serde_json::json!({"label": "Properties"}));
        assert_eq!(
            table["rows"][1],
            serde_json::json!({"Parameter": "epochs", "Value": "10"})
        );
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut builder = JsonBuilder::new("t").pretty(false);
        builder.paragraph("").expect("paragraph");
        let first = builder.render().expect("render");
        assert_eq!(first, builder.render().expect("render"));
    }
}
