//! A builder that records drawing operations instead of rendering them.

use super::{DocumentBuilder, ReportError, ReportFormat, Table, TableCursor};
use crate::pipeline::OutputTarget;
use serde::Serialize;

/// A single drawing operation, as issued by the assembler
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    CreateTable { headers: Vec<String>, width_hints: Vec<u16> },
    AddRow { cells: Vec<String> },
    ShowTable { widths: Vec<u16> },
}

/// Records every call so the operation sequence can be inspected.
///
/// Enforces the same table nesting rules as the rendering builders.
/// Rendering produces the operation list as JSON, one operation per line.
#[derive(Debug, Default)]
pub struct RecordingBuilder {
    ops: Vec<DrawOp>,
    tables: Vec<Table>,
    cursor: TableCursor,
    published: Vec<Option<String>>,
}

impl RecordingBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations recorded so far, excluding `publish`
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Tables shown so far, in order
    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Heading texts in emission order
    #[must_use]
    pub fn headings(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Heading { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Destinations passed to `publish`; `None` stands for standard output
    #[must_use]
    pub fn published(&self) -> &[Option<String>] {
        &self.published
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl DocumentBuilder for RecordingBuilder {
    fn heading(&mut self, level: u8, text: &str) -> Result<(), ReportError> {
        self.cursor.ensure_closed("heading")?;
        self.ops.push(DrawOp::Heading {
            level,
            text: text.to_string(),
        });
        Ok(())
    }

    fn paragraph(&mut self, text: &str) -> Result<(), ReportError> {
        self.cursor.ensure_closed("paragraph")?;
        self.ops.push(DrawOp::Paragraph {
            text: text.to_string(),
        });
        Ok(())
    }

    fn create_table(&mut self, headers: &[&str], width_hints: &[u16]) -> Result<(), ReportError> {
        self.cursor.open(headers, width_hints)?;
        self.ops.push(DrawOp::CreateTable {
            headers: owned(headers),
            width_hints: width_hints.to_vec(),
        });
        Ok(())
    }

    fn add_row(&mut self, cells: &[&str]) -> Result<(), ReportError> {
        self.cursor.push_row(cells)?;
        self.ops.push(DrawOp::AddRow {
            cells: owned(cells),
        });
        Ok(())
    }

    fn show_table(&mut self, widths: &[u16]) -> Result<(), ReportError> {
        let table = self.cursor.close(widths)?;
        self.tables.push(table);
        self.ops.push(DrawOp::ShowTable {
            widths: widths.to_vec(),
        });
        Ok(())
    }

    fn render(&self) -> Result<Vec<u8>, ReportError> {
        self.cursor.ensure_closed("render")?;
        let mut out = Vec::new();
        for op in &self.ops {
            serde_json::to_writer(&mut out, op)?;
            out.push(b'\n');
        }
        Ok(out)
    }

    /// Records the destination without writing anything.
    fn publish(&mut self, target: &OutputTarget) -> Result<(), ReportError> {
        self.cursor.ensure_closed("publish")?;
        self.published.push(match target {
            OutputTarget::Stdout => None,
            OutputTarget::File(path) => Some(path.display().to_string()),
        });
        Ok(())
    }

    /// Operations are rendered as JSON lines.
    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
