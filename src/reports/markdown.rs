//! Markdown builder.

use super::escape::{escape_markdown_inline, escape_markdown_table};
use super::{DocumentBuilder, ReportError, ReportFormat, Table, TableCursor, TableRow};
use std::fmt::Write;

/// Markdown document builder.
///
/// Headings become ATX headings (`#` repeated `level` times, capped at six),
/// tables become pipe tables and label rows are written in bold in the first
/// column. Every cell is escaped so MLBOM content cannot break the table.
pub struct MarkdownBuilder {
    out: String,
    cursor: TableCursor,
}

impl MarkdownBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            out: String::new(),
            cursor: TableCursor::new(),
        }
    }

    fn write_table(&mut self, table: &Table) -> Result<(), ReportError> {
        let headers: Vec<String> = table
            .headers
            .iter()
            .map(|h| escape_markdown_table(h))
            .collect();
        writeln!(self.out, "| {} |", headers.join(" | "))?;
        writeln!(self.out, "|{}", "---|".repeat(table.column_count()))?;

        for row in &table.rows {
            let cells: Vec<String> = match row {
                TableRow::Cells(cells) => cells.iter().map(|c| escape_markdown_table(c)).collect(),
                TableRow::Label(label) => {
                    let mut cells = vec![format!("**{}**", escape_markdown_table(label))];
                    cells.resize(table.column_count(), String::new());
                    cells
                }
            };
            writeln!(self.out, "| {} |", cells.join(" | "))?;
        }
        self.out.push('\n');
        Ok(())
    }
}

impl Default for MarkdownBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder for MarkdownBuilder {
    fn heading(&mut self, level: u8, text: &str) -> Result<(), ReportError> {
        self.cursor.ensure_closed("heading")?;
        let hashes = "#".repeat(usize::from(level.clamp(1, 6)));
        writeln!(self.out, "{hashes} {}\n", escape_markdown_inline(text))?;
        Ok(())
    }

    fn paragraph(&mut self, text: &str) -> Result<(), ReportError> {
        self.cursor.ensure_closed("paragraph")?;
        if !text.is_empty() {
            writeln!(self.out, "{}", escape_markdown_inline(text))?;
        }
        self.out.push('\n');
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
        self.write_table(&table)
    }

    fn render(&self) -> Result<Vec<u8>, ReportError> {
        self.cursor.ensure_closed("render")?;
        Ok(self.out.clone().into_bytes())
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(builder: &MarkdownBuilder) -> String {
        String::from_utf8(builder.render().expect("render")).expect("utf8")
    }

    #[test]
    fn test_heading_levels() {
        let mut builder = MarkdownBuilder::new();
        builder.heading(1, "Model Details - resnet").expect("heading");
        builder.heading(2, "Performance Metrics").expect("heading");
        assert_eq!(
            rendered(&builder),
            "# Model Details - resnet\n\n## Performance Metrics\n\n"
        );
    }

    #[test]
    fn test_table_with_label_row() {
        let mut builder = MarkdownBuilder::new();
        builder.create_table(&["Parameter", "Value"], &[20, 35]).expect("create");
        builder.add_row(&["Properties"]).expect("label");
        builder.add_row(&["a|b", "c"]).expect("row");
        builder.show_table(&[5, 9]).expect("show");

        assert_eq!(
            rendered(&builder),
            "| Parameter | Value |\n|---|---|\n| **Properties** |  |\n| a\\|b | c |\n\n"
        );
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let mut builder = MarkdownBuilder::new();
        builder.create_table(&["Name", "Content"], &[]).expect("create");
        builder.show_table(&[]).expect("show");
        assert_eq!(rendered(&builder), "| Name | Content |\n|---|---|\n\n");
    }

    #[test]
    fn test_paragraph_inside_table_rejected() {
        let mut builder = MarkdownBuilder::new();
        builder.create_table(&["a"], &[]).expect("create");
        assert!(builder.paragraph("x").is_err());
    }
}
