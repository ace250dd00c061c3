//! Console builder: aligned, boxed text tables for terminal output.

use super::escape::sanitize_terminal;
use super::{DocumentBuilder, ReportError, ReportFormat, Table, TableCursor, TableRow};
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

/// Apply ANSI bold if colored output is enabled.
fn bold(text: &str, colored: bool) -> String {
    if colored {
        format!("\x1b[1m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

/// Pad `text` with spaces to `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

/// Builds a plain-text document for the terminal.
///
/// Width hints act as minimum column widths; a column grows to fit its
/// widest cell. Widths are measured in display columns, so wide characters
/// stay aligned.
pub struct ConsoleBuilder {
    colored: bool,
    out: String,
    cursor: TableCursor,
}

impl ConsoleBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            colored: true,
            out: String::new(),
            cursor: TableCursor::new(),
        }
    }

    /// Disable ANSI styling
    #[must_use]
    pub fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn separate(&mut self) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
    }

    fn write_table(&mut self, table: &Table) -> Result<(), ReportError> {
        let headers: Vec<String> = table.headers.iter().map(|h| sanitize_terminal(h)).collect();
        let rows: Vec<TableRow> = table
            .rows
            .iter()
            .map(|row| match row {
                TableRow::Cells(cells) => {
                    TableRow::Cells(cells.iter().map(|c| sanitize_terminal(c)).collect())
                }
                TableRow::Label(label) => TableRow::Label(sanitize_terminal(label)),
            })
            .collect();

        let mut widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(col, header)| header.width().max(table.width_hint(col).unwrap_or(0)))
            .collect();
        for row in &rows {
            if let TableRow::Cells(cells) = row {
                for (width, cell) in widths.iter_mut().zip(cells) {
                    *width = (*width).max(cell.width());
                }
            }
        }

        // A label spans every column plus the separators between them
        let mut span = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
        for row in &rows {
            if let TableRow::Label(label) = row {
                if label.width() > span {
                    if let Some(last) = widths.last_mut() {
                        *last += label.width() - span;
                    }
                    span = label.width();
                }
            }
        }

        let rule = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{left}{}{right}\n", segments.join(mid))
        };

        self.out.push_str(&rule("┌", "┬", "┐"));
        let header_cells: Vec<String> = headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| bold(&pad(h, *w), self.colored))
            .collect();
        writeln!(self.out, "│ {} │", header_cells.join(" │ "))?;
        self.out.push_str(&rule("├", "┼", "┤"));

        for row in &rows {
            match row {
                TableRow::Cells(cells) => {
                    let cells: Vec<String> =
                        cells.iter().zip(&widths).map(|(c, w)| pad(c, *w)).collect();
                    writeln!(self.out, "│ {} │", cells.join(" │ "))?;
                }
                TableRow::Label(label) => {
                    let label = bold(&pad(label, span), self.colored);
                    writeln!(self.out, "│ {label} │")?;
                }
            }
        }
        self.out.push_str(&rule("└", "┴", "┘"));
        Ok(())
    }
}

impl Default for ConsoleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder for ConsoleBuilder {
    fn heading(&mut self, level: u8, text: &str) -> Result<(), ReportError> {
        self.cursor.ensure_closed("heading")?;
        self.separate();
        let text = sanitize_terminal(text);
        let underline = if level <= 1 { "=" } else { "-" };
        writeln!(self.out, "{}", bold(&text, self.colored))?;
        writeln!(self.out, "{}", underline.repeat(text.width()))?;
        Ok(())
    }

    fn paragraph(&mut self, text: &str) -> Result<(), ReportError> {
        self.cursor.ensure_closed("paragraph")?;
        writeln!(self.out, "{}", sanitize_terminal(text))?;
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
        ReportFormat::Console
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(builder: &ConsoleBuilder) -> String {
        String::from_utf8(builder.render().expect("render")).expect("utf8")
    }

    #[test]
    fn test_heading_underlined() {
        let mut builder = ConsoleBuilder::new().no_color();
        builder.heading(1, "MLBOM Summary").expect("heading");
        builder.heading(2, "Graphics").expect("heading");
        assert_eq!(
            rendered(&builder),
            "MLBOM Summary\n=============\n\nGraphics\n--------\n"
        );
    }

    #[test]
    fn test_table_columns_aligned() {
        let mut builder = ConsoleBuilder::new().no_color();
        builder.create_table(&["Item", "Value"], &[6, 0]).expect("create");
        builder.add_row(&["Version", "1.0"]).expect("row");
        builder.add_row(&["Supplier", "Acme Corp"]).expect("row");
        builder.show_table(&[5, 9]).expect("show");

        let text = rendered(&builder);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "│ Item     │ Value     │");
        assert_eq!(lines[3], "│ Version  │ 1.0       │");
        assert_eq!(lines[4], "│ Supplier │ Acme Corp │");
        let width = lines[0].width();
        assert!(lines.iter().all(|line| line.width() == width));
    }

    #[test]
    fn test_hint_is_minimum_width() {
        let mut builder = ConsoleBuilder::new().no_color();
        builder.create_table(&["A"], &[10]).expect("create");
        builder.add_row(&["x"]).expect("row");
        builder.show_table(&[]).expect("show");
        let text = rendered(&builder);
        assert!(text.contains("│ x          │"));
    }

    #[test]
    fn test_label_row_spans_table() {
        let mut builder = ConsoleBuilder::new().no_color();
        builder.create_table(&["Parameter", "Value"], &[]).expect("create");
        builder.add_row(&["Properties"]).expect("label");
        builder.add_row(&["k", "v"]).expect("row");
        builder.show_table(&[5, 9]).expect("show");
        let text = rendered(&builder);
        let width = text.lines().next().expect("line").width();
        assert!(text.lines().all(|line| line.width() == width));
        assert!(text.contains("│ Properties"));
    }

    #[test]
    fn test_color_adds_bold() {
        let mut builder = ConsoleBuilder::new();
        builder.heading(1, "Title").expect("heading");
        assert!(rendered(&builder).starts_with("\x1b[1mTitle\x1b[0m"));
    }

    #[test]
    fn test_control_characters_stripped() {
        let mut builder = ConsoleBuilder::new().no_color();
        builder.paragraph("evil\x1b[2Jtext").expect("paragraph");
        assert_eq!(rendered(&builder), "evil[2Jtext\n");
    }

    #[test]
    fn test_render_with_open_table_fails() {
        let mut builder = ConsoleBuilder::new();
        builder.create_table(&["a"], &[]).expect("create");
        assert!(matches!(
            builder.render(),
            Err(ReportError::TableStateError(_))
        ));
    }
}
