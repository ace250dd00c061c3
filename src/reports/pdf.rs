//! PDF builder backed by `genpdf`.
//!
//! Drawing operations are recorded as blocks; the `genpdf` document is only
//! built when rendering, since rendering consumes it.

use super::{
    write_document, DocumentBuilder, ReportError, ReportFormat, Table, TableCursor, TableRow,
};
use crate::pipeline::OutputTarget;
use genpdf::elements::{Break, FrameCellDecorator, Paragraph, TableLayout};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::{Style, StyledString};
use genpdf::{Document, Element, SimplePageDecorator};
use std::path::PathBuf;

/// Font locations tried in order when none is configured
const FALLBACK_FONTS: [(&str, &str); 3] = [
    ("/usr/share/fonts/truetype/liberation", "LiberationSans"),
    ("/System/Library/Fonts", "Helvetica"),
    ("/Library/Fonts", "Arial"),
];

/// PDF layout and font settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfOptions {
    /// Directory holding the font files
    pub font_dir: Option<PathBuf>,
    /// Font family name, e.g. `LiberationSans` for `LiberationSans-Regular.ttf`
    pub font_family: Option<String>,
    /// Page margins in millimetres
    pub margin_mm: i32,
    /// Body font size in points
    pub font_size: u8,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            font_dir: None,
            font_family: None,
            margin_mm: 20,
            font_size: 10,
        }
    }
}

#[derive(Debug, Clone)]
enum PdfBlock {
    Heading { level: u8, text: String },
    Paragraph(String),
    Table(Table),
}

/// PDF document builder
pub struct PdfBuilder {
    title: String,
    options: PdfOptions,
    blocks: Vec<PdfBlock>,
    cursor: TableCursor,
}

impl PdfBuilder {
    #[must_use]
    pub fn new(title: &str, options: PdfOptions) -> Self {
        Self {
            title: title.to_string(),
            options,
            blocks: Vec::new(),
            cursor: TableCursor::new(),
        }
    }

    fn load_fonts(&self) -> Result<FontFamily<FontData>, ReportError> {
        if let Some(dir) = &self.options.font_dir {
            let family = self.options.font_family.as_deref().unwrap_or("LiberationSans");
            return genpdf::fonts::from_files(dir, family, None).map_err(|e| {
                ReportError::PdfError(format!(
                    "failed to load font '{family}' from {}: {e}",
                    dir.display()
                ))
            });
        }

        for (dir, family) in FALLBACK_FONTS {
            let family = self.options.font_family.as_deref().unwrap_or(family);
            match genpdf::fonts::from_files(dir, family, None) {
                Ok(fonts) => return Ok(fonts),
                Err(e) => tracing::debug!("Font '{}' not usable from {}: {}", family, dir, e),
            }
        }
        Err(ReportError::PdfError(
            "no usable font found; set a font directory in the configuration".to_string(),
        ))
    }

    fn build_document(&self) -> Result<Document, ReportError> {
        let mut doc = Document::new(self.load_fonts()?);
        doc.set_title(self.title.clone());
        doc.set_font_size(self.options.font_size);

        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(self.options.margin_mm);
        doc.set_page_decorator(decorator);

        for block in &self.blocks {
            match block {
                PdfBlock::Heading { level, text } => {
                    let size = if *level <= 1 { 16 } else { 13 };
                    let style = Style::new().bold().with_font_size(size);
                    doc.push(Break::new(1));
                    doc.push(Paragraph::new(StyledString::new(text.clone(), style)));
                    doc.push(Break::new(0.5));
                }
                PdfBlock::Paragraph(text) => {
                    doc.push(Paragraph::new(text.clone()));
                }
                PdfBlock::Table(table) => doc.push(table_layout(table)?),
            }
        }
        Ok(doc)
    }
}

fn cell(text: &str, style: Style) -> impl Element {
    Paragraph::new(StyledString::new(text.to_string(), style)).padded(1)
}

fn table_layout(table: &Table) -> Result<TableLayout, ReportError> {
    let pdf_err = |e: genpdf::error::Error| ReportError::PdfError(e.to_string());

    let mut layout = TableLayout::new(table.column_weights());
    layout.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    let mut header = layout.row();
    for text in &table.headers {
        header = header.element(cell(text, Style::new().bold()));
    }
    header.push().map_err(pdf_err)?;

    for row in &table.rows {
        let mut pdf_row = layout.row();
        match row {
            TableRow::Cells(cells) => {
                for text in cells {
                    pdf_row = pdf_row.element(cell(text, Style::new()));
                }
            }
            // Rows must fill every column
            TableRow::Label(label) => {
                pdf_row = pdf_row.element(cell(label, Style::new().bold()));
                for _ in 1..table.column_count() {
                    pdf_row = pdf_row.element(cell("", Style::new()));
                }
            }
        }
        pdf_row.push().map_err(pdf_err)?;
    }
    Ok(layout)
}

impl DocumentBuilder for PdfBuilder {
    fn heading(&mut self, level: u8, text: &str) -> Result<(), ReportError> {
        self.cursor.ensure_closed("heading")?;
        self.blocks.push(PdfBlock::Heading {
            level,
            text: text.to_string(),
        });
        Ok(())
    }

    fn paragraph(&mut self, text: &str) -> Result<(), ReportError> {
        self.cursor.ensure_closed("paragraph")?;
        self.blocks.push(PdfBlock::Paragraph(text.to_string()));
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
        self.blocks.push(PdfBlock::Table(table));
        Ok(())
    }

    fn render(&self) -> Result<Vec<u8>, ReportError> {
        self.cursor.ensure_closed("render")?;
        let doc = self.build_document()?;
        let mut out = Vec::new();
        doc.render(&mut out)
            .map_err(|e| ReportError::PdfError(format!("failed to render PDF: {e}")))?;
        Ok(out)
    }

    /// A PDF is binary, so it is only ever written to a file.
    fn publish(&mut self, target: &OutputTarget) -> Result<(), ReportError> {
        if matches!(target, OutputTarget::Stdout) {
            return Err(ReportError::ConfigError(
                "PDF output requires an output file".to_string(),
            ));
        }
        let document = self.render()?;
        write_document(&document, target)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Pdf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_font_options() -> PdfOptions {
        PdfOptions {
            font_dir: Some(PathBuf::from("/nonexistent/mlbom-doc/fonts")),
            ..PdfOptions::default()
        }
    }

    #[test]
    fn test_publish_to_stdout_rejected() {
        let mut builder = PdfBuilder::new("MLBOM Summary", PdfOptions::default());
        assert!(matches!(
            builder.publish(&OutputTarget::Stdout),
            Err(ReportError::ConfigError(_))
        ));
    }

    #[test]
    fn test_missing_fonts_reported() {
        let mut builder = PdfBuilder::new("MLBOM Summary", missing_font_options());
        builder.heading(1, "MLBOM Summary").expect("heading");
        assert!(matches!(builder.render(), Err(ReportError::PdfError(_))));
    }

    #[test]
    fn test_blocks_recorded_in_order() {
        let mut builder = PdfBuilder::new("t", PdfOptions::default());
        builder.heading(1, "Model Dataset").expect("heading");
        builder.create_table(&["Parameter", "Value"], &[20, 35]).expect("create");
        builder.add_row(&["Properties"]).expect("label");
        builder.show_table(&[5, 9]).expect("show");
        builder.paragraph("").expect("paragraph");

        assert_eq!(builder.blocks.len(), 3);
        assert!(matches!(builder.blocks[1], PdfBlock::Table(ref t) if t.rows.len() == 1));
    }

    #[test]
    fn test_table_state_checked_before_fonts() {
        let mut builder = PdfBuilder::new("t", missing_font_options());
        builder.create_table(&["a"], &[]).expect("create");
        assert!(matches!(
            builder.render(),
            Err(ReportError::TableStateError(_))
        ));
    }
}
