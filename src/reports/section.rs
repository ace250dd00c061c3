//! Sections whose heading is emitted on first use.

use super::{DocumentBuilder, ReportError};

/// A report section that stays invisible until something contributes to it.
///
/// Holds a deferred open action (usually a heading plus `create_table`) that
/// runs exactly once, the first time a contributing field is written. A
/// section that never received a contribution emits nothing at all.
pub struct LazySection<F> {
    open: F,
    opened: bool,
}

impl<F> LazySection<F>
where
    F: FnMut(&mut dyn DocumentBuilder) -> Result<(), ReportError>,
{
    /// Create a section with the given deferred open action
    pub fn new(open: F) -> Self {
        Self {
            open,
            opened: false,
        }
    }

    /// Whether the open action has run
    pub fn is_open(&self) -> bool {
        self.opened
    }

    /// Run the open action if this is the first contribution
    pub fn ensure_open(&mut self, builder: &mut dyn DocumentBuilder) -> Result<(), ReportError> {
        if !self.opened {
            (self.open)(builder)?;
            self.opened = true;
        }
        Ok(())
    }

    /// Contribute one row, opening the section first if needed
    pub fn row(&mut self, builder: &mut dyn DocumentBuilder, cells: &[&str]) -> Result<(), ReportError> {
        self.ensure_open(builder)?;
        builder.add_row(cells)
    }

    /// Show the section's table if the section was opened
    pub fn show_if_open(
        &self,
        builder: &mut dyn DocumentBuilder,
        widths: &[u16],
    ) -> Result<bool, ReportError> {
        if self.opened {
            builder.show_table(widths)?;
        }
        Ok(self.opened)
    }
}

/// A section that opens with a heading followed by a table.
pub fn table_section<'a>(
    level: u8,
    title: &'a str,
    headers: &'a [&'a str],
    width_hints: &'a [u16],
) -> LazySection<impl FnMut(&mut dyn DocumentBuilder) -> Result<(), ReportError> + 'a> {
    LazySection::new(move |builder: &mut dyn DocumentBuilder| {
        builder.heading(level, title)?;
        builder.create_table(headers, width_hints)
    })
}

/// A section that opens with a heading only.
pub fn heading_section<'a>(
    level: u8,
    title: &'a str,
) -> LazySection<impl FnMut(&mut dyn DocumentBuilder) -> Result<(), ReportError> + 'a> {
    LazySection::new(move |builder: &mut dyn DocumentBuilder| builder.heading(level, title))
}
