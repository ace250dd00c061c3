//! The open-table resource shared by every builder.

use super::ReportError;
use serde::Serialize;

/// One row of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TableRow {
    /// A full row with one cell per column
    Cells(Vec<String>),
    /// A single-cell label spanning the table
    Label(String),
}

/// A finished table, ready to be laid out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    /// Advisory widths given when the table was created
    pub width_hints: Vec<u16>,
    pub rows: Vec<TableRow>,
    /// Relative widths given when the table was shown
    pub widths: Vec<u16>,
}

impl Table {
    /// Number of columns
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Relative column weights for layout.
    ///
    /// Uses the show-time widths when they cover every column, then the
    /// creation-time hints, then equal weights. Zero weights become one.
    #[must_use]
    pub fn column_weights(&self) -> Vec<usize> {
        let columns = self.column_count();
        let source = if self.widths.len() == columns {
            &self.widths
        } else if self.width_hints.len() == columns {
            &self.width_hints
        } else {
            return vec![1; columns];
        };
        source.iter().map(|w| usize::from(*w).max(1)).collect()
    }

    /// Creation-time hint for a column, if one was given
    #[must_use]
    pub fn width_hint(&self, column: usize) -> Option<usize> {
        self.width_hints.get(column).map(|w| usize::from(*w))
    }
}

/// Tracks the table currently being filled.
///
/// At most one table is open at a time. Out-of-order calls return
/// [`ReportError::TableStateError`] rather than panicking.
#[derive(Debug, Default)]
pub struct TableCursor {
    open: Option<Table>,
}

impl TableCursor {
    #[must_use]
    pub const fn new() -> Self {
        Self { open: None }
    }

    /// Whether a table is currently open
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Open a new table
    pub fn open(&mut self, headers: &[&str], width_hints: &[u16]) -> Result<(), ReportError> {
        if self.open.is_some() {
            return Err(ReportError::TableStateError(
                "create_table called while another table is open".to_string(),
            ));
        }
        if headers.is_empty() {
            return Err(ReportError::TableStateError(
                "a table needs at least one column".to_string(),
            ));
        }
        self.open = Some(Table {
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            width_hints: width_hints.to_vec(),
            rows: Vec::new(),
            widths: Vec::new(),
        });
        Ok(())
    }

    /// Append a row to the open table
    pub fn push_row(&mut self, cells: &[&str]) -> Result<(), ReportError> {
        let table = self.open.as_mut().ok_or_else(|| {
            ReportError::TableStateError("add_row called with no open table".to_string())
        })?;

        let columns = table.column_count();
        let row = match cells {
            [label] if columns > 1 => TableRow::Label((*label).to_string()),
            _ if cells.len() == columns => {
                TableRow::Cells(cells.iter().map(|c| (*c).to_string()).collect())
            }
            _ => {
                return Err(ReportError::TableStateError(format!(
                    "row has {} cells but the table has {columns} columns",
                    cells.len()
                )))
            }
        };
        table.rows.push(row);
        Ok(())
    }

    /// Close the open table and hand it back for rendering
    pub fn close(&mut self, widths: &[u16]) -> Result<Table, ReportError> {
        let mut table = self.open.take().ok_or_else(|| {
            ReportError::TableStateError("show_table called with no open table".to_string())
        })?;
        table.widths = widths.to_vec();
        Ok(table)
    }

    /// Fail if a table is still open when `operation` needs a closed cursor
    pub fn ensure_closed(&self, operation: &str) -> Result<(), ReportError> {
        if self.is_open() {
            Err(ReportError::TableStateError(format!(
                "{operation} called while a table is open"
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_fill_close() {
        let mut cursor = TableCursor::new();
        cursor.open(&["Item", "Value"], &[20, 35]).expect("open");
        cursor.push_row(&["Task", "classification"]).expect("row");
        cursor.push_row(&["Properties"]).expect("label");
        let table = cursor.close(&[5, 9]).expect("close");

        assert!(!cursor.is_open());
        assert_eq!(
            table.rows,
            vec![
                TableRow::Cells(vec!["Task".into(), "classification".into()]),
                TableRow::Label("Properties".into()),
            ]
        );
        assert_eq!(table.column_weights(), vec![5, 9]);
    }

    #[test]
    fn test_out_of_order_calls_are_errors() {
        let mut cursor = TableCursor::new();
        assert!(matches!(
            cursor.push_row(&["a", "b"]),
            Err(ReportError::TableStateError(_))
        ));
        assert!(cursor.close(&[]).is_err());

        cursor.open(&["a", "b"], &[]).expect("open");
        assert!(cursor.open(&["c"], &[]).is_err());
        assert!(cursor.ensure_closed("render").is_err());
    }

    #[test]
    fn test_row_length_mismatch_rejected() {
        let mut cursor = TableCursor::new();
        cursor.open(&["a", "b", "c"], &[]).expect("open");
        assert!(cursor.push_row(&["x", "y"]).is_err());
    }

    #[test]
    fn test_single_column_row_is_not_a_label() {
        let mut cursor = TableCursor::new();
        cursor.open(&["only"], &[]).expect("open");
        cursor.push_row(&["x"]).expect("row");
        let table = cursor.close(&[]).expect("close");
        assert_eq!(table.rows, vec![TableRow::Cells(vec!["x".into()])]);
    }

    #[test]
    fn test_weights_fall_back_to_hints_then_equal() {
        let mut cursor = TableCursor::new();
        cursor.open(&["Name", "Content"], &[]).expect("open");
        let table = cursor.close(&[5, 9, 3]).expect("close");
        assert_eq!(table.column_weights(), vec![1, 1]);

        cursor.open(&["a", "b"], &[10, 0]).expect("open");
        let table = cursor.close(&[]).expect("close");
        assert_eq!(table.column_weights(), vec![10, 1]);
    }
}
