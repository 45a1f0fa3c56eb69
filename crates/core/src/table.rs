//! In-memory table of header names and rows of cell values
//!
//! `TabularData` is the shape every stage hands to the next: the codec builds
//! one when parsing, adapters build one from a result set, and the transfer
//! protocol moves it between servers.
//!
//! ## Invariants
//!
//! - Dimensions are fixed at construction; every row has exactly
//!   `column_count()` cells
//! - Columns are addressed by position only, so duplicate header names are
//!   independent columns
//! - Owned accessors (`headers`, `rows`, `row`, `cell_value`) return copies;
//!   mutating them never touches the table

use crate::error::{Error, Result};
use crate::value::Value;

/// Header names plus rows of [`Value`] cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularData {
    headers: Vec<Option<String>>,
    rows: Vec<Vec<Value>>,
}

impl TabularData {
    /// Create a table with every header and cell set to null.
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` when `column_count` is zero.
    pub fn new(row_count: usize, column_count: usize) -> Result<Self> {
        if column_count == 0 {
            return Err(Error::InvalidDimensions {
                rows: row_count,
                columns: column_count,
            });
        }
        Ok(Self {
            headers: vec![None; column_count],
            rows: vec![vec![Value::Null; column_count]; row_count],
        })
    }

    /// Build a table from complete headers and rows.
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` for zero headers, `RowCellCountMismatch` when a row
    /// does not match the header count.
    pub fn from_parts(headers: Vec<Option<String>>, rows: Vec<Vec<Value>>) -> Result<Self> {
        if headers.is_empty() {
            return Err(Error::InvalidDimensions {
                rows: rows.len(),
                columns: 0,
            });
        }
        for (index, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(Error::RowCellCountMismatch {
                    row: index,
                    found: row.len(),
                    expected: headers.len(),
                });
            }
        }
        Ok(Self { headers, rows })
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Name the column at `col`.
    pub fn set_header(&mut self, col: usize, name: impl Into<String>) -> Result<()> {
        let len = self.headers.len();
        let slot = self.headers.get_mut(col).ok_or(Error::IndexOutOfBounds {
            axis: "column",
            index: col,
            len,
        })?;
        *slot = Some(name.into());
        Ok(())
    }

    /// Header of the column at `col` (null when never set).
    pub fn header(&self, col: usize) -> Result<Option<String>> {
        self.check_column(col)?;
        Ok(self.headers[col].clone())
    }

    /// Copy of all headers.
    pub fn headers(&self) -> Vec<Option<String>> {
        self.headers.clone()
    }

    /// Set the cell at (`row`, `col`).
    pub fn set_cell_value(&mut self, row: usize, col: usize, value: impl Into<Value>) -> Result<()> {
        self.check_row(row)?;
        self.check_column(col)?;
        self.rows[row][col] = value.into();
        Ok(())
    }

    /// Copy of the cell at (`row`, `col`).
    pub fn cell_value(&self, row: usize, col: usize) -> Result<Value> {
        self.check_row(row)?;
        self.check_column(col)?;
        Ok(self.rows[row][col].clone())
    }

    /// Copy of one row.
    pub fn row(&self, row: usize) -> Result<Vec<Value>> {
        self.check_row(row)?;
        Ok(self.rows[row].clone())
    }

    /// Copy of all rows.
    pub fn rows(&self) -> Vec<Vec<Value>> {
        self.rows.clone()
    }

    /// Borrowing iterator over headers, for read-only passes such as encoding.
    pub fn iter_headers(&self) -> impl Iterator<Item = Option<&str>> {
        self.headers.iter().map(|h| h.as_deref())
    }

    /// Borrowing iterator over rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Position of the first column named `name`.
    ///
    /// Only meant for locating a key column; ordinary access is positional.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.as_deref() == Some(name))
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows.len() {
            return Err(Error::IndexOutOfBounds {
                axis: "row",
                index: row,
                len: self.rows.len(),
            });
        }
        Ok(())
    }

    fn check_column(&self, col: usize) -> Result<()> {
        if col >= self.headers.len() {
            return Err(Error::IndexOutOfBounds {
                axis: "column",
                index: col,
                len: self.headers.len(),
            });
        }
        Ok(())
    }
}
