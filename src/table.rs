//! Tab-separated input tables.
//!
//! ```text
//! Blog        china   kids    music   yahoo
//! Gothamist   0       3       3       0
//! GigaOM      6       0       0       2
//! ```
//!
//! The first line holds column labels (its first cell is ignored); every
//! other line is a row label followed by one number per column.

use std::io::BufRead;

use crate::error::{Error, Result};

/// A labelled numeric matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    /// One label per row.
    pub row_labels: Vec<String>,
    /// One label per column.
    pub column_labels: Vec<String>,
    /// `rows[i]` belongs to `row_labels[i]` and has `column_labels.len()` values.
    pub rows: Vec<Vec<f64>>,
}

impl DataTable {
    /// Parse a whole document.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_lines(text.lines().map(|l| Ok(l.to_owned())))
    }

    /// Parse from a reader, line by line.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        Self::from_lines(reader.lines().map(|l| l.map_err(Error::from)))
    }

    fn from_lines<I>(lines: I) -> Result<Self>
    where
        I: Iterator<Item = Result<String>>,
    {
        let mut column_labels: Option<Vec<String>> = None;
        let mut row_labels = Vec::new();
        let mut rows = Vec::new();

        for (index, line) in lines.enumerate() {
            let line = line?;
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() {
                continue;
            }
            let lineno = index + 1;
            let mut cells = line.split('\t');
            let head = cells.next().unwrap_or_default();

            if column_labels.is_none() {
                column_labels = Some(cells.map(str::to_owned).collect());
                continue;
            }
            let expected = column_labels.as_ref().map_or(0, Vec::len);

            let values = cells
                .enumerate()
                .map(|(col, cell)| {
                    cell.trim().parse::<f64>().map_err(|_| Error::Parse {
                        line: lineno,
                        message: format!("column {}: '{cell}' is not a number", col + 1),
                    })
                })
                .collect::<Result<Vec<f64>>>()?;

            if values.len() != expected {
                return Err(Error::Parse {
                    line: lineno,
                    message: format!("expected {expected} values, found {}", values.len()),
                });
            }
            row_labels.push(head.to_owned());
            rows.push(values);
        }

        let column_labels = column_labels.ok_or(Error::EmptyInput)?;
        Ok(Self {
            row_labels,
            column_labels,
            rows,
        })
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.column_labels.len()
    }

    /// Swap rows and columns, so columns can be clustered instead.
    ///
    /// Fails with [`Error::DimensionMismatch`] if a row does not have one
    /// value per column label (possible when the table was built by hand).
    pub fn transpose(&self) -> Result<Self> {
        let expected = self.n_cols();
        if let Some(row) = self.rows.iter().find(|row| row.len() != expected) {
            return Err(Error::DimensionMismatch {
                expected,
                found: row.len(),
            });
        }
        let rows = (0..expected)
            .map(|c| self.rows.iter().filter_map(|row| row.get(c).copied()).collect())
            .collect();
        Ok(Self {
            row_labels: self.column_labels.clone(),
            column_labels: self.row_labels.clone(),
            rows,
        })
    }
}
