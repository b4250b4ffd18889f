//! CSV table loading and numeric column extraction using the csv crate

use crate::error::Error;
use std::io::ErrorKind;
use std::path::Path;

/// A CSV file held in memory as raw text
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column names from the first row
    pub headers: Vec<String>,
    /// Data rows (header excluded); rows may be shorter or longer than the header
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Read a comma-separated file whose first row names the columns
    ///
    /// # Arguments
    /// * `path` - Path to the CSV file
    ///
    /// # Returns
    /// * `Table` with every field kept as text, or `FileNotFound`,
    ///   `Unreadable` or `EmptyFile`
    pub fn read(path: impl AsRef<Path>) -> Result<Table, Error> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|e| open_error(path, e))?;

        let mut records = reader.records();
        let headers: Vec<String> = match records.next() {
            Some(record) => record
                .map_err(|e| open_error(path, e))?
                .iter()
                .map(str::to_string)
                .collect(),
            None => return Err(Error::EmptyFile(path.to_path_buf())),
        };

        let rows = records
            .map(|record| {
                record
                    .map(|r| r.iter().map(str::to_string).collect())
                    .map_err(|e| open_error(path, e))
            })
            .collect::<Result<Vec<Vec<String>>, Error>>()?;

        log::debug!(
            "read {}: {} columns, {} data rows",
            path.display(),
            headers.len(),
            rows.len()
        );

        Ok(Table { headers, rows })
    }

    /// Number of columns named by the header
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Turn a 1-based column answer typed by the user into a zero-based index
    pub fn parse_choice(&self, answer: &str) -> Result<usize, Error> {
        let trimmed = answer.trim();
        let choice: i64 = trimmed
            .parse()
            .map_err(|_| Error::NotAColumnNumber(trimmed.to_string()))?;

        match usize::try_from(choice) {
            Ok(n) if (1..=self.column_count()).contains(&n) => Ok(n - 1),
            _ => Err(Error::ColumnOutOfRange {
                choice,
                count: self.column_count(),
            }),
        }
    }

    /// Extract one column as raw text, header excluded
    ///
    /// Fails with `ColumnOutOfRange` for a bad index and with
    /// `NonNumericColumn` at the first cell that is neither blank nor a number.
    pub fn column(&self, index: usize) -> Result<Vec<String>, Error> {
        let Some(name) = self.headers.get(index) else {
            return Err(Error::ColumnOutOfRange {
                choice: i64::try_from(index).map_or(i64::MAX, |i| i.saturating_add(1)),
                count: self.column_count(),
            });
        };

        let mut values = Vec::with_capacity(self.rows.len());
        for (row_no, row) in self.rows.iter().enumerate() {
            match row.get(index) {
                Some(cell) if is_numeric_cell(cell) => values.push(cell.clone()),
                other => {
                    return Err(Error::NonNumericColumn {
                        column: name.clone(),
                        row: row_no + 1,
                        value: other.cloned().unwrap_or_default(),
                    })
                }
            }
        }

        Ok(values)
    }
}

/// Blank cells count as missing values
pub fn is_missing(cell: &str) -> bool {
    cell.trim().is_empty()
}

/// Accepts blank cells and finite, optionally signed decimals
pub fn is_numeric_cell(cell: &str) -> bool {
    is_missing(cell) || cell.trim().parse::<f64>().is_ok_and(f64::is_finite)
}

fn open_error(path: &Path, err: csv::Error) -> Error {
    if let csv::ErrorKind::Io(io) = err.kind() {
        if io.kind() == ErrorKind::NotFound {
            return Error::FileNotFound(path.to_path_buf());
        }
    }
    Error::Unreadable {
        path: path.to_path_buf(),
        source: err,
    }
}
