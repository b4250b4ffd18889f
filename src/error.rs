//! Error type shared by every menu operation

use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single operation. Apart from `InputClosed` and `Io`, none
/// of these end the session; the menu reports them and carries on.
#[derive(Error, Debug)]
pub enum Error {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Could not read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} has no header row", .0.display())]
    EmptyFile(PathBuf),

    #[error("Column {choice} is out of range (1-{count})")]
    ColumnOutOfRange { choice: i64, count: usize },

    #[error("'{0}' is not a column number")]
    NotAColumnNumber(String),

    #[error("Column '{column}' has non-numeric value '{value}' in row {row}")]
    NonNumericColumn {
        column: String,
        row: usize,
        value: String,
    },

    #[error("could not convert '{0}' to a number")]
    NonNumericValue(String),

    #[error("Invalid sorting order '{0}'. Please choose 'ascending' or 'descending'.")]
    InvalidSortOrder(String),

    #[error("the data still has empty cells; clean it first")]
    MissingValues,

    #[error("Bar divisor must be a positive number, got {0}")]
    InvalidDivisor(f64),

    #[error("input closed")]
    InputClosed,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the session can keep going after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::InputClosed | Error::Io(_))
    }
}
