//! colbar: an interactive CLI for a single numeric CSV column
//!
//! This library loads one column from a CSV file, fills its missing cells
//! with a chosen statistic, sorts it with an insertion sort and renders it
//! as rows of asterisks.

pub mod cli;
pub mod data;
pub mod error;
pub mod session;
pub mod sort;
pub mod stats;
pub mod viz;

// Re-export public items for easier access
pub use cli::Args;
pub use data::{is_numeric_cell, Table};
pub use error::Error;
pub use session::{Dataset, MenuChoice, Session};
pub use sort::{insertion_sort, SortOrder};
pub use stats::{average, clean_column, maximum, minimum, Cleaned, ReplacementMode};
pub use viz::{bar_count, render_bars, BarScale};

/// Common result type used by the binary
pub type Result<T> = anyhow::Result<T>;
