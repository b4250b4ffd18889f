//! Insertion sort with a selectable direction

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Direction of the sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// True when `left` must move after `right`
    fn out_of_order<T: PartialOrd>(self, left: &T, right: &T) -> bool {
        match self {
            SortOrder::Ascending => left > right,
            SortOrder::Descending => left < right,
        }
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    /// Case-insensitive `ascending` or `descending`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ascending" => Ok(SortOrder::Ascending),
            "descending" => Ok(SortOrder::Descending),
            _ => Err(Error::InvalidSortOrder(s.trim().to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => f.write_str("ascending"),
            SortOrder::Descending => f.write_str("descending"),
        }
    }
}

/// Sort `values` in place with an insertion sort
///
/// Elements are only shifted past neighbours that compare strictly out of
/// order, so equal values keep their relative positions.
pub fn insertion_sort<T: PartialOrd + Copy>(values: &mut [T], order: SortOrder) {
    for i in 1..values.len() {
        let key = values[i];
        let mut j = i;
        while j > 0 && order.out_of_order(&values[j - 1], &key) {
            values[j] = values[j - 1];
            j -= 1;
        }
        values[j] = key;
    }
}
