//! Column statistics and missing-value replacement

use crate::data::is_missing;
use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Statistic used to fill blank cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplacementMode {
    #[default]
    Min,
    Max,
    Avg,
}

impl ReplacementMode {
    /// Compute this statistic over a text column
    pub fn statistic<S: AsRef<str>>(self, column: &[S]) -> Result<f64, Error> {
        match self {
            ReplacementMode::Min => minimum(column),
            ReplacementMode::Max => maximum(column),
            ReplacementMode::Avg => average(column),
        }
    }
}

impl FromStr for ReplacementMode {
    type Err = String;

    /// Exact, case-sensitive match on `min`, `max` or `avg`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(ReplacementMode::Min),
            "max" => Ok(ReplacementMode::Max),
            "avg" => Ok(ReplacementMode::Avg),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for ReplacementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReplacementMode::Min => "min",
            ReplacementMode::Max => "max",
            ReplacementMode::Avg => "avg",
        };
        f.write_str(name)
    }
}

/// Result of a cleaning pass
#[derive(Debug, Clone, PartialEq)]
pub struct Cleaned {
    /// Value written into every blank cell
    pub replacement: f64,
    /// One number per input cell, in input order
    pub values: Vec<f64>,
}

/// Parse the non-blank cells of a column
fn present_values<S: AsRef<str>>(column: &[S]) -> impl Iterator<Item = Result<f64, Error>> + '_ {
    column
        .iter()
        .map(|cell| AsRef::<str>::as_ref(cell))
        .filter(|cell| !is_missing(cell))
        .map(parse_cell)
}

fn parse_cell(cell: &str) -> Result<f64, Error> {
    cell.trim()
        .parse::<f64>()
        .map_err(|_| Error::NonNumericValue(cell.to_string()))
}

/// Smallest value in the column; `+inf` when every cell is blank
pub fn minimum<S: AsRef<str>>(column: &[S]) -> Result<f64, Error> {
    present_values(column).try_fold(f64::INFINITY, |min, value| {
        let value = value?;
        Ok(if value < min { value } else { min })
    })
}

/// Largest value in the column; `-inf` when every cell is blank
pub fn maximum<S: AsRef<str>>(column: &[S]) -> Result<f64, Error> {
    present_values(column).try_fold(f64::NEG_INFINITY, |max, value| {
        let value = value?;
        Ok(if value > max { value } else { max })
    })
}

/// Arithmetic mean of the non-blank cells; `0` when there are none
pub fn average<S: AsRef<str>>(column: &[S]) -> Result<f64, Error> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in present_values(column) {
        sum += value?;
        count += 1;
    }

    if count == 0 {
        Ok(0.0)
    } else {
        Ok(sum / count as f64)
    }
}

/// Replace blank cells with the chosen statistic and parse everything else
///
/// # Arguments
/// * `column` - Raw text cells, blanks allowed
/// * `mode` - Statistic computed over the non-blank cells
///
/// # Returns
/// * `Cleaned` with the replacement and a value for every input cell
pub fn clean_column<S: AsRef<str>>(column: &[S], mode: ReplacementMode) -> Result<Cleaned, Error> {
    let replacement = mode.statistic(column)?;
    log::debug!("replacing blank cells with {mode} = {replacement}");

    let values = column
        .iter()
        .map(|cell| {
            let cell: &str = cell.as_ref();
            if is_missing(cell) {
                Ok(replacement)
            } else {
                parse_cell(cell)
            }
        })
        .collect::<Result<Vec<f64>, Error>>()?;

    Ok(Cleaned {
        replacement,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_skip_blanks() {
        let column = ["1", "", "3"];
        assert_eq!(minimum(&column).unwrap(), 1.0);
        assert_eq!(maximum(&column).unwrap(), 3.0);
        assert_eq!(average(&column).unwrap(), 2.0);
    }

    #[test]
    fn test_statistics_all_blank() {
        let column = ["", ""];
        assert_eq!(minimum(&column).unwrap(), f64::INFINITY);
        assert_eq!(maximum(&column).unwrap(), f64::NEG_INFINITY);
        assert_eq!(average(&column).unwrap(), 0.0);

        let empty: [&str; 0] = [];
        assert_eq!(average(&empty).unwrap(), 0.0);
    }

    #[test]
    fn test_statistics_signed_values() {
        let column = vec!["-4".to_string(), "2.5".to_string(), " 7 ".to_string()];
        assert_eq!(minimum(&column).unwrap(), -4.0);
        assert_eq!(maximum(&column).unwrap(), 7.0);
        assert!((average(&column).unwrap() - 5.5 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_statistics_reject_garbage() {
        assert!(matches!(
            minimum(&["1", "abc"]),
            Err(Error::NonNumericValue(v)) if v == "abc"
        ));
    }

    #[test]
    fn test_replacement_mode_parse() {
        assert_eq!("min".parse::<ReplacementMode>(), Ok(ReplacementMode::Min));
        assert_eq!("max".parse::<ReplacementMode>(), Ok(ReplacementMode::Max));
        assert_eq!("avg".parse::<ReplacementMode>(), Ok(ReplacementMode::Avg));
        assert!("AVG".parse::<ReplacementMode>().is_err());
        assert!(" min".parse::<ReplacementMode>().is_err());
        assert_eq!(ReplacementMode::default(), ReplacementMode::Min);
    }

    #[test]
    fn test_clean_column_avg() {
        let cleaned = clean_column(&["2", "", "4"], ReplacementMode::Avg).unwrap();
        assert_eq!(cleaned.replacement, 3.0);
        assert_eq!(cleaned.values, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_clean_column_replaces_every_blank() {
        let cleaned = clean_column(&["", "10", "", "30", ""], ReplacementMode::Max).unwrap();
        assert_eq!(cleaned.replacement, 30.0);
        assert_eq!(cleaned.values, vec![30.0, 10.0, 30.0, 30.0, 30.0]);
    }

    #[test]
    fn test_clean_column_without_blanks_keeps_values() {
        let cleaned = clean_column(&["5", "1.5"], ReplacementMode::Min).unwrap();
        assert_eq!(cleaned.replacement, 1.5);
        assert_eq!(cleaned.values, vec![5.0, 1.5]);
    }
}
