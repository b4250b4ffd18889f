//! Asterisk bar rendering for a column of values

use crate::error::Error;
use std::io::Write;

/// Marker printed once per bar unit
pub const BAR_CHAR: char = '*';

/// How values map to bar lengths
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarScale {
    /// Each full multiple of this adds one marker
    pub divisor: f64,
    /// Longest bar printed
    pub max_bars: usize,
}

impl Default for BarScale {
    fn default() -> Self {
        Self {
            divisor: 5.0,
            max_bars: 20,
        }
    }
}

impl BarScale {
    /// Build a scale, rejecting a divisor that is zero, negative or not finite
    pub fn new(divisor: f64, max_bars: usize) -> Result<Self, Error> {
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(Error::InvalidDivisor(divisor));
        }
        Ok(Self { divisor, max_bars })
    }

    /// Number of markers for `value`: `min(trunc(value / divisor), max_bars)`
    ///
    /// Negative values give an empty bar. Infinite or NaN values cannot be
    /// drawn and are reported as `NonNumericValue`. A finite value whose
    /// quotient overflows gets the full bar.
    pub fn bar_count(&self, value: f64) -> Result<usize, Error> {
        if !value.is_finite() {
            return Err(Error::NonNumericValue(value.to_string()));
        }
        let units = (value / self.divisor).trunc();
        if units <= 0.0 {
            return Ok(0);
        }
        // units is a positive whole number here, clamp before the cast
        Ok(units.min(self.max_bars as f64) as usize)
    }
}

/// A value the visualizer can coerce to a number
pub trait ToBarValue {
    fn to_bar_value(&self) -> Result<f64, Error>;
}

impl ToBarValue for f64 {
    fn to_bar_value(&self) -> Result<f64, Error> {
        Ok(*self)
    }
}

impl ToBarValue for str {
    fn to_bar_value(&self) -> Result<f64, Error> {
        self.trim()
            .parse()
            .map_err(|_| Error::NonNumericValue(self.to_string()))
    }
}

impl ToBarValue for String {
    fn to_bar_value(&self) -> Result<f64, Error> {
        self.as_str().to_bar_value()
    }
}

impl<T: ToBarValue + ?Sized> ToBarValue for &T {
    fn to_bar_value(&self) -> Result<f64, Error> {
        (**self).to_bar_value()
    }
}

/// Bar length for `value` under the default scale
pub fn bar_count(value: f64) -> Result<usize, Error> {
    BarScale::default().bar_count(value)
}

/// Write one line of markers per value
///
/// # Arguments
/// * `values` - Numbers, or text cells parsed on the fly
/// * `scale` - Divisor and cap for the bar length
/// * `out` - Destination for the rendered lines
///
/// # Returns
/// * Number of lines written; on the first value that cannot be drawn the
///   error is returned and lines already written stay in `out`
pub fn render_bars<I, V, W>(values: I, scale: &BarScale, out: &mut W) -> Result<usize, Error>
where
    I: IntoIterator<Item = V>,
    V: ToBarValue,
    W: Write,
{
    let mut lines = 0;
    for value in values {
        let count = scale.bar_count(value.to_bar_value()?)?;
        let bar: String = std::iter::repeat(BAR_CHAR).take(count).collect();
        writeln!(out, "{bar}")?;
        lines += 1;
    }
    Ok(lines)
}
