//! Command-line interface definitions and argument parsing

use crate::error::Error;
use crate::viz::BarScale;
use clap::Parser;

/// Interactive tool that loads a numeric CSV column, fills its gaps, sorts it
/// and draws it as asterisk bars
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Value represented by one asterisk
    #[arg(short, long, default_value = "5")]
    pub divisor: f64,

    /// Longest bar drawn, in asterisks
    #[arg(short, long, default_value = "20")]
    pub max_bars: usize,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Validate the bar options and build the visualizer scale
    pub fn bar_scale(&self) -> Result<BarScale, Error> {
        BarScale::new(self.divisor, self.max_bars)
    }

    /// Default log filter for env_logger; `RUST_LOG` still takes precedence
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}
