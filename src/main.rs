//! colbar: interactive single-column CSV cleaner, sorter and bar renderer
//!
//! This is the main entrypoint that parses flags, sets up logging and hands
//! stdin/stdout to the menu session.

use anyhow::Result;
use clap::Parser;
use colbar::{Args, Session};
use std::io;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    let scale = args.bar_scale()?;
    log::debug!("bar scale: {scale:?}");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), scale);
    session.run()?;

    Ok(())
}
