//! Flashsale CLI
//!
//! Converts flash-sale records between the document-store and interchange formats.

use std::process;

use tracing::error;

use crate::config::CliConfig;

mod commands;
mod config;
mod errors;
mod logging;

/// Flashsale CLI entry point
pub fn main() {
    // Load configuration from .env and CLI arguments
    let config = CliConfig::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = logging::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for logging errors"
        )]
        {
            eprintln!("Logging error: {error}");
        }

        process::exit(1);
    }

    if let Err(error) = commands::run(&config.command) {
        error!("{error}");

        process::exit(1);
    }
}
