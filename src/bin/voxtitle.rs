//! voxtitle CLI: speaker-tagged subtitle generation
//!
//! This is a thin shell that delegates to library functions.
//! All logic lives in `voxtitle::cli` for testability.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use voxtitle::cli::{run, Args};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(result) => {
            if !result.success {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
