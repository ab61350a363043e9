//! CLI module for voxtitle
//!
//! This module provides the command-line interface implementation.
//! All logic is testable and separate from the binary entry point.
//!
//! # Architecture
//!
//! All logic lives in this module for testability. The binary
//! (`src/bin/voxtitle.rs`) is a thin shell that only calls `cli::run()`.
//!
//! ```text
//! src/cli/
//! ├── mod.rs       # This file - module exports
//! ├── args.rs      # Argument parsing with clap
//! └── commands.rs  # Command implementations
//! ```

pub mod args;
pub mod commands;

pub use args::{Args, Command};
pub use commands::{run, CliError, CliResult};
