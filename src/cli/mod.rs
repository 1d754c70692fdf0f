//! CLI module for patientdb
//!
//! Provides command-line interface for:
//! - init: Create the store file
//! - serve: Run the HTTP API

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, load_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
