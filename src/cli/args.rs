//! CLI argument definitions using clap
//!
//! Commands:
//! - patientdb init --config <path>
//! - patientdb serve --config <path> [--host <host>] [--port <port>] [--store <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// patientdb - Patient Management System API
#[derive(Parser, Debug)]
#[command(name = "patientdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty patient store file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./patientdb.json")]
        config: PathBuf,

        /// Store file, overriding the config
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Serve the patient HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./patientdb.json")]
        config: PathBuf,

        /// Host to bind, overriding the config
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overriding the config
        #[arg(long)]
        port: Option<u16>,

        /// Store file, overriding the config
        #[arg(long)]
        store: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
