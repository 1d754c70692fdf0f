//! Observability
//!
//! Logging goes through `tracing`. The subscriber is installed once by
//! the CLI; library code only emits events and never installs one.
//!
//! # Usage
//!
//! ```ignore
//! use patientdb::observability::{init_logging, log_event, Event};
//!
//! init_logging("info")?;
//! log_event(Event::ConfigLoaded, "patientdb.json");
//! ```

mod events;

pub use events::Event;

use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Logging setup errors
#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("invalid log filter '{filter}': {source}")]
    InvalidFilter {
        filter: String,
        #[source]
        source: ParseError,
    },

    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,
}

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` wins over `default_filter` when it is set and parses.
pub fn init_logging(default_filter: &str) -> Result<(), ObservabilityError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(default_filter)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|_| ObservabilityError::AlreadyInitialized)
}

fn build_filter(directive: &str) -> Result<EnvFilter, ObservabilityError> {
    EnvFilter::try_new(directive).map_err(|source| ObservabilityError::InvalidFilter {
        filter: directive.to_string(),
        source,
    })
}

/// Logs a lifecycle event with a free-form detail
pub fn log_event(event: Event, detail: &str) {
    if event.is_failure() {
        error!(event = event.as_str(), detail, "lifecycle");
    } else {
        info!(event = event.as_str(), detail, "lifecycle");
    }
}
