//! Lifecycle events
//!
//! Process-level milestones are typed so their log names stay stable.
//! Per-request logging uses plain `tracing` messages instead.

use std::fmt;

/// Observable lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration loaded
    ConfigLoaded,
    /// Store file created by `init`
    StoreInitialized,
    /// Server bound and about to accept requests
    ServeStart,
    /// Server returned after shutdown
    ServeStop,
    /// Startup or serving failed
    ServeFailed,
}

impl Event {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreInitialized => "STORE_INITIALIZED",
            Event::ServeStart => "SERVE_START",
            Event::ServeStop => "SERVE_STOP",
            Event::ServeFailed => "SERVE_FAILED",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Event::ServeFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
