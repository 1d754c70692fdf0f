//! CLI command implementations
//!
//! `init` only creates the store file. `serve` requires that file to
//! exist, installs logging, and blocks until the server shuts down.

use std::path::{Path, PathBuf};

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{init_logging, log_event, Event};
use crate::store::PatientStore;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config, store } => init(&config, store),
        Command::Serve {
            config,
            host,
            port,
            store,
        } => serve(&config, host, port, store),
    }
}

/// Loads the config file and applies command-line overrides.
pub fn load_config(
    config_path: &Path,
    host: Option<String>,
    port: Option<u16>,
    store: Option<PathBuf>,
) -> CliResult<HttpServerConfig> {
    let mut config = HttpServerConfig::load(config_path)?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(store) = store {
        config.store_path = store;
    }
    config.validate()?;
    Ok(config)
}

/// Create an empty store file
///
/// Fails if the file already exists; an existing store is never
/// overwritten.
pub fn init(config_path: &Path, store: Option<PathBuf>) -> CliResult<()> {
    let config = load_config(config_path, None, None, store)?;
    let store = PatientStore::open(config.store_path.clone());

    if store.exists() {
        return Err(CliError::already_initialized(store.path().display()));
    }

    store.initialize()?;
    log_event(Event::StoreInitialized, &store.path().display().to_string());
    println!("Initialized empty patient store at {}", store.path().display());
    Ok(())
}

/// Serve the patient API until Ctrl-C
pub fn serve(
    config_path: &Path,
    host: Option<String>,
    port: Option<u16>,
    store: Option<PathBuf>,
) -> CliResult<()> {
    let config = load_config(config_path, host, port, store)?;
    init_logging(&config.log_filter)?;
    log_event(Event::ConfigLoaded, &config_path.display().to_string());

    if !config.store_path.is_file() {
        return Err(CliError::not_initialized(config.store_path.display()));
    }

    let server = HttpServer::with_config(config);
    log_event(Event::ServeStart, &server.socket_addr());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    let result = rt.block_on(server.start());
    match result {
        Ok(()) => {
            log_event(Event::ServeStop, "shutdown");
            Ok(())
        }
        Err(e) => {
            log_event(Event::ServeFailed, &e.to_string());
            Err(CliError::boot_failed(format!("HTTP server failed: {}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::errors::CliErrorCode;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_empty_store() {
        let dir = TempDir::new().unwrap();
        let store_path = dir.path().join("data").join("patients.json");

        init(&dir.path().join("absent.json"), Some(store_path.clone())).unwrap();

        let content = fs::read_to_string(&store_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn test_init_refuses_existing_store() {
        let dir = TempDir::new().unwrap();
        let store_path = dir.path().join("patients.json");
        fs::write(&store_path, r#"{"P1": {}}"#).unwrap();

        let err = init(&dir.path().join("absent.json"), Some(store_path.clone())).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::AlreadyInitialized);
        assert_eq!(fs::read_to_string(&store_path).unwrap(), r#"{"P1": {}}"#);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("patientdb.json");
        fs::write(&config_path, r#"{"port": 9100, "host": "0.0.0.0"}"#).unwrap();

        let config = load_config(&config_path, None, Some(9200), None).unwrap();
        assert_eq!(config.port, 9200);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_override_is_validated() {
        let dir = TempDir::new().unwrap();
        let err = load_config(&dir.path().join("absent.json"), None, Some(0), None).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }
}
