//! CLI command implementations
//!
//! - serve: resolve configuration, bootstrap the tokio runtime, run the API server
//! - schemas: print the declared schema catalog as JSON

use std::path::Path;

use crate::api::{ApiServer, ServerConfig};
use crate::people::Catalog;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::Schemas => schemas(),
    }
}

/// Start the HTTP API server
///
/// Blocks until the server exits or fails.
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let config = effective_config(config_path, port)?;
    let server = ApiServer::with_config(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Print the declared schema catalog as JSON
pub fn schemas() -> CliResult<()> {
    let catalog = Catalog::new();
    let text = serde_json::to_string_pretty(&catalog)?;
    println!("{}", text);
    Ok(())
}

/// Resolve the effective server configuration
///
/// Loads the file when a path is given, otherwise starts from defaults.
/// A `--port` override is applied last.
fn effective_config(config_path: Option<&Path>, port: Option<u16>) -> CliResult<ServerConfig> {
    let mut config = match config_path {
        Some(path) => {
            ServerConfig::load(path).map_err(|e| CliError::config_error(e.to_string()))?
        }
        None => ServerConfig::default(),
    };

    if let Some(port) = port {
        config.port = port;
    }

    Ok(config)
}

/// Install the global tracing subscriber
///
/// Honors RUST_LOG when set.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("persond=info,tower_http=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
