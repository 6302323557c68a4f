//! CLI module for persond
//!
//! Provides the command-line interface:
//! - serve: start the HTTP API server
//! - schemas: print the declared schema catalog

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run, run_command, schemas, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
