//! CLI argument definitions using clap
//!
//! Commands:
//! - `persond serve [--config <path>] [--port <p>]`: start the HTTP API server
//! - `persond schemas`: print the declared schema catalog as JSON

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// persond - A strict, schema-driven person API service
#[derive(Parser, Debug)]
#[command(name = "persond")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Path to a JSON configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured listen port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the declared schema catalog as JSON
    Schemas,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
