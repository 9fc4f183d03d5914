//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for travel-catalog using clap's derive macros.

use clap::{Parser, Subcommand};

/// travel-catalog - Travel agency catalog and lead-capture backend
#[derive(Parser)]
#[command(name = "travel-catalog")]
#[command(version)]
#[command(about = "Travel agency catalog and lead-capture backend", long_about = None)]
pub struct Cli {
    /// Configuration file path (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Create the 9 regions and their default countries (idempotent)
    Seed,

    /// Import catalog rows from a JSON file
    ///
    /// The file holds arrays keyed by `aerolineas`, `ciudades`, `destinos`,
    /// `hoteles`, `vuelos`, `autos` and `paquetes`.
    Import {
        /// Input file path
        file_path: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}
