//! # Regdesk CLI Module
//!
//! This module implements the CLI interface for Regdesk.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `load` - Validate and summarize a dataset file
//! - `list` - Print the filtered registration list
//! - `summary` - Show per-filter tab counts
//! - `progress` - Show one registration's progress percentage

mod commands;

use clap::{Parser, Subcommand};
use regdesk_core::RegdeskError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Regdesk - Incorporation Admin Server
///
/// Classifies company-incorporation registrations into the admin
/// dashboard's filter categories and serves the filtered lists.
#[derive(Parser, Debug)]
#[command(name = "regdesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the registration dataset (JSON array of records)
    #[arg(short = 'f', long, global = true, default_value = "registrations.json")]
    pub file: PathBuf,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (overrides the config file)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Optional TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate a dataset file and print its summary
    Load {
        /// Dataset file to validate (defaults to the global --file)
        #[arg(short = 'i', long)]
        input: Option<PathBuf>,
    },

    /// Print the filtered registration list
    List {
        /// Filter tab key (all, pinned, booked, step1..step4,
        /// pending-reservation, secretary); unknown keys show everything
        #[arg(short = 't', long, default_value = "all")]
        filter: String,

        /// Free-text search query
        #[arg(short = 'Q', long)]
        query: Option<String>,
    },

    /// Show per-filter tab counts
    Summary,

    /// Show one registration's progress percentage
    Progress {
        /// Registration id
        #[arg(short, long)]
        id: String,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), RegdeskError> {
    if cli.verbose {
        tracing::info!(file = %cli.file.display(), "Using dataset file");
    }
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port, config }) => {
            cmd_server(&cli.file, host.as_deref(), port, config.as_deref()).await
        }
        Some(Commands::Load { input }) => {
            cmd_load(input.as_deref().unwrap_or(&cli.file), json_mode)
        }
        Some(Commands::List { filter, query }) => {
            cmd_list(&cli.file, &filter, query.as_deref(), json_mode)
        }
        Some(Commands::Summary) => cmd_summary(&cli.file, json_mode),
        Some(Commands::Progress { id }) => cmd_progress(&cli.file, &id, json_mode),
        None => {
            // No subcommand - show the summary by default
            cmd_summary(&cli.file, json_mode)
        }
    }
}
