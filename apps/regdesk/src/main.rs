//! # Regdesk - Incorporation Admin Server
//!
//! The main binary for the Regdesk admin dashboard.
//!
//! This application provides:
//! - HTTP REST API server (axum-based) over the in-memory dashboard
//! - CLI interface for inspecting a registration dataset offline
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                 apps/regdesk (THE BINARY)                 │
//! │                                                           │
//! │   ┌─────────────┐              ┌─────────────┐            │
//! │   │   CLI       │              │   HTTP API  │            │
//! │   │  (clap)     │              │   (axum)    │            │
//! │   └──────┬──────┘              └──────┬──────┘            │
//! │          │                            │                   │
//! │          └──────────────┬─────────────┘                   │
//! │                         ▼                                 │
//! │                ┌─────────────────┐                        │
//! │                │  regdesk-core   │                        │
//! │                │  (THE LOGIC)    │                        │
//! │                └─────────────────┘                        │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server over a dataset file
//! regdesk --file registrations.json server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! regdesk --file registrations.json summary
//! regdesk --file registrations.json list --filter step2 --query acme
//! regdesk --file registrations.json progress --id reg-1042
//! ```

mod api;
mod cli;
mod config;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing — REGDESK_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("REGDESK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "regdesk=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Regdesk startup banner.
fn print_banner() {
    println!(
        r#"
  ██████╗ ███████╗ ██████╗ ██████╗ ███████╗███████╗██╗  ██╗
  ██╔══██╗██╔════╝██╔════╝ ██╔══██╗██╔════╝██╔════╝██║ ██╔╝
  ██████╔╝█████╗  ██║  ███╗██║  ██║█████╗  ███████╗█████╔╝
  ██╔══██╗██╔══╝  ██║   ██║██║  ██║██╔══╝  ╚════██║██╔═██╗
  ██║  ██║███████╗╚██████╔╝██████╔╝███████╗███████║██║  ██╗
  ╚═╝  ╚═╝╚══════╝ ╚═════╝ ╚═════╝ ╚══════╝╚══════╝╚═╝  ╚═╝

  Incorporation Admin Server v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
