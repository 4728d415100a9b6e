//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//! The offline commands (`load`, `list`, `summary`, `progress`) read a
//! JSON dataset file — the same shape the bulk-fetch endpoint of the
//! registration store returns — and run the engine over it locally.

use crate::api::{self, ApiOptions};
use crate::config::ServerConfig;
use regdesk_core::{
    Dashboard, RegdeskError, Registration, SearchQuery, StatusFilter,
};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE VALIDATION
// =============================================================================

/// Maximum dataset file size (100 MB).
///
/// This prevents memory exhaustion from accidental or malicious large
/// files; real datasets are a few thousand records.
const MAX_DATASET_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), RegdeskError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| RegdeskError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(RegdeskError::InvalidRequest(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate a dataset file path.
///
/// Canonicalizes the path (resolving symlinks and "..") and ensures it
/// refers to a regular file, so a path like "../../etc/passwd" cannot
/// be smuggled in through scripts that interpolate user input.
fn validate_file_path(path: &Path) -> Result<PathBuf, RegdeskError> {
    let canonical = path.canonicalize().map_err(|e| {
        RegdeskError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(RegdeskError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

// =============================================================================
// DATASET LOADING
// =============================================================================

/// Read and parse a registration dataset file.
fn read_dataset(path: &Path) -> Result<Vec<Registration>, RegdeskError> {
    let canonical = validate_file_path(path)?;
    validate_file_size(&canonical, MAX_DATASET_FILE_SIZE)?;

    let raw = std::fs::read_to_string(&canonical)
        .map_err(|e| RegdeskError::Io(format!("Cannot read '{}': {}", path.display(), e)))?;

    serde_json::from_str(&raw).map_err(|e| {
        RegdeskError::Serialization(format!("Invalid dataset '{}': {}", path.display(), e))
    })
}

/// Load a dataset file into a dashboard session.
fn load_dashboard(path: &Path) -> Result<Dashboard, RegdeskError> {
    Ok(Dashboard::with_dataset(read_dataset(path)?))
}

/// Load a dashboard for the server, starting empty if the dataset file
/// does not exist yet (it can be pushed later via `PUT /registrations`).
fn load_dashboard_or_empty(path: &Path) -> Result<Dashboard, RegdeskError> {
    if path.exists() {
        load_dashboard(path)
    } else {
        tracing::warn!(
            file = %path.display(),
            "Dataset file not found; starting with an empty dashboard"
        );
        Ok(Dashboard::new())
    }
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(
    dataset: &Path,
    host: Option<&str>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<(), RegdeskError> {
    let config = match config_path {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };

    // Flags win over the config file.
    let host = host
        .map(str::to_string)
        .or_else(|| config.host.clone())
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = port.or(config.port).unwrap_or(8080);
    let options = ApiOptions::resolve(&config);

    let dashboard = load_dashboard_or_empty(dataset)?;

    println!("Regdesk Admin Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:    {}", host);
    println!("  Port:    {}", port);
    println!("  Dataset: {:?} ({} records)", dataset, dashboard.len());
    println!();
    println!("Endpoints:");
    println!("  GET  /health                   - Health check");
    println!("  GET  /registrations            - Filtered list (?filter=, ?q=)");
    println!("  PUT  /registrations            - Replace dataset");
    println!("  GET  /registrations/{{id}}       - Record detail");
    println!("  POST /registrations/{{id}}/note  - Acknowledge secretary records");
    println!("  GET  /summary                  - Per-filter counts");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, dashboard, options).await
}

// =============================================================================
// LOAD COMMAND
// =============================================================================

/// Validate a dataset file and print its summary.
pub fn cmd_load(path: &Path, json_mode: bool) -> Result<(), RegdeskError> {
    let dashboard = load_dashboard(path)?;
    let counts = dashboard.filter_counts();

    if json_mode {
        let output = serde_json::json!({
            "file": path.to_string_lossy(),
            "valid": true,
            "total": dashboard.len(),
            "counts": counts,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Dataset OK: {:?}", path);
    println!("Records: {}", dashboard.len());
    print_counts(&dashboard);
    Ok(())
}

// =============================================================================
// LIST COMMAND
// =============================================================================

/// Print the filtered registration list.
pub fn cmd_list(
    path: &Path,
    filter_key: &str,
    query: Option<&str>,
    json_mode: bool,
) -> Result<(), RegdeskError> {
    let dashboard = load_dashboard(path)?;
    let filter = StatusFilter::parse(filter_key);
    let query = SearchQuery::new(query.unwrap_or(""));
    let records = dashboard.filtered(filter, &query);

    if json_mode {
        let items: Vec<_> = records
            .iter()
            .map(|r| {
                serde_json::json!({
                    "id": r.id,
                    "status": r.status.as_str(),
                    "progress": r.progress(),
                    "pinned": r.pinned.is_set(),
                })
            })
            .collect();
        let output = serde_json::json!({
            "filter": filter.as_key(),
            "query": query.as_str(),
            "count": records.len(),
            "registrations": items,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Registrations [{}] ({} matches)", filter.as_key(), records.len());
    println!("{}", "-".repeat(60));
    for r in records {
        let pin = if r.pinned.is_set() { "*" } else { " " };
        println!("{} {:<20} {:>4}%  {}", pin, r.id, r.progress(), r.status.as_str());
    }
    Ok(())
}

// =============================================================================
// SUMMARY COMMAND
// =============================================================================

/// Show per-filter tab counts.
pub fn cmd_summary(path: &Path, json_mode: bool) -> Result<(), RegdeskError> {
    let dashboard = load_dashboard(path)?;

    if json_mode {
        let output = serde_json::json!({
            "file": path.to_string_lossy(),
            "total": dashboard.len(),
            "counts": dashboard.filter_counts(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Regdesk Dashboard Summary");
    println!("=========================");
    println!("Dataset: {:?}", path);
    println!("Records: {}", dashboard.len());
    print_counts(&dashboard);
    Ok(())
}

fn print_counts(dashboard: &Dashboard) {
    let counts = dashboard.filter_counts();
    println!();
    for filter in StatusFilter::ALL_FILTERS {
        println!("  {:<20} {}", filter.as_key(), counts.get(filter));
    }
}

// =============================================================================
// PROGRESS COMMAND
// =============================================================================

/// Show one registration's progress percentage.
pub fn cmd_progress(path: &Path, id: &str, json_mode: bool) -> Result<(), RegdeskError> {
    let dashboard = load_dashboard(path)?;
    let record = dashboard
        .get(id)
        .ok_or_else(|| RegdeskError::RecordNotFound(id.to_string()))?;

    if json_mode {
        let output = serde_json::json!({
            "id": record.id,
            "status": record.status.as_str(),
            "currentStep": record.current_step.as_str(),
            "progress": record.progress(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Registration: {}", record.id);
    println!("Status:       {}", record.status.as_str());
    println!("Step:         {}", record.current_step.as_str());
    println!("Progress:     {}%", record.progress());
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
