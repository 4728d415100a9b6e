//! # Regdesk Application Library
//!
//! Library target backing the `regdesk` binary, exposing the HTTP API
//! and CLI modules so integration tests can drive them directly
//! (via `regdesk::api::*`).

pub mod api;
pub mod cli;
pub mod config;
