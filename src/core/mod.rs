//! Core engine for shipdeck
//!
//! - **config**: `shipdeck.toml` parsing and validation, app group definitions
//! - **context**: Config and store clients, built once and shared by commands
//! - **error**: Error taxonomy with exit codes, JSON kinds and help messages
//! - **plan**: Content-addressed plan identifiers

pub mod config;
pub mod context;
pub mod error;
pub mod plan;
