//! # Groundwork Core
//!
//! Core utilities, configuration management, and logging for the Groundwork
//! environment provisioner.
//!
//! This crate provides:
//!
//! - **Configuration**: the operator-side config file with env overrides
//! - **Logging**: tracing subscriber initialization
//! - **Process Execution**: command execution for the git/tool collaborators
//! - **File Operations**: atomic writes, YAML handling, path utilities

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod log;
pub mod util;

// Re-export commonly used items
pub use config::Config;
pub use groundwork_types::{GroundworkError, Result};

/// Groundwork application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Groundwork application name
pub const APP_NAME: &str = "groundwork";
