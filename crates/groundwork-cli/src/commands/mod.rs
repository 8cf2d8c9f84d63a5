//! CLI command implementations.

pub mod new;
pub mod services;
