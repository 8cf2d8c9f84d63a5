//! # Groundwork Types
//!
//! Core types, traits, and errors shared across all Groundwork crates.
//!
//! This crate provides the fundamental building blocks for the Groundwork
//! environment provisioner, including:
//!
//! - Type-safe wrappers for domain names and derived environment identifiers
//! - The error taxonomy and result alias used by every other crate
//! - The `VaultCipher` capability trait that the vault engine depends on
//!
//! ## Example
//!
//! ```
//! use groundwork_types::DomainName;
//!
//! // Create a validated domain name
//! let domain = DomainName::new("example.com").unwrap();
//! assert_eq!(domain.as_str(), "example.com");
//! assert_eq!(domain.environment_name(), "environment-example_com");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod identifiers;
pub mod traits;

// Re-export common types for convenience
pub use errors::{GroundworkError, Result};
pub use identifiers::DomainName;
pub use traits::VaultCipher;
