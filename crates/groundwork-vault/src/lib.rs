//! # Groundwork Vault
//!
//! Credential generation and the encrypted per-environment secret store.
//!
//! This crate implements the security-relevant core of the provisioner:
//!
//! - **Generator**: cryptographically random alphanumeric secrets
//! - **Store**: reading an encrypted vault document into a flat mapping
//! - **Engine**: merging new secrets into the document without losing
//!   existing entries, including the bootstrap path for a brand-new store
//! - **Ciphers**: an in-process AES-256-GCM implementation and a subprocess
//!   wrapper around an `ansible-vault`-compatible tool, both behind the
//!   `VaultCipher` trait

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cipher;
pub mod engine;
pub mod generator;
pub mod store;
pub mod tool;

pub use cipher::AesGcmCipher;
pub use generator::generate_secret;
pub use store::{VaultData, VaultStore};
pub use tool::ToolCipher;
