//! # Groundwork Env
//!
//! The on-disk shape of an environment repository and the provisioning
//! workflow that fills it: non-secret variable files, the vault reference
//! lines, and the per-service secret seeding loop.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod environment;
pub mod vars;
pub mod workflow;

pub use environment::Environment;
pub use workflow::Provisioner;
