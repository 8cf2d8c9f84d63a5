//! # Groundwork Catalog
//!
//! The static registry of deployable services and the secrets each one
//! requires. The catalog is built once at process start and validated at
//! construction: duplicate secret-variable names anywhere in the registry
//! are a hard error, never silent shadowing.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod registry;

mod builtin;

pub use registry::{Catalog, CatalogBuilder, SecretSpec, DEFAULT_SECRET_LENGTH};
