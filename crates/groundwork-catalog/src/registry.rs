//! Service catalog registry and validation.

use groundwork_types::{bail, GroundworkError, Result};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Default generated-secret length in characters.
pub const DEFAULT_SECRET_LENGTH: usize = 16;

/// A secret variable a service requires.
///
/// The generated value is `length` characters from the 62-symbol
/// alphanumeric alphabet; the vault stores it under `vault_<name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretSpec {
    /// Variable name, globally unique across the catalog
    pub name: String,
    /// Generated value length
    pub length: usize,
}

impl SecretSpec {
    /// A secret with the default length policy.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            length: DEFAULT_SECRET_LENGTH,
        }
    }

    /// A secret with an explicit length override.
    pub fn with_length(name: impl Into<String>, length: usize) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }

    /// The key this secret is stored under in the vault document.
    pub fn vault_name(&self) -> String {
        format!("vault_{}", self.name)
    }
}

/// The validated service registry.
///
/// Lookup is deterministic and total over the known catalog; services are
/// kept in registration order.
#[derive(Debug, Clone)]
pub struct Catalog {
    services: IndexMap<String, Vec<SecretSpec>>,
}

impl Catalog {
    /// Start building a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// The secrets a service requires, in definition order.
    ///
    /// Services that define no secrets yield an empty slice. Unknown
    /// service identifiers fail with `UnknownService` rather than silently
    /// provisioning an under-configured environment.
    pub fn secrets_for(&self, service: &str) -> Result<&[SecretSpec]> {
        self.services
            .get(service)
            .map(Vec::as_slice)
            .ok_or_else(|| GroundworkError::UnknownService(service.to_string()))
    }

    /// Whether the catalog knows this service.
    pub fn contains(&self, service: &str) -> bool {
        self.services.contains_key(service)
    }

    /// All known service identifiers, in registration order.
    pub fn service_ids(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    /// Number of registered services.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// True when no services are registered.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// Builder that validates the registry as it is assembled.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    services: IndexMap<String, Vec<SecretSpec>>,
    seen_variables: HashSet<String>,
    errors: Vec<String>,
}

impl CatalogBuilder {
    /// Register a service with its required secrets.
    ///
    /// Collisions are collected rather than failing mid-build so `build`
    /// can report every defect in the registry at once.
    pub fn service(mut self, id: impl Into<String>, secrets: Vec<SecretSpec>) -> Self {
        let id = id.into();

        if self.services.contains_key(&id) {
            self.errors
                .push(format!("duplicate service id '{}'", id));
            return self;
        }

        for secret in &secrets {
            if !self.seen_variables.insert(secret.name.clone()) {
                self.errors.push(format!(
                    "duplicate secret variable '{}' (service '{}')",
                    secret.name, id
                ));
            }
            if secret.length == 0 {
                self.errors.push(format!(
                    "zero-length secret '{}' (service '{}')",
                    secret.name, id
                ));
            }
        }

        self.services.insert(id, secrets);
        self
    }

    /// Finish the catalog, failing fast on any collected defect.
    pub fn build(self) -> Result<Catalog> {
        if !self.errors.is_empty() {
            bail!(
                Catalog,
                "invalid service registry: {}",
                self.errors.join("; ")
            );
        }

        tracing::debug!(services = self.services.len(), "catalog validated");
        Ok(Catalog {
            services: self.services,
        })
    }
}
