//! The per-service secret seeding workflow.

use groundwork_catalog::Catalog;
use groundwork_types::{Result, VaultCipher};
use groundwork_vault::store::{VaultData, VaultStore};
use groundwork_vault::generate_secret;
use std::sync::Arc;

use crate::environment::Environment;
use crate::vars;

/// Drives the credential-vaulting workflow for one environment.
///
/// For each requested service the catalog is consulted; for each required
/// secret a value is generated, merged into the cumulative vault document,
/// and referenced from the plaintext variables file. Strictly sequential,
/// one secret at a time.
pub struct Provisioner<'a> {
    catalog: &'a Catalog,
    cipher: Arc<dyn VaultCipher>,
}

impl<'a> Provisioner<'a> {
    /// Create a provisioner over a validated catalog and a cipher.
    pub fn new(catalog: &'a Catalog, cipher: Arc<dyn VaultCipher>) -> Self {
        Self { catalog, cipher }
    }

    /// Generate and vault every secret the environment's services require.
    ///
    /// Returns the generated variable names in generation order. Fails fast
    /// on the first unknown service or vault error; secrets already written
    /// in this run stay on disk for operator inspection.
    pub fn seed_secrets(&self, env: &Environment, passphrase: &str) -> Result<Vec<String>> {
        let store = VaultStore::new(env.vault_file(), Arc::clone(&self.cipher));
        let mut generated = Vec::new();

        for service in env.services() {
            let specs = match self.catalog.secrets_for(service) {
                Ok(specs) => specs,
                Err(e) => {
                    tracing::error!(service = %service, "service not in catalog");
                    return Err(e);
                }
            };

            for spec in specs {
                vars::append_reference(env.vars_file(), &spec.name)?;

                let secret = generate_secret(spec.length)?;
                let existing = store.load(passphrase)?;

                let mut new_entries = VaultData::new();
                new_entries.insert(spec.vault_name(), secret);

                if let Err(e) = store.upsert(passphrase, &existing, &new_entries) {
                    tracing::error!(service = %service, variable = %spec.name, "failed to vault secret");
                    return Err(e);
                }

                tracing::info!(service = %service, variable = %spec.name, "vaulted secret");
                generated.push(spec.name.clone());
            }
        }

        Ok(generated)
    }
}
