//! Merge-and-encrypt engine.
//!
//! All writes to a vault document go through `upsert`: an additive union
//! keyed by variable name, new entries winning on collision, written
//! atomically so a failure never leaves a partial document behind.

use groundwork_types::{GroundworkError, Result};
use groundwork_core::util::fs;

use crate::store::{parse_document, render_document, VaultData, VaultStore};

impl VaultStore {
    /// Merge `new_entries` into the document and write it back.
    ///
    /// `existing` is the mapping a prior `load` returned; entries in it
    /// survive the write unless `new_entries` replaces them. When no
    /// document exists yet, the store is bootstrapped from the first new
    /// entry and the remaining entries are folded in before the single
    /// final write, so a multi-secret run against a brand-new environment
    /// keeps every secret.
    pub fn upsert(
        &self,
        passphrase: &str,
        existing: &VaultData,
        new_entries: &VaultData,
    ) -> Result<()> {
        if new_entries.is_empty() {
            return Ok(());
        }

        let blob = if existing.is_empty() && !self.exists() {
            self.bootstrap_blob(passphrase, new_entries)?
        } else {
            let mut merged = existing.clone();
            for (name, value) in new_entries {
                merged.insert(name.clone(), value.clone());
            }
            self.cipher()
                .encrypt(&render_document(&merged)?, passphrase)?
        };

        fs::atomic_write(self.path(), &blob)?;
        tracing::debug!(
            document = %self.path().display(),
            added = new_entries.len(),
            "vault document written"
        );
        Ok(())
    }

    /// Build the at-rest blob for a document that does not exist yet.
    fn bootstrap_blob(&self, passphrase: &str, new_entries: &VaultData) -> Result<String> {
        let mut entries = new_entries.iter();
        let Some((first_name, first_value)) = entries.next() else {
            return Err(GroundworkError::InvalidArgument(
                "bootstrap requires at least one entry".to_string(),
            ));
        };

        let seed_line = format!("{}: {}", first_name, first_value);
        let seed_blob = self.cipher().encrypt_seed(&seed_line, passphrase)?;

        if new_entries.len() == 1 {
            return Ok(seed_blob);
        }

        // The seed document only holds the first entry; the rest of this
        // run's entries must land in it before the final write or all but
        // the last secret would be lost.
        let mut document = parse_document(&self.cipher().decrypt(&seed_blob, passphrase)?)?;
        for (name, value) in entries {
            document.insert(name.clone(), value.clone());
        }

        self.cipher()
            .encrypt(&render_document(&document)?, passphrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::AesGcmCipher;
    use proptest::prelude::*;
    use std::path::Path;
    use std::sync::Arc;

    const PASS: &str = "test-passphrase";

    fn store_at(dir: &Path) -> VaultStore {
        VaultStore::new(dir.join("vault.yml"), Arc::new(AesGcmCipher::new()))
    }

    fn entries(pairs: &[(&str, &str)]) -> VaultData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_bootstrap_single_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(dir.path());

        store
            .upsert(PASS, &VaultData::new(), &entries(&[("vault_a", "one")]))
            .unwrap();

        assert!(store.exists());
        let loaded = store.load(PASS).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get("vault_a").map(String::as_str), Some("one"));
    }

    #[test]
    fn test_bootstrap_multi_secret_run_keeps_all() {
        // One run bootstrapping two services against an empty store must
        // not overwrite itself.
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(dir.path());

        store
            .upsert(
                PASS,
                &VaultData::new(),
                &entries(&[
                    ("vault_compositional_kanboard_backend_password", "kbsecret"),
                    ("vault_compositional_nextcloud_backend_password", "ncsecret"),
                ]),
            )
            .unwrap();

        let loaded = store.load(PASS).unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.contains_key("vault_compositional_kanboard_backend_password"));
        assert!(loaded.contains_key("vault_compositional_nextcloud_backend_password"));
    }

    #[test]
    fn test_merge_preserves_prior_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(dir.path());

        store
            .upsert(
                PASS,
                &VaultData::new(),
                &entries(&[(
                    "vault_compositional_database_root_password",
                    "dbsecret",
                )]),
            )
            .unwrap();

        let existing = store.load(PASS).unwrap();
        let app_key = "k".repeat(32);
        store
            .upsert(
                PASS,
                &existing,
                &entries(&[
                    ("vault_compositional_firefly_app_key", &app_key),
                    ("vault_compositional_firefly_backend_password", "ffsecret"),
                ]),
            )
            .unwrap();

        let loaded = store.load(PASS).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(
            loaded
                .get("vault_compositional_database_root_password")
                .map(String::as_str),
            Some("dbsecret")
        );
        assert_eq!(
            loaded
                .get("vault_compositional_firefly_app_key")
                .map(String::len),
            Some(32)
        );
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(dir.path());
        let new = entries(&[("vault_a", "one"), ("vault_b", "two")]);

        store.upsert(PASS, &VaultData::new(), &new).unwrap();
        let once = store.load(PASS).unwrap();

        store.upsert(PASS, &once, &new).unwrap();
        let twice = store.load(PASS).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_new_entries_win_on_collision() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(dir.path());

        store
            .upsert(PASS, &VaultData::new(), &entries(&[("vault_a", "old")]))
            .unwrap();
        let existing = store.load(PASS).unwrap();
        store
            .upsert(PASS, &existing, &entries(&[("vault_a", "new")]))
            .unwrap();

        let loaded = store.load(PASS).unwrap();
        assert_eq!(loaded.get("vault_a").map(String::as_str), Some("new"));
    }

    #[test]
    fn test_empty_new_entries_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(dir.path());

        store
            .upsert(PASS, &VaultData::new(), &VaultData::new())
            .unwrap();
        assert!(!store.exists());
    }

    #[test]
    fn test_concurrent_runs_race_and_lose_entries() {
        // There is no lock on the document: two runs that both loaded the
        // same state will clobber each other. This documents the known
        // limitation rather than guarding against it.
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(dir.path());

        store
            .upsert(PASS, &VaultData::new(), &entries(&[("vault_base", "b")]))
            .unwrap();

        let run_one_view = store.load(PASS).unwrap();
        let run_two_view = store.load(PASS).unwrap();

        store
            .upsert(PASS, &run_one_view, &entries(&[("vault_one", "1")]))
            .unwrap();
        store
            .upsert(PASS, &run_two_view, &entries(&[("vault_two", "2")]))
            .unwrap();

        let loaded = store.load(PASS).unwrap();
        assert!(loaded.contains_key("vault_base"));
        assert!(loaded.contains_key("vault_two"));
        // The first run's write was lost to the second run's stale view.
        assert!(!loaded.contains_key("vault_one"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn bootstrap_run_of_n_secrets_keeps_all(
            names in proptest::collection::hash_set("[a-z_]{4,24}", 2..6),
        ) {
            let dir = tempfile::tempdir().unwrap();
            let store = store_at(dir.path());

            let new: VaultData = names
                .iter()
                .map(|n| (format!("vault_{}", n), format!("secret_{}", n)))
                .collect();

            store.upsert(PASS, &VaultData::new(), &new).unwrap();
            let loaded = store.load(PASS).unwrap();

            prop_assert_eq!(loaded.len(), new.len());
            for (name, value) in &new {
                prop_assert_eq!(loaded.get(name), Some(value));
            }
        }
    }
}
