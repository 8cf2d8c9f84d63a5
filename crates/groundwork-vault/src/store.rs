//! Vault document access.

use groundwork_core::util::fs;
use groundwork_types::{GroundworkError, Result, VaultCipher};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The decrypted contents of a vault document: a flat ordered mapping from
/// `vault_<variable>` to secret value.
pub type VaultData = IndexMap<String, String>;

/// One environment's encrypted secret store.
///
/// A store is bound to an on-disk path and a cipher; it does not hold the
/// passphrase. Reading is side-effect free; writing goes through the merge
/// engine (`upsert`).
pub struct VaultStore {
    path: PathBuf,
    cipher: Arc<dyn VaultCipher>,
}

impl VaultStore {
    /// Bind a store to a document path and cipher.
    pub fn new(path: impl AsRef<Path>, cipher: Arc<dyn VaultCipher>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cipher,
        }
    }

    /// The document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a document exists on disk.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub(crate) fn cipher(&self) -> &dyn VaultCipher {
        self.cipher.as_ref()
    }

    /// Load and decrypt the document.
    ///
    /// A missing document yields an empty mapping; callers distinguish "not
    /// found" from "found but empty" via `exists`, not content. A document
    /// that cannot be decrypted fails with `DecryptionFailed`; an unreadable
    /// path fails with `Io`.
    pub fn load(&self, passphrase: &str) -> Result<VaultData> {
        if !self.exists() {
            return Ok(VaultData::new());
        }

        let blob = fs::slurp(&self.path)?;
        let plaintext = self.cipher.decrypt(&blob, passphrase)?;
        parse_document(&plaintext)
    }
}

/// Parse a decrypted document into its flat mapping.
pub(crate) fn parse_document(plaintext: &str) -> Result<VaultData> {
    serde_yaml::from_str(plaintext).map_err(|e| {
        GroundworkError::DecryptionFailed(format!(
            "Decrypted document is not a flat mapping: {}",
            e
        ))
    })
}

/// Serialize a mapping back to the document plaintext.
pub(crate) fn render_document(data: &VaultData) -> Result<String> {
    serde_yaml::to_string(data).map_err(Into::into)
}
