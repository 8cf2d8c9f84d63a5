//! Core trait definitions for Groundwork abstractions.

use crate::errors::Result;

/// Capability interface for encrypting and decrypting vault documents.
///
/// The vault store and merge engine depend only on this trait; an
/// implementation may link a cipher in-process or shell out to an external
/// tool. A blob produced by `encrypt` must be decryptable only with the
/// same passphrase, and is otherwise opaque to the caller.
pub trait VaultCipher: Send + Sync {
    /// Encrypt a plaintext document under a passphrase.
    ///
    /// Returns the full at-rest textual form, including any format header
    /// the implementation carries.
    fn encrypt(&self, plaintext: &str, passphrase: &str) -> Result<String>;

    /// Decrypt an at-rest blob back to its plaintext document.
    ///
    /// Fails with `DecryptionFailed` on a wrong passphrase or a corrupt
    /// blob.
    fn decrypt(&self, blob: &str, passphrase: &str) -> Result<String>;

    /// Encrypt the single seed line that bootstraps a brand-new document.
    ///
    /// Implementations whose bootstrap path differs from whole-document
    /// encryption (the external tool takes one `key: value` line and
    /// returns a headered, indented block) override this; the default is
    /// plain `encrypt`.
    fn encrypt_seed(&self, line: &str, passphrase: &str) -> Result<String> {
        self.encrypt(line, passphrase)
    }
}
