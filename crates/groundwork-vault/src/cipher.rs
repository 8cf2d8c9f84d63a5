//! In-process cipher for vault documents.
//!
//! At-rest layout: a format header line, then the base64 encoding of
//! `salt(16) || nonce(12) || ciphertext` wrapped at 80 columns. The key is
//! derived from the passphrase with PBKDF2-HMAC-SHA256.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use groundwork_types::{GroundworkError, Result, VaultCipher};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

/// First line of every document this cipher produces.
pub const FORMAT_HEADER: &str = "$GROUNDWORK_VAULT;1.0;AES256-GCM";

const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const PBKDF2_ROUNDS: u32 = 10_000;
const WRAP_WIDTH: usize = 80;

/// Default AES-256-GCM vault cipher.
#[derive(Debug, Clone, Default)]
pub struct AesGcmCipher;

impl AesGcmCipher {
    /// Create the cipher.
    pub fn new() -> Self {
        Self
    }

    fn derive_key(passphrase: &str, salt: &[u8]) -> [u8; 32] {
        let mut key = [0u8; 32];
        pbkdf2::pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, PBKDF2_ROUNDS, &mut key);
        key
    }
}

impl VaultCipher for AesGcmCipher {
    fn encrypt(&self, plaintext: &str, passphrase: &str) -> Result<String> {
        let mut salt = [0u8; SALT_LEN];
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut salt);
        OsRng.fill_bytes(&mut nonce);

        let key = Self::derive_key(passphrase, &salt);
        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| GroundworkError::Vault(format!("Failed to initialise cipher: {}", e)))?;

        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
            .map_err(|_| GroundworkError::Vault("Encryption failed".to_string()))?;

        let mut raw = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
        raw.extend_from_slice(&salt);
        raw.extend_from_slice(&nonce);
        raw.extend_from_slice(&ciphertext);
        let encoded = BASE64.encode(raw);

        let mut blob = String::with_capacity(FORMAT_HEADER.len() + encoded.len() + 8);
        blob.push_str(FORMAT_HEADER);
        for chunk in encoded.as_bytes().chunks(WRAP_WIDTH) {
            blob.push('\n');
            // chunks of valid base64 are always ASCII
            blob.push_str(std::str::from_utf8(chunk).map_err(|_| {
                GroundworkError::Vault("Non-ASCII base64 output".to_string())
            })?);
        }
        blob.push('\n');

        Ok(blob)
    }

    fn decrypt(&self, blob: &str, passphrase: &str) -> Result<String> {
        let mut lines = blob.lines();
        let header = lines
            .next()
            .ok_or_else(|| GroundworkError::DecryptionFailed("Empty vault document".to_string()))?;

        if header.trim() != FORMAT_HEADER {
            return Err(GroundworkError::DecryptionFailed(format!(
                "Unrecognized vault format header: {}",
                header.trim()
            )));
        }

        let body: String = lines.map(str::trim).collect();
        let raw = BASE64.decode(body).map_err(|_| {
            GroundworkError::DecryptionFailed("Corrupt vault document body".to_string())
        })?;

        if raw.len() <= SALT_LEN + NONCE_LEN {
            return Err(GroundworkError::DecryptionFailed(
                "Truncated vault document".to_string(),
            ));
        }

        let (salt, rest) = raw.split_at(SALT_LEN);
        let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

        let key = Self::derive_key(passphrase, salt);
        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| GroundworkError::Vault(format!("Failed to initialise cipher: {}", e)))?;

        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| {
                GroundworkError::DecryptionFailed(
                    "Wrong passphrase or corrupt vault document".to_string(),
                )
            })?;

        String::from_utf8(plaintext).map_err(|_| {
            GroundworkError::DecryptionFailed("Decrypted document is not UTF-8".to_string())
        })
    }
}
