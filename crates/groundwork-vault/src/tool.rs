//! Subprocess cipher backed by an `ansible-vault`-compatible tool.
//!
//! Used when an operator points `--toolpath` at an installed toolchain
//! instead of the in-process cipher. The passphrase is handed to the tool
//! through a temporary password file that is removed on every exit path,
//! success or failure.

use groundwork_core::util::process;
use groundwork_types::{GroundworkError, Result, VaultCipher};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

const TOOL_NAME: &str = "ansible-vault";

/// Cipher that shells out to an external vault tool.
#[derive(Debug, Clone, Default)]
pub struct ToolCipher {
    bin_dir: Option<PathBuf>,
}

impl ToolCipher {
    /// Create a cipher using the tool in `bin_dir`, or from `PATH` when
    /// `None`.
    pub fn new(bin_dir: Option<PathBuf>) -> Self {
        Self { bin_dir }
    }

    fn tool(&self) -> String {
        match &self.bin_dir {
            Some(dir) => dir.join(TOOL_NAME).to_string_lossy().into_owned(),
            None => TOOL_NAME.to_string(),
        }
    }

    /// Run the tool with the passphrase staged in a scoped password file.
    ///
    /// `NamedTempFile` unlinks the file when the guard drops, so the
    /// passphrase never outlives the call regardless of how it ends.
    fn run_with_pass_file(
        &self,
        passphrase: &str,
        subcommand: &str,
        extra: &[&str],
        stdin: Option<&str>,
    ) -> Result<process::CommandOutput> {
        let mut pass_file = tempfile::NamedTempFile::new()?;
        pass_file.write_all(passphrase.as_bytes())?;
        pass_file.flush()?;

        let pass_path = pass_file.path().to_string_lossy().into_owned();
        let mut full_args = vec![subcommand, "--vault-password-file", &pass_path];
        full_args.extend_from_slice(extra);

        let mut out = process::run_in(
            &self.tool(),
            &full_args,
            Path::new("."),
            &HashMap::new(),
            stdin,
        )?;

        // A chatty tool can echo its inputs; scrub the passphrase before
        // the stderr can reach an error message.
        out.stderr = process::redact_secrets(&out.stderr, &[passphrase]);
        Ok(out)
    }
}

impl VaultCipher for ToolCipher {
    fn encrypt(&self, plaintext: &str, passphrase: &str) -> Result<String> {
        let out = self
            .run_with_pass_file(passphrase, "encrypt", &["--output", "-"], Some(plaintext))?
            .require_success(TOOL_NAME)?;
        Ok(out.stdout)
    }

    fn decrypt(&self, blob: &str, passphrase: &str) -> Result<String> {
        let out =
            self.run_with_pass_file(passphrase, "decrypt", &["--output", "-"], Some(blob))?;

        if !out.success() {
            // The tool reports a wrong passphrase or corrupt input via its
            // exit code; both fall under the decryption contract.
            return Err(GroundworkError::DecryptionFailed(format!(
                "{} exited {}: {}",
                TOOL_NAME,
                out.code,
                out.stderr.trim()
            )));
        }

        Ok(out.stdout)
    }

    fn encrypt_seed(&self, line: &str, passphrase: &str) -> Result<String> {
        let out = self
            .run_with_pass_file(passphrase, "encrypt_string", &[line], None)?
            .require_success(TOOL_NAME)?;

        // encrypt_string emits an indented `!vault |` block; strip the
        // header line and the indentation to get a bare document the
        // decrypt side accepts.
        let stripped: Vec<&str> = out.stdout.lines().skip(1).collect();
        Ok(stripped.join("\n").replace(' ', ""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_path_resolution() {
        let bare = ToolCipher::new(None);
        assert_eq!(bare.tool(), "ansible-vault");

        let dir = ToolCipher::new(Some(PathBuf::from("/opt/ansible/bin")));
        assert_eq!(dir.tool(), "/opt/ansible/bin/ansible-vault");
    }

    #[test]
    fn test_missing_tool_surfaces_an_error() {
        let cipher = ToolCipher::new(Some(PathBuf::from("/nonexistent/bin")));
        assert!(cipher.encrypt("vault_a: one\n", "pw").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_passphrase_never_reaches_the_error_message() {
        use std::os::unix::fs::PermissionsExt;

        // Stand-in tool that leaks its password file to stderr and fails
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join(TOOL_NAME);
        std::fs::write(&script, "#!/bin/sh\ncat \"$3\" >&2\nexit 1\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let cipher = ToolCipher::new(Some(dir.path().to_path_buf()));
        let err = cipher
            .encrypt("vault_a: one\n", "sup3r-secret-pass")
            .unwrap_err();

        let message = err.to_string();
        assert!(!message.contains("sup3r-secret-pass"));
        assert!(message.contains("***REDACTED***"));
    }
}
