//! Plaintext references to vaulted variables.

use groundwork_core::util::fs;
use groundwork_types::Result;
use std::path::Path;

/// Append the indirection line for a vaulted variable.
///
/// The plaintext file never holds the secret itself, only
/// `name: "{{ vault_name }}"`; the templating layer resolves the reference
/// out of the co-located vault document at deploy time. Appending is not
/// transactional with the vault write.
pub fn append_reference(path: impl AsRef<Path>, variable_name: &str) -> Result<()> {
    fs::append_line(
        path,
        &format!("\n{0}: \"{{{{ vault_{0} }}}}\"", variable_name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundwork_core::util::fs::slurp;

    #[test]
    fn test_reference_line_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all.yml");

        append_reference(&path, "compositional_wordpress_backend_password").unwrap();

        assert_eq!(
            slurp(&path).unwrap(),
            "\ncompositional_wordpress_backend_password: \
             \"{{ vault_compositional_wordpress_backend_password }}\""
        );
    }

    #[test]
    fn test_references_append_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all.yml");

        append_reference(&path, "first_var").unwrap();
        append_reference(&path, "second_var").unwrap();

        let contents = slurp(&path).unwrap();
        let first = contents.find("first_var").unwrap();
        let second = contents.find("second_var").unwrap();
        assert!(first < second);
    }
}
