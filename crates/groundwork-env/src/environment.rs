//! Environment repository representation.

use groundwork_core::util::data;
use groundwork_types::{DomainName, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A checked-out environment repository being provisioned.
///
/// The layout mirrors the template repository: per-platform variables under
/// `group_vars/compositional/` (the plaintext `all.yml` and the encrypted
/// `vault.yml` side by side), and environment-wide variables under
/// `group_vars/all/`.
#[derive(Debug, Clone)]
pub struct Environment {
    domain: DomainName,
    services: Vec<String>,
    root: PathBuf,
}

#[derive(Serialize)]
struct PlatformVars<'a> {
    compositional_services: &'a [String],
}

#[derive(Serialize)]
struct GlobalVars<'a> {
    environment_domain: &'a str,
    environment_admin: &'a str,
}

impl Environment {
    /// Bind an environment to its domain, service list, and checkout root.
    pub fn new(domain: DomainName, services: Vec<String>, root: impl AsRef<Path>) -> Self {
        Self {
            domain,
            services,
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The client domain.
    pub fn domain(&self) -> &DomainName {
        &self.domain
    }

    /// The requested services, in request order.
    pub fn services(&self) -> &[String] {
        &self.services
    }

    /// The checkout root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the platform variable files.
    pub fn platform_vars_dir(&self) -> PathBuf {
        self.root.join("group_vars").join("compositional")
    }

    /// The plaintext platform variables file.
    pub fn vars_file(&self) -> PathBuf {
        self.platform_vars_dir().join("all.yml")
    }

    /// The encrypted vault document, co-located with the variables file.
    pub fn vault_file(&self) -> PathBuf {
        self.platform_vars_dir().join("vault.yml")
    }

    /// The environment-wide variables file.
    pub fn global_vars_file(&self) -> PathBuf {
        self.root.join("group_vars").join("all").join("all.yml")
    }

    /// Write the initial non-secret variable files.
    ///
    /// Seeds the platform file with the requested service list and the
    /// global file with the domain and admin account.
    pub fn write_initial_vars(&self, admin: &str) -> Result<()> {
        std::fs::create_dir_all(self.platform_vars_dir())?;
        std::fs::create_dir_all(self.root.join("group_vars").join("all"))?;

        data::save_yaml_file(
            self.vars_file(),
            &PlatformVars {
                compositional_services: &self.services,
            },
        )?;
        data::save_yaml_file(
            self.global_vars_file(),
            &GlobalVars {
                environment_domain: self.domain.as_str(),
                environment_admin: admin,
            },
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundwork_core::util::data::load_yaml_file;

    fn environment(dir: &Path) -> Environment {
        Environment::new(
            DomainName::new("client.example.com").unwrap(),
            vec!["database".to_string(), "wordpress".to_string()],
            dir,
        )
    }

    #[test]
    fn test_layout_paths() {
        let env = environment(Path::new("/tmp/environment-client_example_com"));
        assert_eq!(
            env.vars_file(),
            Path::new("/tmp/environment-client_example_com/group_vars/compositional/all.yml")
        );
        assert_eq!(
            env.vault_file(),
            Path::new("/tmp/environment-client_example_com/group_vars/compositional/vault.yml")
        );
        assert_eq!(
            env.global_vars_file(),
            Path::new("/tmp/environment-client_example_com/group_vars/all/all.yml")
        );
    }

    #[test]
    fn test_initial_vars_contents() {
        let dir = tempfile::tempdir().unwrap();
        let env = environment(dir.path());
        env.write_initial_vars("admin").unwrap();

        let platform = load_yaml_file(env.vars_file()).unwrap();
        assert_eq!(platform["compositional_services"][0], "database");
        assert_eq!(platform["compositional_services"][1], "wordpress");

        let global = load_yaml_file(env.global_vars_file()).unwrap();
        assert_eq!(global["environment_domain"], "client.example.com");
        assert_eq!(global["environment_admin"], "admin");
    }
}
