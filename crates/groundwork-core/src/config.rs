//! Configuration management for Groundwork.
//!
//! Configuration values are resolved in this priority order:
//! 1. `GROUNDWORK_*` environment variables
//! 2. Values loaded from `~/.groundwork/config.yml`
//! 3. Built-in defaults
//!
//! ## Example
//!
//! ```no_run
//! use groundwork_core::config::Config;
//!
//! let config = Config::load_default()?;
//! println!("publishing under group {}", config.gitlab_group);
//! # Ok::<(), groundwork_types::GroundworkError>(())
//! ```

use groundwork_types::{GroundworkError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::util::fs::expand_path;

/// Operator-side configuration for the provisioner.
///
/// Every field has a working default; the config file and environment
/// variables only need to name what differs for a given operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitLab API base URL
    pub gitlab_url: String,

    /// GitLab group that owns environment repositories
    pub gitlab_group: String,

    /// SSH clone prefix for repositories under the group
    pub git_prefix: String,

    /// Name of the template repository cloned for every new environment
    pub template_repo: String,

    /// Directory that scratch checkouts are created under
    pub work_dir: PathBuf,

    /// Admin account name seeded into every environment
    pub environment_admin: String,

    /// GitLab personal access token; consulted after the `GITLAB_TOKEN`
    /// environment variable and before the operator vault
    pub gitlab_token: Option<String>,

    /// Encrypted operator vault holding the GitLab token, if any
    pub ops_vault_file: Option<PathBuf>,

    /// File holding the passphrase for `ops_vault_file`
    pub ops_vault_pass_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gitlab_url: "https://gitlab.com".to_string(),
            gitlab_group: "compositionalenterprises".to_string(),
            git_prefix: "git@gitlab.com:compositionalenterprises".to_string(),
            template_repo: "environment".to_string(),
            work_dir: std::env::temp_dir(),
            environment_admin: "admin".to_string(),
            gitlab_token: None,
            ops_vault_file: None,
            ops_vault_pass_file: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Looks for `~/.groundwork/config.yml`; a missing file yields the
    /// built-in defaults. Environment overrides are applied either way.
    pub fn load_default() -> Result<Self> {
        let path = dirs::home_dir()
            .map(|home| home.join(".groundwork").join("config.yml"))
            .unwrap_or_else(|| PathBuf::from(".groundwork/config.yml"));
        Self::load(path)
    }

    /// Load configuration from a specific file path.
    ///
    /// If the file doesn't exist, the defaults are used.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = expand_path(path);

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| {
                GroundworkError::Config(format!("Failed to read config file {:?}: {}", path, e))
            })?;
            serde_yaml::from_str(&content).map_err(|e| {
                GroundworkError::Config(format!("Failed to parse config file {:?}: {}", path, e))
            })?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// The SSH clone URL for the template repository.
    pub fn template_url(&self) -> String {
        format!("{}/{}.git", self.git_prefix, self.template_repo)
    }

    /// The SSH push URL for an environment repository.
    pub fn environment_url(&self, environment_name: &str) -> String {
        format!("{}/{}.git", self.git_prefix, environment_name)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("GROUNDWORK_GITLAB_URL") {
            self.gitlab_url = url;
        }
        if let Ok(group) = std::env::var("GROUNDWORK_GITLAB_GROUP") {
            self.gitlab_group = group;
        }
        if let Ok(prefix) = std::env::var("GROUNDWORK_GIT_PREFIX") {
            self.git_prefix = prefix;
        }
        if let Ok(dir) = std::env::var("GROUNDWORK_WORK_DIR") {
            self.work_dir = PathBuf::from(dir);
        }
        if let Ok(token) = std::env::var("GROUNDWORK_GITLAB_TOKEN") {
            self.gitlab_token = Some(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.gitlab_group, "compositionalenterprises");
        assert_eq!(
            config.template_url(),
            "git@gitlab.com:compositionalenterprises/environment.git"
        );
        assert_eq!(
            config.environment_url("environment-example_com"),
            "git@gitlab.com:compositionalenterprises/environment-example_com.git"
        );
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load("/nonexistent/groundwork/config.yml").unwrap();
        assert_eq!(config.environment_admin, "admin");
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "gitlab_group: otherco\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.gitlab_group, "otherco");
        // Untouched fields keep their defaults
        assert_eq!(config.template_repo, "environment");
    }

    #[test]
    fn test_load_token_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "gitlab_token: glpat-abc123\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.gitlab_token.as_deref(), Some("glpat-abc123"));

        // Absent from the file means absent, not empty
        let config = Config::load("/nonexistent/groundwork/config.yml").unwrap();
        assert_eq!(config.gitlab_token, None);
    }
}
