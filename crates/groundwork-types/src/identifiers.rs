//! Type-safe identifiers derived from a client domain.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{GroundworkError, Result};

/// A validated client domain name.
///
/// Domain names must:
/// - Contain only lowercase letters, digits, hyphens, and dots
/// - Start and end with a letter or digit
/// - Contain at least one dot separating non-empty labels
///
/// Every on-disk and remote name the provisioner produces is derived from
/// the domain, so validation happens once, here.
///
/// # Example
///
/// ```
/// use groundwork_types::DomainName;
///
/// let domain = DomainName::new("client.example.com").unwrap();
/// assert_eq!(domain.underscored(), "client_example_com");
/// assert_eq!(domain.environment_name(), "environment-client_example_com");
///
/// // Invalid names are rejected
/// assert!(DomainName::new("No-Caps.com").is_err());
/// assert!(DomainName::new(".leading.dot").is_err());
/// assert!(DomainName::new("nodot").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainName(String);

impl DomainName {
    /// Create a new validated domain name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name doesn't meet validation requirements.
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref();
        if !Self::is_valid(name) {
            crate::bail!(
                Validation,
                "Invalid domain name '{}': must contain only lowercase letters, digits, hyphens, \
                and dots, with at least one dot between non-empty labels",
                name
            );
        }
        Ok(Self(name.to_string()))
    }

    /// Check if a name is valid without allocating.
    pub fn is_valid(name: &str) -> bool {
        if !name.contains('.') {
            return false;
        }

        name.split('.').all(|label| {
            let Some(first) = label.chars().next() else {
                return false;
            };
            let Some(last) = label.chars().last() else {
                return false;
            };

            (first.is_ascii_lowercase() || first.is_ascii_digit())
                && (last.is_ascii_lowercase() || last.is_ascii_digit())
                && label
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        })
    }

    /// Get the domain as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The domain with dots replaced by underscores.
    ///
    /// Used wherever the hosting side cannot carry dots in a name.
    pub fn underscored(&self) -> String {
        self.0.replace('.', "_")
    }

    /// The name of the environment repository for this domain.
    ///
    /// For example, "client.example.com" yields
    /// "environment-client_example_com".
    pub fn environment_name(&self) -> String {
        format!("environment-{}", self.underscored())
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DomainName {
    type Err = GroundworkError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_domain_validation() {
        assert!(DomainName::new("example.com").is_ok());
        assert!(DomainName::new("sub.example.com").is_ok());
        assert!(DomainName::new("my-client.example.co.uk").is_ok());
        assert!(DomainName::new("123.example.com").is_ok());

        assert!(DomainName::new("Example.com").is_err());
        assert!(DomainName::new("nodot").is_err());
        assert!(DomainName::new(".example.com").is_err());
        assert!(DomainName::new("example.com.").is_err());
        assert!(DomainName::new("-bad.example.com").is_err());
        assert!(DomainName::new("bad-.example.com").is_err());
        assert!(DomainName::new("").is_err());
        assert!(DomainName::new("under_score.com").is_err());
    }

    #[test]
    fn test_environment_name() {
        let domain = DomainName::new("client.example.com").unwrap();
        assert_eq!(domain.environment_name(), "environment-client_example_com");
    }

    proptest! {
        #[test]
        fn underscored_never_contains_dots(
            labels in proptest::collection::vec("[a-z0-9][a-z0-9-]{0,5}[a-z0-9]", 2..5)
        ) {
            let name = labels.join(".");
            if let Ok(domain) = DomainName::new(&name) {
                prop_assert!(!domain.underscored().contains('.'));
                prop_assert_eq!(
                    domain.underscored().matches('_').count(),
                    name.matches('.').count()
                );
            }
        }
    }
}
