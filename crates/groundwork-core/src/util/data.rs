//! YAML data handling utilities.

use groundwork_types::Result;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load YAML from string.
pub fn load_yaml(content: &str) -> Result<Value> {
    serde_yaml::from_str(content).map_err(Into::into)
}

/// Load YAML from file.
pub fn load_yaml_file(path: impl AsRef<Path>) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    load_yaml(&content)
}

/// Save a serializable value to a YAML file.
pub fn save_yaml_file(path: impl AsRef<Path>, data: &impl Serialize) -> Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    fs::write(path, yaml)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_yaml_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all.yml");

        let mut data = BTreeMap::new();
        data.insert("environment_domain", "example.com");
        save_yaml_file(&path, &data).unwrap();

        let value = load_yaml_file(&path).unwrap();
        assert_eq!(value["environment_domain"], "example.com");
    }
}
