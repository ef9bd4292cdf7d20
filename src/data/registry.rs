use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::data::types::{DeployedContract, DeployedContracts};
use crate::error::RegistryError;

pub const DEFAULT_REGISTRY_FILE: &str = "deployed_contracts.json";

/// Append-only record of deployed contracts, stored as one JSON document.
///
/// Every save rewrites the whole file. There is no locking: one console per
/// working directory.
pub struct Registry {
    path: PathBuf,
}

impl Registry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All recorded contracts, oldest first. A missing file is an empty registry.
    pub fn list(&self) -> Result<Vec<DeployedContract>, RegistryError> {
        Ok(self.load()?.contracts)
    }

    /// Append a record stamped with the current UTC time and rewrite the file.
    pub fn save(
        &self,
        address: &str,
        token_uri: &str,
        abi: &str,
    ) -> Result<DeployedContract, RegistryError> {
        let mut registry = self.load()?;

        let record = DeployedContract {
            address: address.to_string(),
            token_uri: token_uri.to_string(),
            abi: abi.to_string(),
            deploy_time: Utc::now(),
        };
        registry.contracts.push(record.clone());

        let json = serde_json::to_string_pretty(&registry).map_err(RegistryError::Serialize)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| RegistryError::Write {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        fs::write(&self.path, json).map_err(|source| RegistryError::Write {
            path: self.path.clone(),
            source,
        })?;

        Ok(record)
    }

    fn load(&self) -> Result<DeployedContracts, RegistryError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(d) => d,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(DeployedContracts::default()),
            Err(source) => {
                return Err(RegistryError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&data).map_err(|source| RegistryError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR_A: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
    const ADDR_B: &str = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512";

    fn temp_registry() -> (tempfile::TempDir, Registry) {
        let dir = tempfile::tempdir().unwrap();
        let registry = Registry::new(dir.path().join(DEFAULT_REGISTRY_FILE));
        (dir, registry)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (_dir, registry) = temp_registry();
        assert!(registry.list().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_list() {
        let (_dir, registry) = temp_registry();
        let before = Utc::now();
        registry.save(ADDR_A, "https://example.com/{id}.json", "[]").unwrap();

        let contracts = registry.list().unwrap();
        assert_eq!(contracts.len(), 1);
        let c = &contracts[0];
        assert_eq!(c.address, ADDR_A);
        assert_eq!(c.token_uri, "https://example.com/{id}.json");
        assert_eq!(c.abi, "[]");
        let elapsed = (c.deploy_time - before).num_seconds().abs();
        assert!(elapsed <= 5, "timestamp off by {elapsed}s");
    }

    #[test]
    fn test_save_appends_in_order() {
        let (_dir, registry) = temp_registry();
        registry.save(ADDR_A, "https://a.example", "[]").unwrap();
        let first = registry.list().unwrap();

        registry.save(ADDR_B, "https://b.example", "[]").unwrap();
        registry.save(ADDR_A, "https://c.example", "[]").unwrap();

        let contracts = registry.list().unwrap();
        assert_eq!(contracts.len(), 3);
        assert_eq!(contracts[0], first[0]);
        assert_eq!(contracts[1].address, ADDR_B);
        assert_eq!(contracts[2].token_uri, "https://c.example");
    }

    #[test]
    fn test_earlier_records_unchanged_on_disk() {
        let (_dir, registry) = temp_registry();
        registry.save(ADDR_A, "https://a.example", r#"[{"type":"constructor"}]"#).unwrap();
        let first = fs::read_to_string(registry.path()).unwrap();
        let first_record = first
            .trim_end()
            .trim_end_matches('}')
            .trim_end()
            .trim_end_matches(']')
            .trim_end()
            .to_string();

        registry.save(ADDR_B, "https://b.example", "[]").unwrap();
        let second = fs::read_to_string(registry.path()).unwrap();
        assert!(second.starts_with(&first_record));
    }

    #[test]
    fn test_file_format() {
        let (_dir, registry) = temp_registry();
        registry.save(ADDR_A, "https://a.example", "[]").unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(registry.path()).unwrap()).unwrap();
        let entry = &raw["contracts"][0];
        assert_eq!(entry["address"], ADDR_A);
        assert_eq!(entry["tokenURI"], "https://a.example");
        assert_eq!(entry["abi"], "[]");
        let time = entry["deploy_time"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(time).is_ok());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let (_dir, registry) = temp_registry();
        fs::write(registry.path(), "not json").unwrap();
        assert!(matches!(registry.list(), Err(RegistryError::Parse { .. })));
        assert!(registry.save(ADDR_A, "https://a.example", "[]").is_err());
        assert_eq!(fs::read_to_string(registry.path()).unwrap(), "not json");
    }
}
