use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::value::RawValue;

use crate::data::types::AvailableContract;
use crate::error::ArtifactError;

pub const DEFAULT_ARTIFACTS_DIR: &str = "contracts";
pub const DEFAULT_TEMPLATE_PATH: &str = "artifacts/contracts/nft.sol/MyToken.json";

/// `{"contractName", "bytecode", "abi"}` as written for each deployable contract.
#[derive(Deserialize)]
struct ArtifactFile<'a> {
    #[serde(rename = "contractName", default)]
    contract_name: String,
    #[serde(default)]
    bytecode: String,
    #[serde(borrow)]
    abi: Option<&'a RawValue>,
}

/// Hardhat build output for a single contract.
#[derive(Deserialize)]
struct TemplateFile<'a> {
    #[serde(default)]
    bytecode: String,
    #[serde(borrow)]
    abi: Option<&'a RawValue>,
}

/// Reads compiled contracts that the console can deploy.
pub struct ArtifactStore {
    dir: PathBuf,
    template: Option<PathBuf>,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>, template: Option<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            template,
        }
    }

    /// Every deployable contract: the artifact directory sorted by file name,
    /// then the build template if one exists.
    ///
    /// Unreadable or malformed files are skipped, as are files without a
    /// contract name. Only a missing directory is an error.
    pub fn available(&self) -> Result<Vec<AvailableContract>, ArtifactError> {
        let mut contracts = self.scan_dir()?;

        if let Some(ref template) = self.template {
            if template.exists() {
                match Self::template(template) {
                    Ok(contract) => contracts.push(contract),
                    Err(e) => tracing::warn!("skipping build template: {e}"),
                }
            }
        }

        Ok(contracts)
    }

    /// Load a hardhat build output as a deploy target named after its file stem.
    pub fn template(path: &Path) -> Result<AvailableContract, ArtifactError> {
        let data = fs::read_to_string(path).map_err(|source| ArtifactError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: TemplateFile = serde_json::from_str(&data).map_err(|source| {
            ArtifactError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;

        if file.bytecode.trim().is_empty() || file.bytecode.trim() == "0x" {
            return Err(ArtifactError::EmptyBytecode(path.to_path_buf()));
        }

        let contract_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Contract".to_string());

        Ok(AvailableContract {
            contract_name,
            file_path: path.to_path_buf(),
            bytecode: file.bytecode,
            abi: abi_string(file.abi),
        })
    }

    fn scan_dir(&self) -> Result<Vec<AvailableContract>, ArtifactError> {
        let dir = self.resolve_dir();
        tracing::debug!("looking for contracts in {}", dir.display());

        let entries = fs::read_dir(&dir).map_err(|source| ArtifactError::ReadDir {
            path: dir.clone(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut contracts = Vec::with_capacity(paths.len());
        for path in paths {
            let data = match fs::read_to_string(&path) {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!("failed to read {}: {e}", path.display());
                    continue;
                }
            };

            let file: ArtifactFile = match serde_json::from_str(&data) {
                Ok(f) => f,
                Err(e) => {
                    tracing::warn!("failed to parse {}: {e}", path.display());
                    continue;
                }
            };

            if file.contract_name.is_empty() {
                tracing::warn!("contract name is empty in {}", path.display());
                continue;
            }

            contracts.push(AvailableContract {
                contract_name: file.contract_name,
                file_path: path,
                bytecode: file.bytecode,
                abi: abi_string(file.abi),
            });
        }

        tracing::debug!("found {} deployable contracts", contracts.len());
        Ok(contracts)
    }

    /// The configured directory, or the one next to the executable when a
    /// relative directory is missing from the working directory.
    fn resolve_dir(&self) -> PathBuf {
        if self.dir.exists() || self.dir.is_absolute() {
            return self.dir.clone();
        }

        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|parent| parent.join(&self.dir)))
            .filter(|candidate| candidate.exists())
            .unwrap_or_else(|| self.dir.clone())
    }
}

/// ABIs arrive either as a JSON array or as a JSON string holding one.
fn abi_string(abi: Option<&RawValue>) -> String {
    let Some(raw) = abi else {
        return "[]".to_string();
    };
    match serde_json::from_str::<String>(raw.get()) {
        Ok(inner) => inner,
        Err(_) => raw.get().to_string(),
    }
}
