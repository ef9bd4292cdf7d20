use alloy::primitives::Address;

use crate::data::types::{AirdropReceipt, DeployedContract};
use crate::error::RegistryError;

/// Workflow data carried between pages for one operator session.
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    pub uploaded_addresses: Vec<Address>,
    pub selected_contract: Option<Address>,
    /// URI the selected contract was deployed with.
    pub current_token_uri: String,
    /// URI entered on the airdrop page, set on-chain before minting.
    pub token_uri: String,
    pub nft_id: String,
    /// In-memory mirror of the registry file, oldest first.
    pub deployed: Vec<DeployedContract>,
    /// Why the registry could not be loaded; `deployed` is empty while set.
    pub registry_error: Option<String>,
    pub last_airdrop: Option<AirdropReceipt>,
}

impl SharedState {
    pub fn from_registry(loaded: Result<Vec<DeployedContract>, RegistryError>) -> Self {
        match loaded {
            Ok(deployed) => Self {
                deployed,
                ..Default::default()
            },
            Err(e) => Self {
                registry_error: Some(e.to_string()),
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_from_registry_keeps_load_error() {
        let source = serde_json::from_str::<Vec<DeployedContract>>("not json").unwrap_err();
        let state = SharedState::from_registry(Err(RegistryError::Parse {
            path: PathBuf::from("deployed_contracts.json"),
            source,
        }));
        assert!(state.deployed.is_empty());
        let err = state.registry_error.unwrap();
        assert!(err.starts_with("failed to parse registry deployed_contracts.json"), "{err}");
    }

    #[test]
    fn test_from_registry_ok() {
        let state = SharedState::from_registry(Ok(Vec::new()));
        assert!(state.registry_error.is_none());
    }
}
