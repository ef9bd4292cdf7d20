use std::path::PathBuf;

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, B256, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A contract recorded in the registry after a successful deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedContract {
    pub address: String,
    #[serde(rename = "tokenURI")]
    pub token_uri: String,
    pub abi: String,
    pub deploy_time: DateTime<Utc>,
}

impl DeployedContract {
    pub fn choice(&self) -> ContractChoice {
        ContractChoice {
            address: self.address.clone(),
            deploy_time: self.deploy_time.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// On-disk shape of the registry file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeployedContracts {
    #[serde(default)]
    pub contracts: Vec<DeployedContract>,
}

/// A compiled contract that can be offered as a deploy target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableContract {
    pub contract_name: String,
    pub file_path: PathBuf,
    pub bytecode: String,
    pub abi: String,
}

/// Row shown on the contract selection screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractChoice {
    pub address: String,
    pub deploy_time: String,
}

#[derive(Debug, Clone, Default)]
pub struct DeployParams {
    /// Creation bytecode, hex with or without `0x`.
    pub bytecode: String,
    /// Full contract ABI; its constructor is used when it declares one.
    pub abi: Option<String>,
    pub initial_uri: String,
    /// Defaults to the signer address.
    pub initial_owner: Option<Address>,
    pub gas_limit: Option<u64>,
    pub value: Option<U256>,
}

#[derive(Debug, Clone)]
pub struct CallParams {
    pub contract: Address,
    /// JSON ABI containing at least the called function.
    pub abi: String,
    pub function: String,
    pub args: Vec<DynSolValue>,
    pub gas_limit: Option<u64>,
    pub value: Option<U256>,
}

/// Outcome of the last airdrop sent from the confirm screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirdropReceipt {
    pub tx_hash: B256,
    pub recipients: usize,
    pub sent_at: DateTime<Utc>,
}
