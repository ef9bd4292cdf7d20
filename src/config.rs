use std::path::PathBuf;

use clap::Parser;

use crate::data::addresses::DEFAULT_ADDRESSES_FILE;
use crate::data::artifacts::{DEFAULT_ARTIFACTS_DIR, DEFAULT_TEMPLATE_PATH};
use crate::data::registry::DEFAULT_REGISTRY_FILE;

#[derive(Parser, Debug)]
#[command(name = "nft-console", about = "Terminal console for deploying and airdropping NFTs")]
pub struct Config {
    /// Ethereum JSON-RPC endpoint (http:// or https://)
    #[arg(long, env = "RPC_URL")]
    pub rpc_url: String,

    /// Hex private key that signs every transaction
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Console login password
    #[arg(long, env = "PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Directory of compiled contract JSON files offered for deployment
    #[arg(long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Hardhat build output offered as an extra deploy target
    #[arg(long, env = "CONTRACT_TEMPLATE", default_value = DEFAULT_TEMPLATE_PATH)]
    pub template: PathBuf,

    /// Registry of deployed contracts
    #[arg(long, env = "REGISTRY_FILE", default_value = DEFAULT_REGISTRY_FILE)]
    pub registry: PathBuf,

    /// Newline-delimited list of recipient wallet addresses
    #[arg(long, env = "ADDRESSES_FILE", default_value = DEFAULT_ADDRESSES_FILE)]
    pub addresses: PathBuf,

    /// Directory for daily log files
    #[arg(long, env = "LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,

    /// Tick rate in milliseconds for UI refresh
    #[arg(long, default_value = "100")]
    pub tick_rate_ms: u64,
}
