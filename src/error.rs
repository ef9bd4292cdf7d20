use std::path::PathBuf;

use alloy::primitives::B256;
use alloy::providers::PendingTransactionError;
use alloy::transports::TransportError;
use thiserror::Error;

/// Operator input rejected before anything touches disk or network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("NFT ID cannot be empty")]
    EmptyNftId,

    #[error("NFT ID is too long (max {max} digits)")]
    NftIdTooLong { max: usize },

    #[error("URL cannot be empty")]
    EmptyUrl,

    #[error("URL is too long (max {max} characters)")]
    UrlTooLong { max: usize },

    #[error("invalid URL format")]
    InvalidUrl,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("wrong password")]
    WrongPassword,
}

/// Failures reading or rewriting the deployed-contract registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read registry {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse registry {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize registry: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write registry {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read contracts directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read contract file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse contract file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("contract bytecode is empty in {0}")]
    EmptyBytecode(PathBuf),
}

#[derive(Debug, Error)]
pub enum AddressFileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line} contains an invalid Ethereum address: {content}")]
    InvalidLine { line: usize, content: String },

    #[error("no wallet addresses found in file")]
    Empty,
}

/// One variant per step of building, sending and confirming a transaction.
#[derive(Debug, Error)]
pub enum TxError {
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("failed to connect to RPC endpoint: {0}")]
    Dial(String),

    #[error("failed to fetch pending nonce: {0}")]
    Nonce(#[source] TransportError),

    #[error("failed to fetch gas price: {0}")]
    GasPrice(#[source] TransportError),

    #[error("failed to fetch chain id: {0}")]
    ChainId(#[source] TransportError),

    #[error("invalid contract bytecode: {0}")]
    Bytecode(String),

    #[error("failed to encode call data: {0}")]
    Encode(String),

    #[error("failed to sign transaction: {0}")]
    Sign(#[source] alloy::signers::Error),

    #[error("failed to broadcast transaction: {0}")]
    Broadcast(#[source] TransportError),

    #[error("failed waiting for transaction to be mined: {0}")]
    Mined(#[source] PendingTransactionError),

    #[error("transaction {0} reverted")]
    Reverted(B256),

    #[error("receipt for {0} has no contract address")]
    MissingContractAddress(B256),

    #[error("invalid NFT ID: {0:?}")]
    InvalidTokenId(String),
}
