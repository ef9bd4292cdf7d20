use std::sync::OnceLock;

use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::json_abi::{Constructor, JsonAbi};
use alloy::primitives::{Address, Bytes};

use crate::error::TxError;

/// Constructor of the bundled ERC-1155 contract, used when an artifact ships no ABI.
pub const NFT_CONSTRUCTOR_ABI: &str = r#"[{
    "inputs": [
        {"name": "initialOwner", "type": "address", "internalType": "address"},
        {"name": "newuri", "type": "string", "internalType": "string"}
    ],
    "stateMutability": "nonpayable",
    "type": "constructor"
}]"#;

pub const SET_URI_FUNCTION: &str = "setURI";
pub const SET_URI_ABI: &str = r#"[{
    "inputs": [{"name": "newuri", "type": "string", "internalType": "string"}],
    "name": "setURI",
    "outputs": [],
    "stateMutability": "nonpayable",
    "type": "function"
}]"#;

/// Spelling matches the deployed contract's function name.
pub const MINT_TO_MULTIPLE_FUNCTION: &str = "mintToMultple";
pub const MINT_TO_MULTIPLE_ABI: &str = r#"[{
    "inputs": [
        {"name": "accounts", "type": "address[]", "internalType": "address[]"},
        {"name": "ids", "type": "uint256", "internalType": "uint256"},
        {"name": "amounts", "type": "uint256", "internalType": "uint256"},
        {"name": "data", "type": "bytes", "internalType": "bytes"}
    ],
    "name": "mintToMultple",
    "outputs": [],
    "stateMutability": "nonpayable",
    "type": "function"
}]"#;

static NFT_CONSTRUCTOR: OnceLock<Option<Constructor>> = OnceLock::new();

fn nft_constructor() -> Result<Constructor, TxError> {
    NFT_CONSTRUCTOR
        .get_or_init(|| {
            serde_json::from_str::<JsonAbi>(NFT_CONSTRUCTOR_ABI)
                .ok()
                .and_then(|abi| abi.constructor)
        })
        .clone()
        .ok_or_else(|| TxError::Encode("built-in constructor ABI is invalid".to_string()))
}

pub fn parse_abi(json: &str) -> Result<JsonAbi, TxError> {
    serde_json::from_str(json).map_err(|e| TxError::Encode(format!("invalid ABI: {e}")))
}

/// Pick the constructor to encode against.
///
/// No ABI, or an ABI with no items at all, falls back to the NFT constructor.
/// An ABI that declares functions but no constructor takes no arguments.
pub fn resolve_constructor(abi: Option<&str>) -> Result<Option<Constructor>, TxError> {
    let Some(json) = abi else {
        return nft_constructor().map(Some);
    };

    let parsed = parse_abi(json)?;
    if let Some(constructor) = parsed.constructor {
        return Ok(Some(constructor));
    }
    if parsed.functions.is_empty() && parsed.events.is_empty() && parsed.errors.is_empty() {
        return nft_constructor().map(Some);
    }
    Ok(None)
}

/// Fill constructor inputs by type: `address` is the owner, `string` the URI.
pub fn constructor_args(
    constructor: &Constructor,
    owner: Address,
    uri: &str,
) -> Result<Vec<DynSolValue>, TxError> {
    constructor
        .inputs
        .iter()
        .map(|param| match param.ty.as_str() {
            "address" => Ok(DynSolValue::Address(owner)),
            "string" => Ok(DynSolValue::String(uri.to_string())),
            other => Err(TxError::Encode(format!(
                "unsupported constructor parameter {} ({other})",
                param.name
            ))),
        })
        .collect()
}

pub fn decode_bytecode(hex: &str) -> Result<Bytes, TxError> {
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if digits.is_empty() {
        return Err(TxError::Bytecode("bytecode is empty".to_string()));
    }
    alloy::primitives::hex::decode(digits)
        .map(Bytes::from)
        .map_err(|e| TxError::Bytecode(e.to_string()))
}

/// Creation code followed by the ABI-encoded constructor arguments.
pub fn encode_deploy_data(
    bytecode: &Bytes,
    constructor: Option<&Constructor>,
    args: &[DynSolValue],
) -> Result<Bytes, TxError> {
    let mut data = bytecode.to_vec();
    if let Some(constructor) = constructor {
        if !args.is_empty() {
            let encoded = constructor
                .abi_encode_input(args)
                .map_err(|e| TxError::Encode(e.to_string()))?;
            data.extend_from_slice(&encoded);
        }
    }
    Ok(Bytes::from(data))
}

/// Selector plus ABI-encoded arguments for `function` in `abi_json`.
pub fn encode_call(abi_json: &str, function: &str, args: &[DynSolValue]) -> Result<Bytes, TxError> {
    let abi = parse_abi(abi_json)?;
    let func = abi
        .function(function)
        .and_then(|overloads| overloads.first())
        .ok_or_else(|| TxError::Encode(format!("function {function} not found in ABI")))?;
    func.abi_encode_input(args)
        .map(Bytes::from)
        .map_err(|e| TxError::Encode(e.to_string()))
}
