use alloy::consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy::dyn_abi::DynSolValue;
use alloy::eips::eip2718::Encodable2718;
use alloy::network::TxSignerSync;
use alloy::primitives::{Address, B256, Bytes, TxKind, U256};
use alloy::rpc::types::TransactionReceipt;
use alloy::signers::local::PrivateKeySigner;

use crate::data::abi;
use crate::data::provider::EthProvider;
use crate::data::types::{CallParams, DeployParams};
use crate::error::TxError;

pub const DEFAULT_DEPLOY_GAS_LIMIT: u64 = 3_000_000;
pub const DEFAULT_CALL_GAS_LIMIT: u64 = 300_000;
pub const BATCH_MINT_GAS_LIMIT: u64 = 500_000;
/// Tokens minted to each recipient by a batch mint.
pub const MINT_AMOUNT_PER_RECIPIENT: u64 = 1;

/// Signs and sends NFT contract transactions from the configured key.
///
/// Each operation dials the endpoint and fetches nonce, gas price and chain id
/// afresh, then blocks until the transaction is mined. Nothing is retried: a
/// failure after broadcast leaves the on-chain outcome for the operator to check.
pub struct NftService {
    rpc_url: String,
    signer: PrivateKeySigner,
}

impl NftService {
    /// Accepts the private key as hex with or without a `0x` prefix.
    pub fn new(rpc_url: impl Into<String>, private_key: &str) -> Result<Self, TxError> {
        let key = private_key.trim();
        let key = key.strip_prefix("0x").unwrap_or(key);
        let signer: PrivateKeySigner = key
            .parse()
            .map_err(|e: alloy::signers::local::LocalSignerError| {
                TxError::InvalidKey(e.to_string())
            })?;
        Ok(Self {
            rpc_url: rpc_url.into(),
            signer,
        })
    }

    /// Address the transactions are sent from.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Deploy creation bytecode with encoded constructor arguments and return
    /// the new contract address.
    pub async fn deploy(&self, params: DeployParams) -> Result<Address, TxError> {
        let bytecode = abi::decode_bytecode(&params.bytecode)?;
        let constructor = abi::resolve_constructor(params.abi.as_deref())?;
        let owner = params.initial_owner.unwrap_or_else(|| self.address());
        let args = match constructor {
            Some(ref c) => abi::constructor_args(c, owner, &params.initial_uri)?,
            None => Vec::new(),
        };
        let data = abi::encode_deploy_data(&bytecode, constructor.as_ref(), &args)?;

        let receipt = self
            .send(
                TxKind::Create,
                data,
                params.gas_limit.unwrap_or(DEFAULT_DEPLOY_GAS_LIMIT),
                params.value.unwrap_or(U256::ZERO),
            )
            .await?;

        let address = receipt
            .contract_address
            .ok_or(TxError::MissingContractAddress(receipt.transaction_hash))?;
        tracing::info!("contract deployed at {address} in {}", receipt.transaction_hash);
        Ok(address)
    }

    /// Call a state-changing contract function and return the transaction hash.
    pub async fn call(&self, params: CallParams) -> Result<B256, TxError> {
        let data = abi::encode_call(&params.abi, &params.function, &params.args)?;
        let receipt = self
            .send(
                TxKind::Call(params.contract),
                data,
                params.gas_limit.unwrap_or(DEFAULT_CALL_GAS_LIMIT),
                params.value.unwrap_or(U256::ZERO),
            )
            .await?;
        tracing::info!(
            "{} on {} mined in {}",
            params.function,
            params.contract,
            receipt.transaction_hash
        );
        Ok(receipt.transaction_hash)
    }

    /// Set the base token URI of an NFT contract.
    pub async fn set_uri(&self, contract: Address, uri: &str) -> Result<B256, TxError> {
        self.call(CallParams {
            contract,
            abi: abi::SET_URI_ABI.to_string(),
            function: abi::SET_URI_FUNCTION.to_string(),
            args: vec![DynSolValue::String(uri.to_string())],
            gas_limit: Some(DEFAULT_CALL_GAS_LIMIT),
            value: None,
        })
        .await
    }

    /// Mint one `nft_id` token to every recipient in a single transaction.
    pub async fn mint_to_multiple(
        &self,
        contract: Address,
        recipients: &[Address],
        nft_id: &str,
    ) -> Result<B256, TxError> {
        let params = mint_params(contract, recipients, nft_id)?;
        self.call(params).await
    }

    async fn send(
        &self,
        to: TxKind,
        input: Bytes,
        gas_limit: u64,
        value: U256,
    ) -> Result<TransactionReceipt, TxError> {
        let provider = EthProvider::connect(&self.rpc_url)?;
        let from = self.address();

        let nonce = provider.pending_nonce(from).await?;
        let gas_price = provider.gas_price().await?;
        let chain_id = provider.chain_id().await?;
        tracing::debug!(
            "sending from {from}: nonce={nonce} gas_price={gas_price} chain_id={chain_id} gas_limit={gas_limit}"
        );

        let tx = TxLegacy {
            chain_id: Some(chain_id),
            nonce,
            gas_price,
            gas_limit,
            to,
            value,
            input,
        };
        let raw = self.sign(tx)?;

        provider.send_and_wait(&raw).await
    }

    /// EIP-155 signature over a legacy transaction, returned as raw 2718 bytes.
    fn sign(&self, mut tx: TxLegacy) -> Result<Bytes, TxError> {
        let signature = self
            .signer
            .sign_transaction_sync(&mut tx)
            .map_err(TxError::Sign)?;
        let envelope = TxEnvelope::Legacy(tx.into_signed(signature));
        Ok(Bytes::from(envelope.encoded_2718()))
    }
}

/// Build the batch-mint call, rejecting a bad token id before any network use.
pub fn mint_params(
    contract: Address,
    recipients: &[Address],
    nft_id: &str,
) -> Result<CallParams, TxError> {
    let trimmed = nft_id.trim();
    if trimmed.is_empty() {
        return Err(TxError::InvalidTokenId(trimmed.to_string()));
    }
    let token_id = U256::from_str_radix(trimmed, 10)
        .map_err(|_| TxError::InvalidTokenId(trimmed.to_string()))?;

    let accounts = recipients
        .iter()
        .map(|address| DynSolValue::Address(*address))
        .collect();

    Ok(CallParams {
        contract,
        abi: abi::MINT_TO_MULTIPLE_ABI.to_string(),
        function: abi::MINT_TO_MULTIPLE_FUNCTION.to_string(),
        args: vec![
            DynSolValue::Array(accounts),
            DynSolValue::Uint(token_id, 256),
            DynSolValue::Uint(U256::from(MINT_AMOUNT_PER_RECIPIENT), 256),
            DynSolValue::Bytes(Vec::new()),
        ],
        gas_limit: Some(BATCH_MINT_GAS_LIMIT),
        value: None,
    })
}

#[cfg(test)]
mod tests {
    use alloy::consensus::Transaction;
    use alloy::eips::eip2718::Decodable2718;
    use alloy::providers::{Provider, ProviderBuilder};

    use super::*;
    use crate::components::test_support::{REVERT_BYTECODE, STOP_BYTECODE, local_node};

    /// First account of a local hardhat/anvil node.
    const HARDHAT_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const HARDHAT_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
    /// Nothing listens here, so any network attempt fails fast.
    const DEAD_RPC: &str = "http://127.0.0.1:1";

    fn service() -> NftService {
        NftService::new(DEAD_RPC, HARDHAT_KEY).unwrap()
    }

    #[test]
    fn test_signer_address() {
        let expected: Address = HARDHAT_ADDRESS.parse().unwrap();
        assert_eq!(service().address(), expected);
    }

    #[test]
    fn test_key_without_prefix() {
        let svc = NftService::new(DEAD_RPC, HARDHAT_KEY.trim_start_matches("0x")).unwrap();
        assert_eq!(svc.address(), service().address());
    }

    #[test]
    fn test_invalid_key() {
        assert!(matches!(
            NftService::new(DEAD_RPC, "0xtest1234567890"),
            Err(TxError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_mint_params() {
        let recipients = [Address::from_slice(&[0x11; 20]), Address::from_slice(&[0x22; 20])];
        let params = mint_params(Address::ZERO, &recipients, " 12 ").unwrap();
        assert_eq!(params.function, "mintToMultple");
        assert_eq!(params.gas_limit, Some(BATCH_MINT_GAS_LIMIT));
        assert_eq!(params.args[1], DynSolValue::Uint(U256::from(12), 256));
        assert_eq!(params.args[2], DynSolValue::Uint(U256::from(1), 256));
        assert_eq!(params.args[3], DynSolValue::Bytes(Vec::new()));
        match &params.args[0] {
            DynSolValue::Array(items) => assert_eq!(items.len(), 2),
            other => panic!("expected address array, got {other:?}"),
        }
    }

    #[test]
    fn test_mint_params_rejects_bad_id() {
        assert!(matches!(
            mint_params(Address::ZERO, &[], "  "),
            Err(TxError::InvalidTokenId(_))
        ));
        assert!(matches!(
            mint_params(Address::ZERO, &[], "12a"),
            Err(TxError::InvalidTokenId(_))
        ));
    }

    #[tokio::test]
    async fn test_mint_rejects_bad_id_before_network() {
        let result = service().mint_to_multiple(Address::ZERO, &[], "").await;
        assert!(matches!(result, Err(TxError::InvalidTokenId(_))));
    }

    #[tokio::test]
    async fn test_deploy_rejects_empty_bytecode_before_network() {
        let params = DeployParams {
            bytecode: "0x".to_string(),
            initial_uri: "https://a.example".to_string(),
            ..Default::default()
        };
        assert!(matches!(service().deploy(params).await, Err(TxError::Bytecode(_))));
    }

    #[tokio::test]
    async fn test_call_network_failure_is_nonce_error() {
        let result = service()
            .set_uri(Address::from_slice(&[0x11; 20]), "https://a.example")
            .await;
        assert!(matches!(result, Err(TxError::Nonce(_))));
    }

    #[test]
    fn test_sign_is_eip155_legacy() {
        let svc = service();
        let tx = TxLegacy {
            chain_id: Some(31337),
            nonce: 7,
            gas_price: 1_000_000_000,
            gas_limit: DEFAULT_CALL_GAS_LIMIT,
            to: TxKind::Call(Address::from_slice(&[0x11; 20])),
            value: U256::ZERO,
            input: Bytes::from(vec![0xde, 0xad]),
        };
        let raw = svc.sign(tx).unwrap();

        let decoded = TxEnvelope::decode_2718(&mut raw.as_ref()).unwrap();
        let TxEnvelope::Legacy(signed) = &decoded else {
            panic!("expected legacy envelope");
        };
        assert_eq!(signed.tx().chain_id(), Some(31337));
        assert_eq!(signed.tx().nonce(), 7);
        let signer = signed
            .signature()
            .recover_address_from_prehash(&signed.signature_hash())
            .unwrap();
        assert_eq!(signer, svc.address());
    }

    fn deploy_params(bytecode: &str) -> DeployParams {
        DeployParams {
            bytecode: bytecode.to_string(),
            initial_uri: "https://a.example".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    #[ignore = "spawns a local anvil node"]
    async fn test_deploy_then_mint() {
        let node = local_node();
        let svc = NftService::new(node.endpoint(), HARDHAT_KEY).unwrap();

        let contract = svc.deploy(deploy_params(STOP_BYTECODE)).await.unwrap();
        let provider = ProviderBuilder::new().on_http(node.endpoint_url());
        assert_eq!(
            provider.get_code_at(contract).await.unwrap(),
            Bytes::from_static(&[0x00])
        );

        svc.set_uri(contract, "https://b.example").await.unwrap();
        let recipients = [Address::from_slice(&[0x11; 20]), Address::from_slice(&[0x22; 20])];
        let tx_hash = svc.mint_to_multiple(contract, &recipients, "7").await.unwrap();
        let receipt = provider.get_transaction_receipt(tx_hash).await.unwrap().unwrap();
        assert!(receipt.status());
        assert_eq!(receipt.from, svc.address());
    }

    #[tokio::test]
    #[ignore = "spawns a local anvil node"]
    async fn test_reverted_receipt_rejected() {
        let node = local_node();
        let svc = NftService::new(node.endpoint(), HARDHAT_KEY).unwrap();

        // creation code that reverts straight away
        let result = svc.deploy(deploy_params("0x60006000fd")).await;
        assert!(matches!(result, Err(TxError::Reverted(_))), "{result:?}");

        let contract = svc.deploy(deploy_params(REVERT_BYTECODE)).await.unwrap();
        let result = svc.set_uri(contract, "https://b.example").await;
        assert!(matches!(result, Err(TxError::Reverted(_))), "{result:?}");
    }
}
