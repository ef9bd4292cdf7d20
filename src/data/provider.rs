use alloy::primitives::{Address, B256, Bytes};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionReceipt;

use crate::error::TxError;

/// Thin wrapper over an HTTP provider exposing the calls needed to send a
/// signed transaction. Nothing is cached: every getter is a fresh RPC round trip.
pub struct EthProvider {
    provider: Box<dyn Provider + Send + Sync>,
}

impl EthProvider {
    /// Dial an Ethereum node via HTTP RPC.
    pub fn connect(rpc_url: &str) -> Result<Self, TxError> {
        let url = rpc_url
            .parse()
            .map_err(|e| TxError::Dial(format!("{rpc_url}: {e}")))?;
        let provider = ProviderBuilder::new().on_http(url);
        Ok(Self {
            provider: Box::new(provider),
        })
    }

    pub async fn chain_id(&self) -> Result<u64, TxError> {
        self.provider.get_chain_id().await.map_err(TxError::ChainId)
    }

    /// Nonce including transactions still in the mempool.
    pub async fn pending_nonce(&self, address: Address) -> Result<u64, TxError> {
        self.provider
            .get_transaction_count(address)
            .pending()
            .await
            .map_err(TxError::Nonce)
    }

    /// Suggested legacy gas price in wei.
    pub async fn gas_price(&self) -> Result<u128, TxError> {
        self.provider.get_gas_price().await.map_err(TxError::GasPrice)
    }

    /// Broadcast a signed, RLP-encoded transaction and block until its receipt
    /// is available.
    pub async fn send_and_wait(&self, raw: &Bytes) -> Result<TransactionReceipt, TxError> {
        let pending = self
            .provider
            .send_raw_transaction(raw)
            .await
            .map_err(TxError::Broadcast)?;
        let tx_hash: B256 = *pending.tx_hash();
        tracing::info!("broadcast transaction {tx_hash}, waiting to be mined");

        let receipt = pending.get_receipt().await.map_err(TxError::Mined)?;
        if !receipt.status() {
            return Err(TxError::Reverted(receipt.transaction_hash));
        }
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_rejects_bad_url() {
        assert!(matches!(EthProvider::connect("not a url"), Err(TxError::Dial(_))));
    }

    #[test]
    fn test_connect_is_lazy() {
        assert!(EthProvider::connect("http://127.0.0.1:1").is_ok());
    }
}
