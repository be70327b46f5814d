//! Solana RPC client used as the source of recent blockhashes

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use tracing::debug;

use crate::shared::errors::AppError;

/// Chain state needed to complete an unsigned transaction
#[async_trait]
pub trait BlockhashProvider: Send + Sync {
    /// Latest blockhash at `commitment`, or at the provider's default level
    async fn get_latest_blockhash(
        &self,
        commitment: Option<CommitmentConfig>,
    ) -> Result<Hash, AppError>;
}

/// Solana RPC client wrapper
pub struct SolanaRpcClient {
    client: RpcClient,
}

impl SolanaRpcClient {
    /// Create RPC client whose default commitment is `commitment`
    pub fn new_with_commitment(rpc_url: String, commitment: CommitmentConfig) -> Self {
        Self {
            client: RpcClient::new_with_commitment(rpc_url, commitment),
        }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }
}

#[async_trait]
impl BlockhashProvider for SolanaRpcClient {
    async fn get_latest_blockhash(
        &self,
        commitment: Option<CommitmentConfig>,
    ) -> Result<Hash, AppError> {
        let commitment = commitment.unwrap_or_else(|| self.client.commitment());
        let (blockhash, last_valid_block_height) = self
            .client
            .get_latest_blockhash_with_commitment(commitment)
            .await
            .map_err(|e| AppError::BlockchainError(format!("Failed to get latest blockhash: {}", e)))?;

        debug!(
            "Latest blockhash {} at {:?} (valid until block height {})",
            blockhash, commitment.commitment, last_valid_block_height
        );
        Ok(blockhash)
    }
}
