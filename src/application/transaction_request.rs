//! Fetch a transaction from a Solana Pay transaction request link

use std::sync::Arc;

use reqwest::Url;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use tracing::info;

use crate::domain::transaction::{verify_signed_transaction, DecodedTransaction};
use crate::infrastructure::blockchain::BlockhashProvider;
use crate::infrastructure::http::{MerchantClient, TransactionResponse};
use crate::shared::errors::FetchTransactionError;

/// Requests, verifies and completes merchant transactions
pub struct TransactionRequestFetcher {
    merchant_client: MerchantClient,
    blockhash_provider: Arc<dyn BlockhashProvider>,
}

impl TransactionRequestFetcher {
    pub fn new(merchant_client: MerchantClient, blockhash_provider: Arc<dyn BlockhashProvider>) -> Self {
        Self {
            merchant_client,
            blockhash_provider,
        }
    }

    /// Fetch the transaction at `link` for `account` to sign.
    ///
    /// A transaction that arrives with signer slots must already be signed by
    /// everyone except `account`. One that arrives without any is completed
    /// here with `account` as fee payer and a fresh blockhash at `commitment`.
    pub async fn fetch(
        &self,
        link: &Url,
        account: &Pubkey,
        commitment: Option<CommitmentConfig>,
    ) -> Result<DecodedTransaction, FetchTransactionError> {
        let response = self.merchant_client.request_transaction(link, account).await?;
        self.complete_response(&response, account, commitment).await
    }

    /// Decode a merchant response and run the verification or completion step
    pub async fn complete_response(
        &self,
        response: &TransactionResponse,
        account: &Pubkey,
        commitment: Option<CommitmentConfig>,
    ) -> Result<DecodedTransaction, FetchTransactionError> {
        let mut transaction = DecodedTransaction::from_base64(&response.transaction)?;

        if transaction.signatures().is_empty() {
            // Unsigned fee payer and blockhash are attacker-controlled; replace them.
            let blockhash = self
                .blockhash_provider
                .get_latest_blockhash(commitment)
                .await?;
            transaction.complete(*account, blockhash);
            info!("Completed unsigned transaction with fee payer {} and blockhash {}", account, blockhash);
        } else {
            verify_signed_transaction(&transaction, account)?;
            info!(
                "Verified {} signer slot(s), {} left for the payer",
                transaction.signatures().len(),
                transaction.missing_signers().len()
            );
        }

        Ok(transaction)
    }
}
