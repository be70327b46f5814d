//! HTTP client for merchant transaction request endpoints

use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE, PRAGMA};
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, info};

use crate::shared::errors::FetchTransactionError;

/// Body of the POST sent to the merchant
#[derive(Debug, Serialize)]
pub struct TransactionRequest {
    /// Base58 public key of the account that may sign
    pub account: String,
}

impl TransactionRequest {
    pub fn new(account: &Pubkey) -> Self {
        Self {
            account: account.to_string(),
        }
    }
}

/// Validated body of the merchant's answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionResponse {
    /// Base64 encoded transaction
    pub transaction: String,
}

impl TransactionResponse {
    /// Check the response contract before anything touches domain types.
    ///
    /// Absent, null, false, zero and empty values all count as a missing
    /// transaction; any other non-string value is invalid.
    pub fn from_json(body: &Value) -> Result<Self, FetchTransactionError> {
        match body.get("transaction") {
            Some(Value::String(transaction)) if !transaction.is_empty() => Ok(Self {
                transaction: transaction.clone(),
            }),
            None | Some(Value::Null) | Some(Value::Bool(false)) | Some(Value::String(_)) => {
                Err(FetchTransactionError::MissingTransaction)
            }
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => {
                Err(FetchTransactionError::MissingTransaction)
            }
            Some(_) => Err(FetchTransactionError::InvalidTransaction),
        }
    }
}

/// Merchant endpoint client
#[derive(Debug, Clone, Default)]
pub struct MerchantClient {
    http_client: Client,
}

impl MerchantClient {
    pub fn new(http_client: Client) -> Self {
        Self { http_client }
    }

    /// POST the paying account to `link` and return the transaction payload
    pub async fn request_transaction(
        &self,
        link: &Url,
        account: &Pubkey,
    ) -> Result<TransactionResponse, FetchTransactionError> {
        info!("Requesting transaction from {} for {}", link, account);

        let response = self
            .http_client
            .post(link.clone())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .json(&TransactionRequest::new(account))
            .send()
            .await?;

        debug!("Merchant responded with status {}", response.status());
        let body: Value = response.json().await?;
        let response = TransactionResponse::from_json(&body)?;

        debug!("Received {} base64 characters", response.transaction.len());
        Ok(response)
    }
}
