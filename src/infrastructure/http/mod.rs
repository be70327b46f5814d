//! Merchant-facing HTTP

pub mod merchant_client;

pub use merchant_client::{MerchantClient, TransactionRequest, TransactionResponse};
