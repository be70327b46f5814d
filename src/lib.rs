//! Solana Pay - transaction request client
//! Fetches merchant transactions, verifies their signatures and completes them for the payer

pub mod domain;
pub mod infrastructure;
pub mod application;
pub mod shared;

// Re-export main types for convenience
pub use application::TransactionRequestFetcher;
pub use domain::transaction::{DecodedTransaction, SignaturePubkeyPair};
pub use infrastructure::blockchain::{BlockhashProvider, SolanaRpcClient};
pub use infrastructure::http::MerchantClient;
pub use shared::errors::{FetchTransactionError, FetchTransactionErrorKind};
