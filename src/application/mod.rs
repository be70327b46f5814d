//! Application layer - use cases

pub mod transaction_request;

pub use transaction_request::TransactionRequestFetcher;
