//! Chain access for completing transactions

pub mod rpc_client;

pub use rpc_client::{BlockhashProvider, SolanaRpcClient};
