//! Infrastructure layer - outbound HTTP and RPC clients

pub mod blockchain;
pub mod http;
