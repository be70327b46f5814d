//! Error handling for the transaction request pipeline

use thiserror::Error;

/// Failures while decoding or re-encoding a transaction payload
#[derive(Error, Debug)]
pub enum TransactionDecodeError {
    #[error("Malformed transaction bytes: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("Signature slot {index} has no matching account key ({account_keys} keys)")]
    MissingAccountKey { index: usize, account_keys: usize },

    #[error("Instruction {instruction} references account index {index} out of {account_keys}")]
    InvalidAccountIndex {
        instruction: usize,
        index: u8,
        account_keys: usize,
    },

    #[error("Cannot compile message without a fee payer")]
    MissingFeePayer,

    #[error("Cannot compile message without a recent blockhash")]
    MissingBlockhash,
}

/// Tag for the validation failures of a transaction request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTransactionErrorKind {
    MissingTransaction,
    InvalidTransaction,
    MissingFeePayer,
    InvalidFeePayer,
    MissingBlockhash,
    InvalidSignature,
    MissingSignature,
    /// Errors raised by collaborators and passed through unchanged
    Propagated,
}

/// Thrown when a transaction response can't be fetched or fails verification
#[derive(Error, Debug)]
pub enum FetchTransactionError {
    #[error("missing transaction")]
    MissingTransaction,

    #[error("invalid transaction")]
    InvalidTransaction,

    #[error("missing fee payer")]
    MissingFeePayer,

    #[error("invalid fee payer")]
    InvalidFeePayer,

    #[error("missing recent blockhash")]
    MissingBlockhash,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("missing signature")]
    MissingSignature,

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Base64(#[from] base64::DecodeError),

    #[error(transparent)]
    Decode(#[from] TransactionDecodeError),

    #[error(transparent)]
    Chain(#[from] AppError),
}

impl FetchTransactionError {
    pub fn kind(&self) -> FetchTransactionErrorKind {
        match self {
            Self::MissingTransaction => FetchTransactionErrorKind::MissingTransaction,
            Self::InvalidTransaction => FetchTransactionErrorKind::InvalidTransaction,
            Self::MissingFeePayer => FetchTransactionErrorKind::MissingFeePayer,
            Self::InvalidFeePayer => FetchTransactionErrorKind::InvalidFeePayer,
            Self::MissingBlockhash => FetchTransactionErrorKind::MissingBlockhash,
            Self::InvalidSignature => FetchTransactionErrorKind::InvalidSignature,
            Self::MissingSignature => FetchTransactionErrorKind::MissingSignature,
            Self::Http(_) | Self::Base64(_) | Self::Decode(_) | Self::Chain(_) => {
                FetchTransactionErrorKind::Propagated
            }
        }
    }
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Blockchain error: {0}")]
    BlockchainError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
