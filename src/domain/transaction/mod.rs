//! Transaction domain - decoding, message compilation and signature checks

mod decoded_transaction;
mod validator;

pub use decoded_transaction::{DecodedTransaction, SignaturePubkeyPair};
pub use validator::verify_signed_transaction;
