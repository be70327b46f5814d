//! Verification of transactions that arrive already partially signed

use solana_sdk::pubkey::Pubkey;
use tracing::{debug, warn};

use super::DecodedTransaction;
use crate::shared::errors::FetchTransactionError;

/// Check a transaction that carries signer slots.
///
/// Every slot except the one belonging to `account` must hold a valid signature
/// over the serialized message. Slots are checked in order and the first
/// violation is returned.
pub fn verify_signed_transaction(
    transaction: &DecodedTransaction,
    account: &Pubkey,
) -> Result<(), FetchTransactionError> {
    let fee_payer = transaction
        .fee_payer
        .ok_or(FetchTransactionError::MissingFeePayer)?;
    let first_signer = transaction
        .signatures
        .first()
        .map(|pair| pair.pubkey)
        .ok_or(FetchTransactionError::MissingSignature)?;
    if fee_payer != first_signer {
        warn!("Fee payer {} does not own signature slot 0 ({})", fee_payer, first_signer);
        return Err(FetchTransactionError::InvalidFeePayer);
    }
    if transaction.recent_blockhash.is_none() {
        return Err(FetchTransactionError::MissingBlockhash);
    }

    let message = transaction.serialize_message()?;
    for (slot, pair) in transaction.signatures.iter().enumerate() {
        match pair.signature {
            Some(signature) => {
                if !signature.verify(pair.pubkey.as_ref(), &message) {
                    warn!("Signature in slot {} does not verify for {}", slot, pair.pubkey);
                    return Err(FetchTransactionError::InvalidSignature);
                }
            }
            None if pair.pubkey == *account => {
                debug!("Slot {} left blank for the paying account", slot);
            }
            None => {
                warn!("Slot {} for {} is not signed", slot, pair.pubkey);
                return Err(FetchTransactionError::MissingSignature);
            }
        }
    }

    Ok(())
}
