//! Legacy transaction decoded into signer slots, fee payer and blockhash

use base64::{
    alphabet,
    engine::{general_purpose::STANDARD as BASE64, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use solana_sdk::{
    hash::Hash,
    instruction::{AccountMeta, Instruction},
    message::{Message, MessageHeader},
    pubkey::Pubkey,
    signature::Signature,
    transaction::Transaction,
};

use crate::shared::errors::{FetchTransactionError, TransactionDecodeError};

/// Accepts payloads with or without `=` padding
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// One signer slot: the account that must sign and its signature, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignaturePubkeyPair {
    pub signature: Option<Signature>,
    pub pubkey: Pubkey,
}

impl SignaturePubkeyPair {
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }
}

/// A transaction as returned by a merchant endpoint.
///
/// Signer slots keep the wire order; slot 0 belongs to the fee payer whenever
/// any slot exists. `fee_payer` and `recent_blockhash` are the inputs the
/// signing payload is compiled from, so the message is always derived from
/// them rather than trusted on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTransaction {
    pub(crate) signatures: Vec<SignaturePubkeyPair>,
    pub(crate) fee_payer: Option<Pubkey>,
    pub(crate) recent_blockhash: Option<Hash>,
    pub(crate) message: Message,
}

impl DecodedTransaction {
    /// Decode the standard bincode/short-vec layout of a legacy transaction
    pub fn from_wire_bytes(bytes: &[u8]) -> Result<Self, TransactionDecodeError> {
        let transaction: Transaction = bincode::deserialize(bytes)?;
        Self::from_transaction(transaction)
    }

    /// Decode a base64 payload as carried in a transaction request response.
    ///
    /// The URL-safe alphabet, missing padding and embedded whitespace are
    /// all tolerated.
    pub fn from_base64(encoded: &str) -> Result<Self, FetchTransactionError> {
        let normalized: String = encoded
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .map(|c| match c {
                '-' => '+',
                '_' => '/',
                c => c,
            })
            .collect();
        let bytes = LENIENT_BASE64.decode(normalized)?;
        Ok(Self::from_wire_bytes(&bytes)?)
    }

    pub fn from_transaction(transaction: Transaction) -> Result<Self, TransactionDecodeError> {
        let Transaction { signatures, message } = transaction;
        check_instruction_indexes(&message)?;

        let account_keys = message.account_keys.len();
        let signatures = signatures
            .into_iter()
            .enumerate()
            .map(|(index, signature)| -> Result<_, TransactionDecodeError> {
                let pubkey = *message
                    .account_keys
                    .get(index)
                    .ok_or(TransactionDecodeError::MissingAccountKey { index, account_keys })?;
                let signature = (signature != Signature::default()).then_some(signature);
                Ok(SignaturePubkeyPair { signature, pubkey })
            })
            .collect::<Result<Vec<_>, TransactionDecodeError>>()?;

        let fee_payer = if message.header.num_required_signatures > 0 {
            message.account_keys.first().copied()
        } else {
            None
        };
        let recent_blockhash =
            (message.recent_blockhash != Hash::default()).then_some(message.recent_blockhash);

        Ok(Self {
            signatures,
            fee_payer,
            recent_blockhash,
            message,
        })
    }

    pub fn signatures(&self) -> &[SignaturePubkeyPair] {
        &self.signatures
    }

    pub fn fee_payer(&self) -> Option<Pubkey> {
        self.fee_payer
    }

    pub fn recent_blockhash(&self) -> Option<Hash> {
        self.recent_blockhash
    }

    /// Accounts that still have to sign, in slot order
    pub fn missing_signers(&self) -> Vec<Pubkey> {
        self.signatures
            .iter()
            .filter(|pair| !pair.is_signed())
            .map(|pair| pair.pubkey)
            .collect()
    }

    /// Accounts the current message requires signatures from
    pub fn required_signers(&self) -> &[Pubkey] {
        let required = usize::from(self.message.header.num_required_signatures)
            .min(self.message.account_keys.len());
        &self.message.account_keys[..required]
    }

    /// Instructions with program ids and account metas resolved from the message
    pub fn instructions(&self) -> Vec<Instruction> {
        let message = &self.message;
        message
            .instructions
            .iter()
            .map(|compiled| {
                let accounts = compiled
                    .accounts
                    .iter()
                    .map(|&index| {
                        let index = usize::from(index);
                        let pubkey = message.account_keys[index];
                        let is_signer = index < usize::from(message.header.num_required_signatures);
                        if is_writable_index(&message.header, message.account_keys.len(), index) {
                            AccountMeta::new(pubkey, is_signer)
                        } else {
                            AccountMeta::new_readonly(pubkey, is_signer)
                        }
                    })
                    .collect();
                Instruction {
                    program_id: message.account_keys[usize::from(compiled.program_id_index)],
                    accounts,
                    data: compiled.data.clone(),
                }
            })
            .collect()
    }

    /// Compile the message the signatures are computed over.
    ///
    /// The decoded message is reused as-is while its first signer is still the
    /// fee payer, so signatures made by the merchant stay verifiable.
    pub fn compile_message(&self) -> Result<Message, TransactionDecodeError> {
        let fee_payer = self.fee_payer.ok_or(TransactionDecodeError::MissingFeePayer)?;
        let recent_blockhash = self
            .recent_blockhash
            .ok_or(TransactionDecodeError::MissingBlockhash)?;

        let payer_is_first_signer = self.message.header.num_required_signatures > 0
            && self.message.account_keys.first() == Some(&fee_payer);
        if payer_is_first_signer {
            let mut message = self.message.clone();
            message.recent_blockhash = recent_blockhash;
            return Ok(message);
        }

        Ok(Message::new_with_blockhash(
            &self.instructions(),
            Some(&fee_payer),
            &recent_blockhash,
        ))
    }

    /// Signing payload: the compiled message without any signature bytes
    pub fn serialize_message(&self) -> Result<Vec<u8>, TransactionDecodeError> {
        Ok(self.compile_message()?.serialize())
    }

    /// Assign fee payer and blockhash to a transaction nobody has signed yet
    pub(crate) fn complete(&mut self, fee_payer: Pubkey, recent_blockhash: Hash) {
        self.fee_payer = Some(fee_payer);
        self.recent_blockhash = Some(recent_blockhash);
        self.message =
            Message::new_with_blockhash(&self.instructions(), Some(&fee_payer), &recent_blockhash);
    }

    /// Re-encode in the wire layout, absent signatures as zero bytes
    pub fn to_wire_bytes(&self) -> Result<Vec<u8>, TransactionDecodeError> {
        let message = match (self.fee_payer, self.recent_blockhash) {
            (Some(_), Some(_)) => self.compile_message()?,
            _ => self.message.clone(),
        };
        let transaction = Transaction {
            signatures: self
                .signatures
                .iter()
                .map(|pair| pair.signature.unwrap_or_default())
                .collect(),
            message,
        };
        Ok(bincode::serialize(&transaction)?)
    }

    pub fn to_base64(&self) -> Result<String, TransactionDecodeError> {
        Ok(BASE64.encode(self.to_wire_bytes()?))
    }

    /// Convert into an SDK transaction ready for `partial_sign`
    pub fn into_transaction(self) -> Result<Transaction, TransactionDecodeError> {
        let message = self.compile_message()?;
        let required = usize::from(message.header.num_required_signatures);
        let mut signatures: Vec<Signature> = self
            .signatures
            .iter()
            .map(|pair| pair.signature.unwrap_or_default())
            .collect();
        if signatures.len() < required {
            signatures.resize(required, Signature::default());
        }
        Ok(Transaction { signatures, message })
    }
}

fn is_writable_index(header: &MessageHeader, account_keys: usize, index: usize) -> bool {
    let signed = usize::from(header.num_required_signatures);
    if index < signed {
        index < signed.saturating_sub(usize::from(header.num_readonly_signed_accounts))
    } else {
        index < account_keys.saturating_sub(usize::from(header.num_readonly_unsigned_accounts))
    }
}

fn check_instruction_indexes(message: &Message) -> Result<(), TransactionDecodeError> {
    let account_keys = message.account_keys.len();
    for (instruction, compiled) in message.instructions.iter().enumerate() {
        let indexes = std::iter::once(&compiled.program_id_index).chain(compiled.accounts.iter());
        for &index in indexes {
            if usize::from(index) >= account_keys {
                return Err(TransactionDecodeError::InvalidAccountIndex {
                    instruction,
                    index,
                    account_keys,
                });
            }
        }
    }
    Ok(())
}
