// src/report.rs
use serde::Serialize;
use solana_pay::shared::errors::TransactionDecodeError;
use solana_pay::DecodedTransaction;
use solana_sdk::pubkey::Pubkey;
use std::fmt;

#[derive(Debug, Serialize)]
pub struct TransactionReport {
    pub account: String,
    pub fee_payer: Option<String>,
    pub recent_blockhash: Option<String>,
    pub signers: Vec<SignerDetails>,
    pub instructions: usize,
    pub transaction: String,
}

#[derive(Debug, Serialize)]
pub struct SignerDetails {
    pub pubkey: String,
    pub signed: bool,
    pub is_payer: bool,
}

impl TransactionReport {
    pub fn new(transaction: &DecodedTransaction, account: &Pubkey) -> Result<Self, TransactionDecodeError> {
        let signed: Vec<Pubkey> = transaction
            .signatures()
            .iter()
            .filter(|pair| pair.is_signed())
            .map(|pair| pair.pubkey)
            .collect();

        let signers = transaction
            .required_signers()
            .iter()
            .map(|pubkey| SignerDetails {
                pubkey: pubkey.to_string(),
                signed: signed.contains(pubkey),
                is_payer: pubkey == account,
            })
            .collect();

        Ok(Self {
            account: account.to_string(),
            fee_payer: transaction.fee_payer().map(|key| key.to_string()),
            recent_blockhash: transaction.recent_blockhash().map(|hash| hash.to_string()),
            signers,
            instructions: transaction.instructions().len(),
            transaction: transaction.to_base64()?,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for TransactionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let none = "-".to_string();
        writeln!(f, "Fee payer:        {}", self.fee_payer.as_ref().unwrap_or(&none))?;
        writeln!(f, "Recent blockhash: {}", self.recent_blockhash.as_ref().unwrap_or(&none))?;
        writeln!(f, "Instructions:     {}", self.instructions)?;
        writeln!(f, "Signers:")?;
        for (slot, signer) in self.signers.iter().enumerate() {
            let status = match (signer.signed, signer.is_payer) {
                (true, _) => "signed",
                (false, true) => "awaiting your signature",
                (false, false) => "unsigned",
            };
            writeln!(f, "  [{}] {} ({})", slot, signer.pubkey, status)?;
        }
        writeln!(f, "Transaction (base64):")?;
        writeln!(f, "{}", self.transaction)
    }
}
