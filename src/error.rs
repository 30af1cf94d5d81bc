//! Error types for ledger operations
//!
//! Transaction invalidity is not an error: malicious, stale, or malformed
//! proposals are the expected input and are reported as
//! `ValidationResult::Invalid`. Errors here cover API-level misuse, such as
//! asking for the fee of a transaction whose inputs are not in the set.

use crate::types::OutPoint;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("referenced output not in UTXO set: {0:?}")]
    UnknownOutput(OutPoint),

    #[error("value sum overflow in {0}")]
    ValueOverflow(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
