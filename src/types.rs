//! Core ledger types for transaction validation and epoch settlement

use serde::{Deserialize, Serialize};

/// Hash type: 256-bit content hash
pub type Hash = [u8; 32];

/// Monetary value in indivisible units
///
/// Exact integer arithmetic only; conservation checks never go through
/// floating point.
pub type Value = i64;

/// OutPoint: identifies one spendable output as
/// (originating transaction hash, output index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub hash: Hash,
    pub index: u32,
}

/// Transaction input: a claim on a previously created output
///
/// The signature authorizes spending under the claiming transaction's
/// signing message at this input's position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub prev_tx_hash: Hash,
    pub output_index: u32,
    pub signature: Vec<u8>,
}

impl TransactionInput {
    /// The output this input claims
    pub fn outpoint(&self) -> OutPoint {
        OutPoint {
            hash: self.prev_tx_hash,
            index: self.output_index,
        }
    }
}

/// Transaction output: value assigned to an owner identity
///
/// `owner` is the encoded public identity; it is opaque to the ledger and
/// only interpreted by the configured signature scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: Value,
    pub owner: Vec<u8>,
}

/// Transaction: ordered inputs, ordered outputs, and a content hash
///
/// The hash is fixed at construction (`Transaction::new`) and does not
/// depend on any UTXO set state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub hash: Hash,
}

/// Validation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(String),
}

/// Output value sign policy
///
/// Whether zero-value outputs are admissible. `NonNegative` is the
/// documented contract; `StrictlyPositive` is available for downstream
/// use that rejects zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValuePolicy {
    #[default]
    NonNegative,
    StrictlyPositive,
}

impl ValuePolicy {
    /// Check a single output value against this policy
    pub fn admits(&self, value: Value) -> bool {
        match self {
            ValuePolicy::NonNegative => value >= 0,
            ValuePolicy::StrictlyPositive => value > 0,
        }
    }
}
