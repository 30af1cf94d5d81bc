//! Transaction construction, content hashing, and signing messages
//!
//! Hashing is deterministic over structural content: the same inputs and
//! outputs always produce the same hash and the same per-position signing
//! messages, independent of any UTXO set state.

use crate::types::{Hash, Transaction, TransactionInput, TransactionOutput};
use sha2::{Digest, Sha256};

impl Transaction {
    /// Construct a transaction and fix its content hash
    pub fn new(inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>) -> Self {
        let hash = content_hash(&inputs, &outputs);
        Self { inputs, outputs, hash }
    }

    /// Canonical message the signature at input position `index` must
    /// authenticate: the serialized transaction with signatures at
    /// positions >= `index` excluded
    pub fn signing_message(&self, index: usize) -> Vec<u8> {
        serialize(&self.inputs, &self.outputs, index)
    }

    /// Outpoints claimed by this transaction's inputs, in input order
    pub fn claimed_outpoints(&self) -> impl Iterator<Item = crate::types::OutPoint> + '_ {
        self.inputs.iter().map(|input| input.outpoint())
    }
}

/// Content hash over the full serialized form, all signatures included
pub fn content_hash(inputs: &[TransactionInput], outputs: &[TransactionOutput]) -> Hash {
    let bytes = serialize(inputs, outputs, inputs.len());
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    hasher.finalize().into()
}

/// Serialize structural content, including signatures only for input
/// positions below `signature_floor`
fn serialize(
    inputs: &[TransactionInput],
    outputs: &[TransactionOutput],
    signature_floor: usize,
) -> Vec<u8> {
    let mut bytes = Vec::new();

    bytes.extend_from_slice(&(inputs.len() as u32).to_le_bytes());
    for (i, input) in inputs.iter().enumerate() {
        bytes.extend_from_slice(&input.prev_tx_hash);
        bytes.extend_from_slice(&input.output_index.to_le_bytes());
        if i < signature_floor {
            bytes.extend_from_slice(&(input.signature.len() as u32).to_le_bytes());
            bytes.extend_from_slice(&input.signature);
        }
    }

    bytes.extend_from_slice(&(outputs.len() as u32).to_le_bytes());
    for output in outputs {
        bytes.extend_from_slice(&output.value.to_le_bytes());
        bytes.extend_from_slice(&(output.owner.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&output.owner);
    }

    bytes
}
