//! Epoch settlement: greedy single-pass batch processing
//!
//! An epoch is one batch of proposed transactions settled together. The pass
//! is order-dependent by design: when two proposals claim the same output,
//! the one earlier in the caller-supplied order wins and the later one fails
//! the existence check against the updated set. This is the adopted
//! semantics, not an approximation of an optimal subset search.

use crate::crypto::SignatureScheme;
use crate::error::Result;
use crate::types::{OutPoint, Transaction, ValidationResult, ValuePolicy};
use crate::utxo::UtxoSet;
use crate::validation::check_transaction;

/// HandleEpoch: settle a batch of proposed transactions
///
/// For each proposal, in caller order:
/// 1. Validate against the current set
/// 2. If valid: commit it - remove every claimed output, add one output per
///    created output keyed by (tx hash, output index), append to accepted
/// 3. If invalid: skip it; the set is untouched and it is not retried
///
/// Returns the accepted subsequence. Deterministic for a fixed input order
/// and starting set. Never aborts on an invalid proposal.
pub fn handle_epoch(
    proposed: &[Transaction],
    utxo_set: &mut UtxoSet,
    scheme: &dyn SignatureScheme,
    policy: ValuePolicy,
) -> Result<Vec<Transaction>> {
    let mut accepted = Vec::new();

    for tx in proposed {
        match check_transaction(tx, utxo_set, scheme, policy)? {
            ValidationResult::Valid => {
                apply_transaction(tx, utxo_set);
                accepted.push(tx.clone());
            }
            ValidationResult::Invalid(_) => {}
        }
    }

    Ok(accepted)
}

/// Commit an already-validated transaction's effects to the set
///
/// Effects are all-or-nothing at the call site: this runs only after the
/// transaction passed every validity check against the current set.
fn apply_transaction(tx: &Transaction, utxo_set: &mut UtxoSet) {
    for outpoint in tx.claimed_outpoints() {
        utxo_set.remove(&outpoint);
    }
    for (index, output) in tx.outputs.iter().enumerate() {
        let outpoint = OutPoint {
            hash: tx.hash,
            index: index as u32,
        };
        utxo_set.add(outpoint, output.clone());
    }
}
