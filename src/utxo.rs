//! The unspent-output set: the authoritative map of spendable money
//!
//! Presence of an `OutPoint` means "spendable now"; each key appears at most
//! once. Validation only reads the set; the settlement pass in
//! [`crate::settlement`] is the sole mutator.

use crate::types::{OutPoint, TransactionOutput, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from output identifier to the output it names
///
/// `Clone` yields an independent copy; the ledger facade clones the
/// caller's set on construction so caller state is never aliased.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UtxoSet {
    outputs: HashMap<OutPoint, TransactionOutput>,
}

impl UtxoSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the given output is currently spendable
    pub fn contains(&self, outpoint: &OutPoint) -> bool {
        self.outputs.contains_key(outpoint)
    }

    /// Look up a spendable output
    pub fn get(&self, outpoint: &OutPoint) -> Option<&TransactionOutput> {
        self.outputs.get(outpoint)
    }

    /// Add a newly created output, returning any output previously
    /// recorded under the same identifier
    pub fn add(&mut self, outpoint: OutPoint, output: TransactionOutput) -> Option<TransactionOutput> {
        self.outputs.insert(outpoint, output)
    }

    /// Remove a spent output, returning it if it was present
    pub fn remove(&mut self, outpoint: &OutPoint) -> Option<TransactionOutput> {
        self.outputs.remove(outpoint)
    }

    /// Number of spendable outputs
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Iterate over all spendable outputs
    pub fn iter(&self) -> impl Iterator<Item = (&OutPoint, &TransactionOutput)> {
        self.outputs.iter()
    }

    /// Total value held in the set, `None` on overflow
    pub fn total_value(&self) -> Option<Value> {
        self.outputs
            .values()
            .try_fold(0 as Value, |acc, o| acc.checked_add(o.value))
    }
}
