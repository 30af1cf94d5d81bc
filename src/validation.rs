//! Individual transaction admissibility: the five-point validity contract

use crate::crypto::SignatureScheme;
use crate::error::{LedgerError, Result};
use crate::types::{Transaction, ValidationResult, Value, ValuePolicy};
use crate::utxo::UtxoSet;
use std::collections::HashSet;

/// CheckTransaction: is this transaction individually admissible right now
///
/// A transaction tx is valid against the UTXO set us if and only if:
/// 1. Every output claimed by tx is present in us
/// 2. The signature on each input verifies against tx's signing message at
///    that position, under the owner recorded on the referenced output
/// 3. No output is claimed more than once by tx's own inputs
/// 4. Every output value tx creates is admissible under the value policy
/// 5. The sum of claimed input values is >= the sum of created output values
///
/// Checks run in order with short-circuit on first failure; all five are
/// independent conjuncts, so the order only affects which reason string an
/// invalid transaction reports. Reads us; never mutates it.
pub fn check_transaction(
    tx: &Transaction,
    utxo_set: &UtxoSet,
    scheme: &dyn SignatureScheme,
    policy: ValuePolicy,
) -> Result<ValidationResult> {
    // 1. Check every claimed output exists and is unspent
    for (i, input) in tx.inputs.iter().enumerate() {
        if !utxo_set.contains(&input.outpoint()) {
            return Ok(ValidationResult::Invalid(format!(
                "input {} references an output not in the UTXO set",
                i
            )));
        }
    }

    // 2. Check each input's signature against the referenced output's owner
    for (i, input) in tx.inputs.iter().enumerate() {
        let claimed = match utxo_set.get(&input.outpoint()) {
            Some(output) => output,
            None => {
                return Ok(ValidationResult::Invalid(format!(
                    "input {} references an output not in the UTXO set",
                    i
                )))
            }
        };
        let message = tx.signing_message(i);
        if !scheme.verify(&claimed.owner, &message, &input.signature) {
            return Ok(ValidationResult::Invalid(format!(
                "signature at input {} does not verify",
                i
            )));
        }
    }

    // 3. Check no output is claimed twice within this transaction
    let mut claimed_once = HashSet::new();
    for (i, input) in tx.inputs.iter().enumerate() {
        if !claimed_once.insert(input.outpoint()) {
            return Ok(ValidationResult::Invalid(format!(
                "input {} claims an output already claimed by this transaction",
                i
            )));
        }
    }

    // 4. Check created output values against the sign policy
    for (i, output) in tx.outputs.iter().enumerate() {
        if !policy.admits(output.value) {
            return Ok(ValidationResult::Invalid(format!(
                "output {} has inadmissible value {}",
                i, output.value
            )));
        }
    }

    // 5. Check conservation of value with exact, checked arithmetic
    let input_sum = match claimed_value_sum(tx, utxo_set) {
        Some(sum) => sum,
        None => {
            return Ok(ValidationResult::Invalid(
                "input value sum overflows".to_string(),
            ))
        }
    };
    let output_sum = match created_value_sum(tx) {
        Some(sum) => sum,
        None => {
            return Ok(ValidationResult::Invalid(
                "output value sum overflows".to_string(),
            ))
        }
    };
    if input_sum < output_sum {
        return Ok(ValidationResult::Invalid(format!(
            "outputs ({}) exceed inputs ({})",
            output_sum, input_sum
        )));
    }

    Ok(ValidationResult::Valid)
}

/// Implied fee of a transaction: claimed input value minus created output value
///
/// Errors if an input references an output not in the set or a sum
/// overflows; does not imply the transaction is otherwise valid.
pub fn transaction_fee(tx: &Transaction, utxo_set: &UtxoSet) -> Result<Value> {
    for input in &tx.inputs {
        if !utxo_set.contains(&input.outpoint()) {
            return Err(LedgerError::UnknownOutput(input.outpoint()));
        }
    }

    let input_sum = claimed_value_sum(tx, utxo_set)
        .ok_or_else(|| LedgerError::ValueOverflow("claimed input values".to_string()))?;
    let output_sum = created_value_sum(tx)
        .ok_or_else(|| LedgerError::ValueOverflow("created output values".to_string()))?;

    input_sum
        .checked_sub(output_sum)
        .ok_or_else(|| LedgerError::ValueOverflow("fee".to_string()))
}

/// Sum of values of the outputs tx claims, looked up in the set; `None` on
/// overflow or on a missing output
fn claimed_value_sum(tx: &Transaction, utxo_set: &UtxoSet) -> Option<Value> {
    tx.inputs.iter().try_fold(0 as Value, |acc, input| {
        let output = utxo_set.get(&input.outpoint())?;
        acc.checked_add(output.value)
    })
}

/// Sum of values of the outputs tx declares; `None` on overflow
fn created_value_sum(tx: &Transaction) -> Option<Value> {
    tx.outputs
        .iter()
        .try_fold(0 as Value, |acc, output| acc.checked_add(output.value))
}
