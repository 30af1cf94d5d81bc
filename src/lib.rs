//! # UTXO-Settlement
//!
//! Single-ledger transaction validator and batch-settlement engine over an
//! unspent-output set.
//!
//! Given a snapshot of currently spendable outputs, the crate decides whether
//! an individual proposed transaction is well-formed and authorized, and
//! settles an unordered batch of proposals (an "epoch") by admitting a
//! deterministic, mutually consistent subset and applying its effects to the
//! set.
//!
//! ## Architecture
//!
//! Three components, processed bottom-up:
//! - [`UtxoSet`]: authoritative map from output identifier to owned
//!   value + owner; the only mutable state
//! - [`validation`]: pure five-point admissibility predicate over one
//!   transaction and the current set
//! - [`settlement`]: greedy single-pass epoch processor that commits each
//!   accepted transaction's effects before evaluating the next
//!
//! ## Design Principles
//!
//! 1. **Pure Validation**: the validator reads the set and never mutates it
//! 2. **Exact Arithmetic**: monetary sums use checked integer arithmetic;
//!    overflow is a validation failure, never a panic
//! 3. **Order-Dependent Settlement**: intra-epoch conflicts are resolved by
//!    caller-supplied order, deterministically
//! 4. **Exact Version Pinning**: validation-critical dependencies are pinned
//!    to exact versions
//!
//! ## Usage
//!
//! ```rust
//! use utxo_settlement::{Ledger, UtxoSet};
//! use utxo_settlement::types::{OutPoint, TransactionOutput};
//!
//! let mut set = UtxoSet::new();
//! set.add(
//!     OutPoint { hash: [1; 32], index: 0 },
//!     TransactionOutput { value: 10, owner: vec![0x02; 33] },
//! );
//!
//! // The ledger takes a defensive copy; the caller's set is never aliased.
//! let mut ledger = Ledger::new(&set);
//! let accepted = ledger.handle_epoch(&[]).unwrap();
//! assert!(accepted.is_empty());
//! assert_eq!(ledger.utxo_set().len(), 1);
//! ```

pub mod crypto;
pub mod error;
pub mod settlement;
pub mod transaction;
pub mod types;
pub mod utxo;
pub mod validation;

// Re-export commonly used items
pub use crypto::{Secp256k1Scheme, SignatureScheme};
pub use error::{LedgerError, Result};
pub use types::{Transaction, ValidationResult, ValuePolicy};
pub use utxo::UtxoSet;

/// Ledger facade: owns the unspent-output set across epochs
///
/// Constructed from a defensive copy of the caller's set, so the original is
/// unaffected by settlement. The set held here is the sole mutable state and
/// is only mutated by [`Ledger::handle_epoch`].
pub struct Ledger<S: SignatureScheme = Secp256k1Scheme> {
    utxo_set: UtxoSet,
    scheme: S,
    policy: ValuePolicy,
}

impl Ledger<Secp256k1Scheme> {
    /// Create a ledger over a copy of the given set, verifying signatures
    /// with ECDSA over secp256k1
    pub fn new(utxo_set: &UtxoSet) -> Self {
        Self::with_scheme(utxo_set, Secp256k1Scheme::new())
    }
}

impl<S: SignatureScheme> Ledger<S> {
    /// Create a ledger over a copy of the given set with a caller-supplied
    /// signature scheme
    pub fn with_scheme(utxo_set: &UtxoSet, scheme: S) -> Self {
        Self {
            utxo_set: utxo_set.clone(),
            scheme,
            policy: ValuePolicy::default(),
        }
    }

    /// Override the output value sign policy
    pub fn with_policy(mut self, policy: ValuePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Is this transaction individually admissible against the current set
    pub fn is_valid(&self, tx: &Transaction) -> Result<ValidationResult> {
        validation::check_transaction(tx, &self.utxo_set, &self.scheme, self.policy)
    }

    /// Settle one epoch: returns the accepted subsequence and updates the
    /// held set with its effects
    pub fn handle_epoch(&mut self, proposed: &[Transaction]) -> Result<Vec<Transaction>> {
        settlement::handle_epoch(proposed, &mut self.utxo_set, &self.scheme, self.policy)
    }

    /// The current unspent-output set
    pub fn utxo_set(&self) -> &UtxoSet {
        &self.utxo_set
    }

    /// Consume the ledger, handing the set back to seed the next epoch's
    /// ledger
    pub fn into_utxo_set(self) -> UtxoSet {
        self.utxo_set
    }
}
