//! Signature scheme abstraction and the secp256k1 implementation
//!
//! The validator only needs one capability: "does this signature, over this
//! message, verify under this owner identity." Owner identities are opaque
//! bytes interpreted by the scheme, so alternate signature algorithms can be
//! substituted without touching validator logic.

use secp256k1::ecdsa::Signature;
use secp256k1::{Message, PublicKey, Secp256k1, VerifyOnly};
use sha2::{Digest, Sha256};

/// Stateless signature verification capability
///
/// Implementations must be pure and must never panic on malformed owner,
/// message, or signature bytes; malformed input is simply "not verified".
pub trait SignatureScheme {
    fn verify(&self, owner: &[u8], message: &[u8], signature: &[u8]) -> bool;
}

/// ECDSA over secp256k1 with SHA-256 message digests
///
/// Owner identities are SEC1-encoded public keys; signatures are DER.
pub struct Secp256k1Scheme {
    secp: Secp256k1<VerifyOnly>,
}

impl Secp256k1Scheme {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::verification_only(),
        }
    }
}

impl Default for Secp256k1Scheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureScheme for Secp256k1Scheme {
    fn verify(&self, owner: &[u8], message: &[u8], signature: &[u8]) -> bool {
        // Parse public key
        let pubkey = match PublicKey::from_slice(owner) {
            Ok(pk) => pk,
            Err(_) => return false,
        };

        // Parse signature (DER format)
        let signature = match Signature::from_der(signature) {
            Ok(sig) => sig,
            Err(_) => return false,
        };

        let digest = Sha256::digest(message);
        let message = match Message::from_digest_slice(&digest) {
            Ok(m) => m,
            Err(_) => return false,
        };

        self.secp.verify_ecdsa(&message, &signature, &pubkey).is_ok()
    }
}

/// Deterministic key and signing helpers for tests
///
/// Key material is derived from fixed seed bytes so tests need no OS
/// randomness and stay reproducible.
pub mod test_support {
    use super::*;
    use crate::types::{OutPoint, Transaction, TransactionInput, TransactionOutput};
    use secp256k1::SecretKey;

    /// Derive a keypair from a non-zero seed byte
    pub fn keypair(seed: u8) -> (SecretKey, PublicKey) {
        assert_ne!(seed, 0, "all-zero bytes are not a valid secret key");
        let secp = Secp256k1::new();
        let secret_key = SecretKey::from_slice(&[seed; 32]).unwrap();
        let public_key = PublicKey::from_secret_key(&secp, &secret_key);
        (secret_key, public_key)
    }

    /// Encoded owner identity for a public key
    pub fn owner_bytes(public_key: &PublicKey) -> Vec<u8> {
        public_key.serialize().to_vec()
    }

    /// Sign a message, producing the DER bytes the scheme verifies
    pub fn sign(secret_key: &SecretKey, message: &[u8]) -> Vec<u8> {
        let secp = Secp256k1::signing_only();
        let digest = Sha256::digest(message);
        let message = Message::from_digest_slice(&digest).unwrap();
        secp.sign_ecdsa(&message, secret_key).serialize_der().to_vec()
    }

    /// Build a fully signed transaction spending the given outpoints
    ///
    /// Signatures are produced in input order, since the signing message at
    /// position i covers the signatures at earlier positions.
    pub fn signed_transaction(
        spends: &[(OutPoint, SecretKey)],
        outputs: Vec<TransactionOutput>,
    ) -> Transaction {
        let inputs = spends
            .iter()
            .map(|(outpoint, _)| TransactionInput {
                prev_tx_hash: outpoint.hash,
                output_index: outpoint.index,
                signature: vec![],
            })
            .collect();

        let mut tx = Transaction {
            inputs,
            outputs,
            hash: [0u8; 32],
        };
        for (i, (_, secret_key)) in spends.iter().enumerate() {
            let message = tx.signing_message(i);
            tx.inputs[i].signature = sign(secret_key, &message);
        }

        Transaction::new(tx.inputs, tx.outputs)
    }
}
