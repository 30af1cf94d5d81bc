//! End-to-end epoch settlement tests with real secp256k1 signatures

use utxo_settlement::crypto::test_support::*;
use utxo_settlement::types::*;
use utxo_settlement::*;

/// One output O1 = (value 10, owner K1), as in the walkthrough scenario
fn genesis() -> (UtxoSet, OutPoint, secp256k1::SecretKey) {
    let (k1_sk, k1_pk) = keypair(1);
    let mut set = UtxoSet::new();
    let o1 = OutPoint { hash: [0xab; 32], index: 0 };
    set.add(o1, TransactionOutput { value: 10, owner: owner_bytes(&k1_pk) });
    (set, o1, k1_sk)
}

fn pay(value: Value, seed: u8) -> TransactionOutput {
    let (_, pk) = keypair(seed);
    TransactionOutput { value, owner: owner_bytes(&pk) }
}

#[test]
fn test_single_transfer_scenario() {
    let (set, o1, k1) = genesis();
    let mut ledger = Ledger::new(&set);

    // T1: spends O1, pays 10 to K2
    let t1 = signed_transaction(&[(o1, k1)], vec![pay(10, 2)]);
    assert_eq!(ledger.is_valid(&t1).unwrap(), ValidationResult::Valid);

    let accepted = ledger.handle_epoch(&[t1.clone()]).unwrap();
    assert_eq!(accepted, vec![t1.clone()]);

    // O1 is gone; (T1.hash, 0) = (10, K2) is present
    assert!(!ledger.utxo_set().contains(&o1));
    let created = OutPoint { hash: t1.hash, index: 0 };
    let output = ledger.utxo_set().get(&created).unwrap();
    assert_eq!(output.value, 10);
    assert_eq!(output.owner, owner_bytes(&keypair(2).1));
}

#[test]
fn test_double_spend_in_batch_rejected() {
    let (set, o1, k1) = genesis();
    let mut ledger = Ledger::new(&set);

    let t1 = signed_transaction(&[(o1, k1)], vec![pay(10, 2)]);
    // T2 also spends O1 and is individually well-formed
    let t2 = signed_transaction(&[(o1, k1)], vec![pay(10, 3)]);
    assert_eq!(ledger.is_valid(&t2).unwrap(), ValidationResult::Valid);

    let accepted = ledger.handle_epoch(&[t1.clone(), t2.clone()]).unwrap();

    // Exactly the earlier transaction wins, regardless of T2's signature
    assert_eq!(accepted, vec![t1]);
    assert!(!ledger.utxo_set().contains(&OutPoint { hash: t2.hash, index: 0 }));
}

#[test]
fn test_value_inflation_rejected() {
    let (set, o1, k1) = genesis();
    let mut ledger = Ledger::new(&set);

    // T3: valid signature, but creates 11 out of 10
    let t3 = signed_transaction(&[(o1, k1)], vec![pay(11, 2)]);

    assert!(matches!(
        ledger.is_valid(&t3).unwrap(),
        ValidationResult::Invalid(_)
    ));
    let accepted = ledger.handle_epoch(&[t3]).unwrap();
    assert!(accepted.is_empty());
    assert!(ledger.utxo_set().contains(&o1));
}

#[test]
fn test_conservation_across_epoch() {
    let (k1_sk, k1_pk) = keypair(1);
    let mut set = UtxoSet::new();
    let a = OutPoint { hash: [1; 32], index: 0 };
    let b = OutPoint { hash: [2; 32], index: 0 };
    set.add(a, TransactionOutput { value: 60, owner: owner_bytes(&k1_pk) });
    set.add(b, TransactionOutput { value: 40, owner: owner_bytes(&k1_pk) });
    let before = set.total_value().unwrap();

    let mut ledger = Ledger::new(&set);
    // Pays 55 of 60, leaving 5 as implied fee
    let t1 = signed_transaction(&[(a, k1_sk)], vec![pay(55, 2)]);
    // Exact transfer of 40
    let t2 = signed_transaction(&[(b, k1_sk)], vec![pay(40, 3)]);

    let accepted = ledger.handle_epoch(&[t1, t2]).unwrap();
    assert_eq!(accepted.len(), 2);

    // Total created value never exceeds total consumed value
    let after = ledger.utxo_set().total_value().unwrap();
    assert!(after <= before);
    assert_eq!(after, 95);
}

#[test]
fn test_mixed_batch_filters_only_invalid() {
    let (k1_sk, k1_pk) = keypair(1);
    let mut set = UtxoSet::new();
    let a = OutPoint { hash: [1; 32], index: 0 };
    let b = OutPoint { hash: [2; 32], index: 0 };
    set.add(a, TransactionOutput { value: 30, owner: owner_bytes(&k1_pk) });
    set.add(b, TransactionOutput { value: 20, owner: owner_bytes(&k1_pk) });

    let mut ledger = Ledger::new(&set);

    let good = signed_transaction(&[(a, k1_sk)], vec![pay(30, 2)]);
    let inflating = signed_transaction(&[(b, k1_sk)], vec![pay(21, 3)]);
    let (intruder_sk, _) = keypair(9);
    let stolen = signed_transaction(&[(b, intruder_sk)], vec![pay(20, 9)]);
    let ghost = signed_transaction(
        &[(OutPoint { hash: [0xee; 32], index: 0 }, k1_sk)],
        vec![pay(1, 2)],
    );

    let accepted = ledger
        .handle_epoch(&[inflating, good.clone(), stolen, ghost])
        .unwrap();

    // Invalid proposals are silently excluded, never abort the epoch
    assert_eq!(accepted, vec![good]);
    assert!(ledger.utxo_set().contains(&b));
}

#[test]
fn test_epoch_chaining_via_returned_set() {
    let (set, o1, k1) = genesis();
    let (k2_sk, k2_pk) = keypair(2);

    let mut ledger = Ledger::new(&set);
    let t1 = signed_transaction(
        &[(o1, k1)],
        vec![TransactionOutput { value: 10, owner: owner_bytes(&k2_pk) }],
    );
    ledger.handle_epoch(&[t1.clone()]).unwrap();

    // Seed the next epoch's ledger from the previous result
    let carried = ledger.into_utxo_set();
    let mut next = Ledger::new(&carried);

    let created = OutPoint { hash: t1.hash, index: 0 };
    let t2 = signed_transaction(&[(created, k2_sk)], vec![pay(10, 3)]);
    let accepted = next.handle_epoch(&[t2.clone()]).unwrap();

    assert_eq!(accepted, vec![t2.clone()]);
    assert!(next.utxo_set().contains(&OutPoint { hash: t2.hash, index: 0 }));
}

#[test]
fn test_rerun_same_epoch_same_result() {
    let (set, o1, k1) = genesis();
    let t1 = signed_transaction(&[(o1, k1)], vec![pay(10, 2)]);
    let t2 = signed_transaction(&[(o1, k1)], vec![pay(9, 3)]);
    let batch = vec![t1, t2];

    let mut first = Ledger::new(&set);
    let mut second = Ledger::new(&set);
    let accepted_first = first.handle_epoch(&batch).unwrap();
    let accepted_second = second.handle_epoch(&batch).unwrap();

    assert_eq!(accepted_first, accepted_second);
    assert_eq!(first.utxo_set(), second.utxo_set());
}

#[test]
fn test_multi_input_split_across_owners() {
    let (k1_sk, k1_pk) = keypair(1);
    let (k2_sk, k2_pk) = keypair(2);
    let mut set = UtxoSet::new();
    let a = OutPoint { hash: [1; 32], index: 0 };
    let b = OutPoint { hash: [2; 32], index: 0 };
    set.add(a, TransactionOutput { value: 7, owner: owner_bytes(&k1_pk) });
    set.add(b, TransactionOutput { value: 5, owner: owner_bytes(&k2_pk) });

    let mut ledger = Ledger::new(&set);
    // Each input signed by the key matching its referenced output's owner
    let tx = signed_transaction(&[(a, k1_sk), (b, k2_sk)], vec![pay(6, 3), pay(6, 4)]);

    let accepted = ledger.handle_epoch(&[tx.clone()]).unwrap();
    assert_eq!(accepted.len(), 1);
    assert_eq!(ledger.utxo_set().len(), 2);
    assert!(ledger.utxo_set().contains(&OutPoint { hash: tx.hash, index: 1 }));
}
