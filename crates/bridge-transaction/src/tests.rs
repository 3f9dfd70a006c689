//! Tests for the bridge-transaction crate.
//!
//! Covers the lock-transaction builder's output layout, change handling,
//! fee accounting, serialization round-trips, and end-to-end signature
//! verification against the legacy sighash.

use bridge_primitives::{Network, PrivateKey, PublicKey, Signature};
use bridge_script::Address;

use crate::builder::{build_lock_transaction, FeePolicy, Utxo, CHANGE_OUTPUT_INDEX};
use crate::output::TransactionOutput;
use crate::sighash::SIGHASH_ALL;
use crate::template::p2pkh;
use crate::transaction::Transaction;
use crate::TransactionError;

/// A regtest signing key with the compression flag set.
const REGTEST_WIF: &str = "cW9yAP8NRgGGN2qQ4vEQkvqhHFSNzeFPWTLBXriy5R5wf4KBWDbc";

/// The ledger-chain recipient carried across in the data output.
const RECIPIENT_REF: &str = "d2394f3fad76167e7583a876c292c86ed1ffffff";

fn signing_key() -> PrivateKey {
    PrivateKey::from_wif(REGTEST_WIF, Network::Regtest).unwrap()
}

fn operator_address() -> Address {
    Address::from_string("mtdruWYVEV1wz5yL7GvpBj4MgifCB7yhPd", Network::Regtest).unwrap()
}

fn input_utxo(value: u64) -> Utxo {
    Utxo {
        txid: "34bae623d6fd05ac5d57045d0806c78e2f73f44261f0fb5ffe386cd130fad757"
            .parse()
            .unwrap(),
        index: 0,
        value,
    }
}

fn reference() -> Vec<u8> {
    hex::decode(RECIPIENT_REF).unwrap()
}

// -----------------------------------------------------------------------
// Output layout
// -----------------------------------------------------------------------

/// A lock with a remainder produces payment, data, and change outputs in
/// that order, and threads the change as the next UTXO.
#[test]
fn test_lock_with_change() {
    let key = signing_key();
    let signed = build_lock_transaction(
        &operator_address(),
        200_000_000,
        input_utxo(1_000_000_000),
        &reference(),
        &key,
        Network::Regtest,
        &FeePolicy::default(),
    )
    .expect("should build");

    let tx = Transaction::from_bytes(&signed.raw).expect("raw bytes should parse");
    assert_eq!(tx.version, 1);
    assert_eq!(tx.lock_time, 0);
    assert_eq!(tx.input_count(), 1);
    assert_eq!(tx.output_count(), 3);

    // Output 0: payment to the operator.
    assert_eq!(tx.outputs[0].value, 200_000_000);
    assert_eq!(
        tx.outputs[0].locking_script.p2pkh_hash().unwrap(),
        operator_address().public_key_hash
    );

    // Output 1: zero-value data carrier with the exact reference bytes.
    assert_eq!(tx.outputs[1].value, 0);
    assert!(tx.outputs[1].locking_script.is_data_carrier());
    assert_eq!(
        tx.outputs[1].locking_script.data_carrier_payload().unwrap(),
        reference().as_slice()
    );

    // Output 2: the exact remainder, back to the signer.
    assert_eq!(tx.outputs[2].value, 800_000_000);
    assert_eq!(
        tx.outputs[2].locking_script.p2pkh_hash().unwrap(),
        key.public_key_hash()
    );

    let change = signed.change.expect("change should be recorded");
    assert_eq!(change.txid, signed.txid);
    assert_eq!(change.index, CHANGE_OUTPUT_INDEX);
    assert_eq!(change.value, 800_000_000);

    // The recorded txid matches the serialized bytes.
    assert_eq!(signed.txid.to_hex(), tx.tx_id_hex());
}

/// An exact spend emits no change output and ends the UTXO chain.
#[test]
fn test_lock_exact_spend_no_change() {
    let signed = build_lock_transaction(
        &operator_address(),
        500_000,
        input_utxo(500_000),
        &reference(),
        &signing_key(),
        Network::Regtest,
        &FeePolicy::default(),
    )
    .expect("should build");

    let tx = Transaction::from_bytes(&signed.raw).unwrap();
    assert_eq!(tx.output_count(), 2);
    assert!(signed.change.is_none());
}

/// The flat fee is deducted from the change, not the payment.
#[test]
fn test_lock_fee_accounting() {
    let signed = build_lock_transaction(
        &operator_address(),
        400_000,
        input_utxo(1_000_000),
        &reference(),
        &signing_key(),
        Network::Regtest,
        &FeePolicy::flat(100_000),
    )
    .expect("should build");

    let tx = Transaction::from_bytes(&signed.raw).unwrap();
    assert_eq!(tx.outputs[0].value, 400_000);
    assert_eq!(tx.outputs[2].value, 500_000);
    assert_eq!(signed.change.unwrap().value, 500_000);
}

/// An exact spend after the fee also omits the change output.
#[test]
fn test_lock_fee_consumes_remainder() {
    let signed = build_lock_transaction(
        &operator_address(),
        400_000,
        input_utxo(500_000),
        &reference(),
        &signing_key(),
        Network::Regtest,
        &FeePolicy::flat(100_000),
    )
    .expect("should build");
    assert!(signed.change.is_none());
}

// -----------------------------------------------------------------------
// Failure modes
// -----------------------------------------------------------------------

/// A too-small UTXO fails with InsufficientFunds before signing.
#[test]
fn test_insufficient_funds() {
    let err = build_lock_transaction(
        &operator_address(),
        150,
        input_utxo(100),
        &reference(),
        &signing_key(),
        Network::Regtest,
        &FeePolicy::default(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        TransactionError::InsufficientFunds {
            required: 150,
            available: 100
        }
    ));
}

/// The fee counts toward the required amount.
#[test]
fn test_insufficient_funds_including_fee() {
    let err = build_lock_transaction(
        &operator_address(),
        90,
        input_utxo(100),
        &reference(),
        &signing_key(),
        Network::Regtest,
        &FeePolicy::flat(20),
    )
    .unwrap_err();
    assert!(matches!(err, TransactionError::InsufficientFunds { .. }));
}

/// Oversized references are rejected.
#[test]
fn test_reference_too_large() {
    let err = build_lock_transaction(
        &operator_address(),
        100,
        input_utxo(1_000),
        &[0xd2; 41],
        &signing_key(),
        Network::Regtest,
        &FeePolicy::default(),
    )
    .unwrap_err();
    assert!(matches!(err, TransactionError::InvalidReference(_)));
}

// -----------------------------------------------------------------------
// Signature
// -----------------------------------------------------------------------

/// The emitted unlocking script carries a canonical DER signature over
/// the legacy sighash and the signer's public key, and the signature
/// verifies.
#[test]
fn test_signature_verifies() {
    let key = signing_key();
    let utxo = input_utxo(1_000_000_000);
    let signed = build_lock_transaction(
        &operator_address(),
        200_000_000,
        utxo.clone(),
        &reference(),
        &key,
        Network::Regtest,
        &FeePolicy::default(),
    )
    .unwrap();

    let mut tx = Transaction::from_bytes(&signed.raw).unwrap();

    // The input spends the supplied outpoint.
    assert_eq!(&tx.inputs[0].source_txid, utxo.txid.as_bytes());
    assert_eq!(tx.inputs[0].source_output_index, utxo.index);

    // Parse the unlocking script: <push sig+flag> <push pubkey>.
    let script = tx.inputs[0].unlocking_script.clone().expect("signed input");
    let bytes = script.to_bytes().to_vec();
    let sig_len = bytes[0] as usize;
    let sig_and_flag = &bytes[1..1 + sig_len];
    assert_eq!(*sig_and_flag.last().unwrap() as u32, SIGHASH_ALL);
    let pubkey_start = 1 + sig_len + 1;
    let pubkey_len = bytes[1 + sig_len] as usize;
    let pubkey_bytes = &bytes[pubkey_start..pubkey_start + pubkey_len];

    let signature = Signature::from_der(&sig_and_flag[..sig_len - 1]).expect("canonical DER");
    let pubkey = PublicKey::from_bytes(pubkey_bytes).expect("valid pubkey");
    assert_eq!(pubkey.hash160(key.compressed()), key.public_key_hash());

    // Recompute the digest the signer committed to.
    let signer_address = Address::from_public_key_hash(&key.public_key_hash(), Network::Regtest);
    tx.inputs[0].set_source_output(Some(TransactionOutput::new(
        utxo.value,
        p2pkh::lock(&signer_address),
    )));
    let digest = tx.calc_input_signature_hash(0, SIGHASH_ALL).unwrap();
    assert!(pubkey.verify(&digest, &signature));
}

// -----------------------------------------------------------------------
// Serialization
// -----------------------------------------------------------------------

/// Serialized transactions parse back to identical bytes.
#[test]
fn test_serialization_roundtrip() {
    let signed = build_lock_transaction(
        &operator_address(),
        1_000,
        input_utxo(5_000),
        &reference(),
        &signing_key(),
        Network::Regtest,
        &FeePolicy::default(),
    )
    .unwrap();

    let tx = Transaction::from_bytes(&signed.raw).unwrap();
    assert_eq!(tx.to_bytes(), signed.raw);
    assert_eq!(
        Transaction::from_hex(&signed.to_hex()).unwrap().to_bytes(),
        signed.raw
    );
}

/// Trailing bytes after a parsed transaction are rejected.
#[test]
fn test_trailing_bytes_rejected() {
    let signed = build_lock_transaction(
        &operator_address(),
        1_000,
        input_utxo(5_000),
        &reference(),
        &signing_key(),
        Network::Regtest,
        &FeePolicy::default(),
    )
    .unwrap();

    let mut bytes = signed.raw.clone();
    bytes.extend_from_slice(&[0xde, 0xad]);
    assert!(Transaction::from_bytes(&bytes).is_err());
    assert!(Transaction::from_bytes(&[]).is_err());
}
