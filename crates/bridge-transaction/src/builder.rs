//! Lock-transaction construction and signing.
//!
//! Builds the single-input, two-or-three-output transaction shape the
//! bridge's lock leg uses: a payment to an operator, a zero-value data
//! carrier with the cross-chain recipient reference, and the remainder
//! back to the signer. The change output of one step becomes the sole
//! input of the next, so the builder returns it as an owned [`Utxo`].

use bridge_primitives::{Hash, Network, PrivateKey};
use bridge_script::Address;

use crate::input::TransactionInput;
use crate::output::TransactionOutput;
use crate::template::{data, p2pkh, UnlockingScriptTemplate};
use crate::transaction::Transaction;
use crate::TransactionError;

/// Output position of the change output when one is emitted.
pub const CHANGE_OUTPUT_INDEX: u32 = 2;

/// An unspent transaction output owned by the signer.
///
/// Exactly one live `Utxo` exists per run; it is moved into each build
/// step and replaced by the step's change output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Utxo {
    /// Transaction id of the output.
    pub txid: Hash,
    /// Index of the output within its transaction.
    pub index: u32,
    /// Value held by the output.
    pub value: u64,
}

/// Flat fee configuration for built transactions.
///
/// The fee is a fixed per-transaction value, not estimated from size.
#[derive(Clone, Copy, Debug, Default)]
pub struct FeePolicy {
    /// Base units deducted from the input in addition to the payment.
    pub flat: u64,
}

impl FeePolicy {
    /// A policy charging a fixed fee per transaction.
    pub fn flat(value: u64) -> Self {
        FeePolicy { flat: value }
    }
}

/// A fully signed, serialized transaction.
///
/// Immutable once built; later steps cannot mutate it.
#[derive(Clone, Debug)]
pub struct SignedTransaction {
    /// The transaction id.
    pub txid: Hash,
    /// The wire-format bytes accepted by the chain's consensus rules.
    pub raw: Vec<u8>,
    /// The change output, when a remainder exists; feeds the next step.
    pub change: Option<Utxo>,
}

impl SignedTransaction {
    /// The raw transaction as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.raw)
    }
}

/// Build and sign one lock transaction.
///
/// Output layout:
/// 0. payment of `amount` to `destination`;
/// 1. zero-value data carrier embedding `reference` byte-exact;
/// 2. change back to the signer's own address, only when the remainder
///    after the fee is positive.
///
/// The input UTXO must be a P2PKH output locked to `signing_key`'s public
/// key hash. Fails with `InsufficientFunds` before any signing when the
/// UTXO cannot cover `amount` plus the fee.
pub fn build_lock_transaction(
    destination: &Address,
    amount: u64,
    utxo: Utxo,
    reference: &[u8],
    signing_key: &PrivateKey,
    network: Network,
    fee_policy: &FeePolicy,
) -> Result<SignedTransaction, TransactionError> {
    let fee = fee_policy.flat;
    let required = amount
        .checked_add(fee)
        .ok_or_else(|| TransactionError::InvalidTransaction("amount overflow".to_string()))?;
    if utxo.value < required {
        return Err(TransactionError::InsufficientFunds {
            required,
            available: utxo.value,
        });
    }

    let signer_address =
        Address::from_public_key_hash(&signing_key.public_key_hash(), network);
    let signer_script = p2pkh::lock(&signer_address);

    let mut tx = Transaction::new();

    // Single input: the supplied UTXO, assumed locked to the signer.
    let mut input = TransactionInput::new(*utxo.txid.as_bytes(), utxo.index);
    input.set_source_output(Some(TransactionOutput::new(
        utxo.value,
        signer_script.clone(),
    )));
    tx.add_input(input);

    tx.add_output(TransactionOutput::new(amount, p2pkh::lock(destination)));
    tx.add_output(TransactionOutput::new(0, data::embed(reference)?));

    let change_value = utxo.value - amount - fee;
    if change_value > 0 {
        tx.add_output(TransactionOutput::new(change_value, signer_script));
    }

    let unlocker = p2pkh::unlock(signing_key.clone(), None);
    let unlocking_script = unlocker.sign(&tx, 0)?;
    tx.inputs[0].unlocking_script = Some(unlocking_script);

    let raw = tx.to_bytes();
    let txid = Hash::new(tx.tx_id());

    let change = (change_value > 0).then_some(Utxo {
        txid,
        index: CHANGE_OUTPUT_INDEX,
        value: change_value,
    });

    Ok(SignedTransaction { txid, raw, change })
}
