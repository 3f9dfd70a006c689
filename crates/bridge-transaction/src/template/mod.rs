//! Script templates for the output shapes the bridge emits.

pub mod data;
pub mod p2pkh;

use bridge_script::Script;

use crate::transaction::Transaction;
use crate::TransactionError;

/// A template capable of producing unlocking scripts for inputs.
pub trait UnlockingScriptTemplate {
    /// Sign the specified input and produce its unlocking script.
    fn sign(&self, tx: &Transaction, input_index: u32) -> Result<Script, TransactionError>;

    /// Estimate the byte length of the unlocking script this template
    /// produces.
    fn estimate_length(&self, tx: &Transaction, input_index: u32) -> u32;
}
