//! Signature hash computation for transaction signing.
//!
//! The deposit chain uses the original (pre-fork) signature hash: the
//! transaction is re-serialized with every unlocking script removed except
//! for the signed input, which carries the locking script of the output it
//! spends, then the four-byte sighash type is appended and the whole thing
//! is double-SHA-256 hashed.

use bridge_primitives::hash::sha256d;
use bridge_primitives::util::{ByteWriter, VarInt};

use crate::transaction::Transaction;
use crate::TransactionError;

// -----------------------------------------------------------------------
// Sighash flag constants
// -----------------------------------------------------------------------

/// Sign all inputs and all outputs (the default).
pub const SIGHASH_ALL: u32 = 0x01;

/// Sign all inputs but no outputs, allowing outputs to be modified.
pub const SIGHASH_NONE: u32 = 0x02;

/// Sign all inputs and only the output at the signed input's index.
pub const SIGHASH_SINGLE: u32 = 0x03;

/// Only sign the current input, allowing other inputs to be added later.
pub const SIGHASH_ANYONECANPAY: u32 = 0x80;

/// Mask applied to extract the base sighash type.
pub const SIGHASH_MASK: u32 = 0x1f;

// -----------------------------------------------------------------------
// Legacy signature hash
// -----------------------------------------------------------------------

/// Compute the signature hash for a given input.
///
/// # Arguments
/// * `tx`           - The transaction being signed.
/// * `input_index`  - Index of the input being signed.
/// * `subscript`    - The locking script of the output being spent.
/// * `sighash_type` - The combined sighash flags (e.g. `SIGHASH_ALL`).
///
/// # Returns
/// A 32-byte double-SHA256 hash to be signed by ECDSA.
pub fn signature_hash(
    tx: &Transaction,
    input_index: usize,
    subscript: &[u8],
    sighash_type: u32,
) -> Result<[u8; 32], TransactionError> {
    if input_index >= tx.inputs.len() {
        return Err(TransactionError::InvalidTransaction(format!(
            "input index {} out of range (tx has {} inputs)",
            input_index,
            tx.inputs.len()
        )));
    }

    let base_type = sighash_type & SIGHASH_MASK;

    // Consensus quirk: SIGHASH_SINGLE with no matching output signs the
    // constant 1 instead of a transaction digest.
    if base_type == SIGHASH_SINGLE && input_index >= tx.outputs.len() {
        let mut one = [0u8; 32];
        one[0] = 0x01;
        return Ok(one);
    }

    let preimage = calc_preimage(tx, input_index, subscript, sighash_type)?;
    Ok(sha256d(&preimage))
}

/// Compute the pre-image bytes hashed by `signature_hash`.
///
/// The preimage is the transaction re-serialized under the sighash rules
/// (scripts substituted, inputs/outputs filtered per the flags) followed
/// by the 4-byte LE sighash type.
pub fn calc_preimage(
    tx: &Transaction,
    input_index: usize,
    subscript: &[u8],
    sighash_type: u32,
) -> Result<Vec<u8>, TransactionError> {
    if input_index >= tx.inputs.len() {
        return Err(TransactionError::InvalidTransaction(format!(
            "input index {} out of range (tx has {} inputs)",
            input_index,
            tx.inputs.len()
        )));
    }

    let base_type = sighash_type & SIGHASH_MASK;
    let anyone_can_pay = sighash_type & SIGHASH_ANYONECANPAY != 0;

    let mut writer = ByteWriter::with_capacity(256);
    writer.write_u32_le(tx.version);

    // Inputs: only the signed one under ANYONECANPAY, all otherwise.
    if anyone_can_pay {
        writer.write_varint(VarInt::from(1u64));
        write_input(&mut writer, tx, input_index, input_index, subscript, base_type);
    } else {
        writer.write_varint(VarInt::from(tx.inputs.len()));
        for i in 0..tx.inputs.len() {
            write_input(&mut writer, tx, i, input_index, subscript, base_type);
        }
    }

    // Outputs: none for NONE, the leading slice up to the signed index for
    // SINGLE (earlier entries blanked), all for everything else.
    match base_type {
        SIGHASH_NONE => writer.write_varint(VarInt::from(0u64)),
        SIGHASH_SINGLE => {
            writer.write_varint(VarInt::from(input_index + 1));
            // Earlier outputs are blanked: value -1, empty script.
            for _ in 0..input_index {
                writer.write_u64_le(u64::MAX);
                writer.write_varint(VarInt::from(0u64));
            }
            writer.write_bytes(&tx.outputs[input_index].to_bytes());
        }
        _ => {
            writer.write_varint(VarInt::from(tx.outputs.len()));
            for output in &tx.outputs {
                writer.write_bytes(&output.to_bytes());
            }
        }
    }

    writer.write_u32_le(tx.lock_time);
    writer.write_u32_le(sighash_type);

    Ok(writer.into_bytes())
}

/// Serialize one input under the sighash substitution rules.
///
/// The signed input carries the subscript; all others carry an empty
/// script, and their sequence numbers are zeroed under NONE/SINGLE.
fn write_input(
    writer: &mut ByteWriter,
    tx: &Transaction,
    index: usize,
    signed_index: usize,
    subscript: &[u8],
    base_type: u32,
) {
    let input = &tx.inputs[index];
    writer.write_bytes(&input.source_txid);
    writer.write_u32_le(input.source_output_index);

    if index == signed_index {
        writer.write_varint(VarInt::from(subscript.len()));
        writer.write_bytes(subscript);
        writer.write_u32_le(input.sequence_number);
    } else {
        writer.write_varint(VarInt::from(0u64));
        let sequence = if base_type == SIGHASH_NONE || base_type == SIGHASH_SINGLE {
            0
        } else {
            input.sequence_number
        };
        writer.write_u32_le(sequence);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::TransactionInput;
    use crate::output::TransactionOutput;
    use bridge_script::Script;

    fn sample_tx() -> Transaction {
        let mut tx = Transaction::new();
        tx.add_input(TransactionInput::new([0x11; 32], 0));
        tx.add_input(TransactionInput::new([0x22; 32], 1));
        tx.add_output(TransactionOutput::new(
            5_000,
            Script::from_bytes(&[0x51]),
        ));
        tx.add_output(TransactionOutput::new(
            7_000,
            Script::from_bytes(&[0x52]),
        ));
        tx
    }

    /// The ALL preimage covers every input and output plus the flag.
    #[test]
    fn test_preimage_all_layout() {
        let tx = sample_tx();
        let subscript = [0x76u8, 0xa9];
        let preimage = calc_preimage(&tx, 0, &subscript, SIGHASH_ALL).unwrap();

        // version + varint + 2 inputs (signed carries the subscript) +
        // varint + 2 outputs + locktime + sighash type
        let expected_len = 4
            + 1
            + (36 + 1 + subscript.len() + 4)
            + (36 + 1 + 4)
            + 1
            + (8 + 1 + 1) * 2
            + 4
            + 4;
        assert_eq!(preimage.len(), expected_len);
        // The sighash type trails the preimage.
        assert_eq!(&preimage[preimage.len() - 4..], &[0x01, 0x00, 0x00, 0x00]);
    }

    /// Different sighash flags produce different digests.
    #[test]
    fn test_flags_change_digest() {
        let tx = sample_tx();
        let subscript = [0x76u8, 0xa9];
        let all = signature_hash(&tx, 0, &subscript, SIGHASH_ALL).unwrap();
        let none = signature_hash(&tx, 0, &subscript, SIGHASH_NONE).unwrap();
        let acp = signature_hash(&tx, 0, &subscript, SIGHASH_ALL | SIGHASH_ANYONECANPAY).unwrap();
        assert_ne!(all, none);
        assert_ne!(all, acp);
    }

    /// The digest commits to the subscript.
    #[test]
    fn test_subscript_committed() {
        let tx = sample_tx();
        let a = signature_hash(&tx, 0, &[0x76, 0xa9], SIGHASH_ALL).unwrap();
        let b = signature_hash(&tx, 0, &[0x76, 0xaa], SIGHASH_ALL).unwrap();
        assert_ne!(a, b);
    }

    /// SIGHASH_SINGLE with no output at the input's index signs the
    /// constant one, per consensus.
    #[test]
    fn test_single_out_of_range_quirk() {
        let mut tx = sample_tx();
        tx.outputs.truncate(1);
        let digest = signature_hash(&tx, 1, &[0x51], SIGHASH_SINGLE).unwrap();
        let mut one = [0u8; 32];
        one[0] = 0x01;
        assert_eq!(digest, one);
    }

    /// Out-of-range input indices are rejected.
    #[test]
    fn test_input_index_range() {
        let tx = sample_tx();
        assert!(signature_hash(&tx, 2, &[], SIGHASH_ALL).is_err());
        assert!(calc_preimage(&tx, 5, &[], SIGHASH_ALL).is_err());
    }
}
