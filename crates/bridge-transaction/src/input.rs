//! Transaction input referencing a previous output.
//!
//! Contains the source transaction id, output index, unlocking script, and
//! sequence number, plus the source output's value and locking script so
//! the signer can compute signature hashes without refetching anything.

use bridge_primitives::util::{ByteReader, ByteWriter, VarInt};
use bridge_script::Script;

use crate::output::TransactionOutput;
use crate::TransactionError;

/// Default sequence number indicating a finalized input.
pub const DEFAULT_SEQUENCE_NUMBER: u32 = 0xFFFF_FFFF;

/// A single input in a transaction.
///
/// References an output of a previous transaction by txid and index. The
/// `unlocking_script` (scriptSig) supplies the data that satisfies the
/// referenced output's locking script; it is `None` until the input is
/// signed.
///
/// # Wire format
///
/// | Field               | Size          |
/// |---------------------|---------------|
/// | source_txid         | 32 bytes (LE) |
/// | source_output_index | 4 bytes (LE)  |
/// | script length       | VarInt        |
/// | unlocking_script    | variable      |
/// | sequence_number     | 4 bytes (LE)  |
#[derive(Clone, Debug)]
pub struct TransactionInput {
    /// The txid of the output being spent, in internal byte order.
    pub source_txid: [u8; 32],

    /// Index of the output within the source transaction.
    pub source_output_index: u32,

    /// Sequence number. Defaults to `0xFFFFFFFF` (finalized).
    pub sequence_number: u32,

    /// The unlocking script proving authorization; `None` until signed.
    pub unlocking_script: Option<Script>,

    /// Value and locking script of the output being spent, required for
    /// signature hash computation.
    source_output: Option<TransactionOutput>,
}

impl TransactionInput {
    /// Create an unsigned input spending the given outpoint.
    pub fn new(source_txid: [u8; 32], source_output_index: u32) -> Self {
        TransactionInput {
            source_txid,
            source_output_index,
            sequence_number: DEFAULT_SEQUENCE_NUMBER,
            unlocking_script: None,
            source_output: None,
        }
    }

    /// Deserialize an input from a `ByteReader`.
    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, TransactionError> {
        let txid_bytes = reader.read_bytes(32).map_err(|e| {
            TransactionError::SerializationError(format!("reading source txid: {}", e))
        })?;
        let mut source_txid = [0u8; 32];
        source_txid.copy_from_slice(txid_bytes);

        let source_output_index = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading output index: {}", e))
        })?;

        let script_len = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading script length: {}", e))
        })?;

        let script_bytes = reader.read_bytes(script_len.value() as usize).map_err(|e| {
            TransactionError::SerializationError(format!("reading unlocking script: {}", e))
        })?;

        let sequence_number = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading sequence number: {}", e))
        })?;

        let unlocking_script = if script_bytes.is_empty() {
            None
        } else {
            Some(Script::from_bytes(script_bytes))
        };

        Ok(TransactionInput {
            source_txid,
            source_output_index,
            sequence_number,
            unlocking_script,
            source_output: None,
        })
    }

    /// Serialize this input into a `ByteWriter`.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_bytes(&self.source_txid);
        writer.write_u32_le(self.source_output_index);

        match &self.unlocking_script {
            Some(script) => {
                let script_bytes = script.to_bytes();
                writer.write_varint(VarInt::from(script_bytes.len()));
                writer.write_bytes(script_bytes);
            }
            None => writer.write_varint(VarInt::from(0u64)),
        }

        writer.write_u32_le(self.sequence_number);
    }

    /// Attach the source output being spent (value + locking script).
    pub fn set_source_output(&mut self, output: Option<TransactionOutput>) {
        self.source_output = output;
    }

    /// The source output, if attached.
    pub fn source_output(&self) -> Option<&TransactionOutput> {
        self.source_output.as_ref()
    }

    /// The value of the source output, if attached.
    pub fn source_value(&self) -> Option<u64> {
        self.source_output.as_ref().map(|o| o.value)
    }
}
