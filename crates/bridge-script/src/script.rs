/// Script type - a byte sequence of opcodes and data pushes.
///
/// Scripts appear in transaction inputs (unlocking) and outputs (locking).
/// The bridge only ever constructs and classifies the handful of script
/// shapes it emits: P2PKH locking/unlocking scripts and zero-value
/// data-carrier outputs.

use std::fmt;

use crate::opcodes::*;
use crate::ScriptError;

/// A script, represented as a byte vector newtype.
#[derive(Clone, PartialEq, Eq)]
pub struct Script(Vec<u8>);

impl Script {
    /// Create a new empty script.
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from a hex-encoded string.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        let bytes = hex::decode(hex_str).map_err(|e| ScriptError::InvalidHex(e.to_string()))?;
        Ok(Script(bytes))
    }

    /// Create a script from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    /// Encode the script as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// A reference to the underlying bytes.
    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The script length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the script has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a data push with the correct push prefix for its length.
    pub fn append_push_data(&mut self, data: &[u8]) -> Result<(), ScriptError> {
        let prefix = push_data_prefix(data.len())?;
        self.0.extend_from_slice(&prefix);
        self.0.extend_from_slice(data);
        Ok(())
    }

    /// Append raw opcodes without any push semantics.
    pub fn append_opcodes(&mut self, opcodes: &[u8]) {
        self.0.extend_from_slice(opcodes);
    }

    // -----------------------------------------------------------------------
    // Script classification
    // -----------------------------------------------------------------------

    /// Check if this is a pay-to-public-key-hash locking script.
    ///
    /// Pattern: OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG
    pub fn is_p2pkh(&self) -> bool {
        let b = &self.0;
        b.len() == 25
            && b[0] == OP_DUP
            && b[1] == OP_HASH160
            && b[2] == OP_DATA_20
            && b[23] == OP_EQUALVERIFY
            && b[24] == OP_CHECKSIG
    }

    /// Extract the public key hash from a P2PKH locking script.
    pub fn p2pkh_hash(&self) -> Option<[u8; 20]> {
        if !self.is_p2pkh() {
            return None;
        }
        let mut pkh = [0u8; 20];
        pkh.copy_from_slice(&self.0[3..23]);
        Some(pkh)
    }

    /// Check if this is an unspendable data-carrier script (leading OP_RETURN).
    pub fn is_data_carrier(&self) -> bool {
        !self.0.is_empty() && self.0[0] == OP_RETURN
    }

    /// Extract the payload of a single-push data-carrier script.
    ///
    /// Returns the pushed bytes for scripts of the form
    /// `OP_RETURN <push prefix> <payload>`, `None` otherwise.
    pub fn data_carrier_payload(&self) -> Option<&[u8]> {
        if !self.is_data_carrier() || self.0.len() < 2 {
            return None;
        }
        let rest = &self.0[1..];
        let (prefix_len, data_len) = match rest[0] {
            n @ 0x01..=0x4b => (1usize, n as usize),
            OP_PUSHDATA1 if rest.len() >= 2 => (2, rest[1] as usize),
            _ => return None,
        };
        let payload = &rest[prefix_len..];
        if payload.len() != data_len {
            return None;
        }
        Some(payload)
    }
}

/// Compute the push prefix bytes for a data payload of the given length.
pub fn push_data_prefix(data_len: usize) -> Result<Vec<u8>, ScriptError> {
    if data_len <= 75 {
        Ok(vec![data_len as u8])
    } else if data_len <= 0xFF {
        Ok(vec![OP_PUSHDATA1, data_len as u8])
    } else if data_len <= 0xFFFF {
        let mut buf = vec![OP_PUSHDATA2];
        buf.extend_from_slice(&(data_len as u16).to_le_bytes());
        Ok(buf)
    } else if data_len <= 0xFFFF_FFFF {
        let mut buf = vec![OP_PUSHDATA4];
        buf.extend_from_slice(&(data_len as u32).to_le_bytes());
        Ok(buf)
    } else {
        Err(ScriptError::DataTooBig(data_len))
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A P2PKH locking script round-trips through hex and classifies.
    #[test]
    fn test_p2pkh_classification() {
        let script =
            Script::from_hex("76a9148fe80c75c9560e8b56ed64ea3c26e18d2c52211b88ac").unwrap();
        assert!(script.is_p2pkh());
        assert_eq!(
            hex::encode(script.p2pkh_hash().unwrap()),
            "8fe80c75c9560e8b56ed64ea3c26e18d2c52211b"
        );
        assert!(!script.is_data_carrier());
    }

    /// Truncating or altering the pattern breaks classification.
    #[test]
    fn test_p2pkh_negative() {
        let script = Script::from_hex("76a9148fe80c75c9560e8b56ed64ea3c26e18d2c52211b88").unwrap();
        assert!(!script.is_p2pkh());
        assert!(script.p2pkh_hash().is_none());
    }

    /// Data-carrier payload extraction returns the exact pushed bytes.
    #[test]
    fn test_data_carrier_payload() {
        let payload = [0xd2u8; 20];
        let mut script = Script::new();
        script.append_opcodes(&[OP_RETURN]);
        script.append_push_data(&payload).unwrap();
        assert!(script.is_data_carrier());
        assert_eq!(script.data_carrier_payload().unwrap(), &payload);
        assert_eq!(script.len(), 22);
    }

    /// A bare OP_RETURN is a data carrier with no extractable payload.
    #[test]
    fn test_bare_op_return() {
        let script = Script::from_bytes(&[OP_RETURN]);
        assert!(script.is_data_carrier());
        assert!(script.data_carrier_payload().is_none());
    }

    /// Push prefixes for the three encodable size classes.
    #[test]
    fn test_push_data_prefix_boundaries() {
        assert_eq!(push_data_prefix(20).unwrap(), vec![20]);
        assert_eq!(push_data_prefix(75).unwrap(), vec![75]);
        assert_eq!(push_data_prefix(76).unwrap(), vec![OP_PUSHDATA1, 76]);
        assert_eq!(push_data_prefix(255).unwrap(), vec![OP_PUSHDATA1, 255]);
        assert_eq!(push_data_prefix(256).unwrap(), vec![OP_PUSHDATA2, 0x00, 0x01]);
        assert_eq!(
            push_data_prefix(65536).unwrap(),
            vec![OP_PUSHDATA4, 0x00, 0x00, 0x01, 0x00]
        );
    }

    /// Hex round-trip preserves arbitrary script bytes.
    #[test]
    fn test_hex_roundtrip() {
        let script = Script::from_bytes(&[0x6a, 0x01, 0xff]);
        assert_eq!(Script::from_hex(&script.to_hex()).unwrap(), script);
    }
}
