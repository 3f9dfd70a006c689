//! Zero-value data-carrier output template.
//!
//! The lock leg embeds the recipient's ledger-chain address in an
//! unspendable output so the contract or relay on the other chain can
//! credit the right account. The payload must reach the other side
//! byte-exact.

use bridge_script::opcodes::OP_RETURN;
use bridge_script::Script;

use crate::TransactionError;

/// Relay policy limit for data-carrier payloads on the deposit chain.
pub const MAX_DATA_CARRIER_BYTES: usize = 40;

/// Build an unspendable data-carrier script: `OP_RETURN <payload>`.
///
/// Fails with `InvalidReference` when the payload is empty or exceeds
/// [`MAX_DATA_CARRIER_BYTES`].
pub fn embed(payload: &[u8]) -> Result<Script, TransactionError> {
    if payload.is_empty() {
        return Err(TransactionError::InvalidReference(
            "embedded reference is empty".to_string(),
        ));
    }
    if payload.len() > MAX_DATA_CARRIER_BYTES {
        return Err(TransactionError::InvalidReference(format!(
            "embedded reference is {} bytes, limit is {}",
            payload.len(),
            MAX_DATA_CARRIER_BYTES
        )));
    }

    let mut script = Script::new();
    script.append_opcodes(&[OP_RETURN]);
    script.append_push_data(payload)?;
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The embedded payload comes back out byte-exact.
    #[test]
    fn test_embed_roundtrip() {
        let payload: Vec<u8> = (0u8..20).collect();
        let script = embed(&payload).unwrap();
        assert!(script.is_data_carrier());
        assert_eq!(script.data_carrier_payload().unwrap(), &payload[..]);
        // OP_RETURN + 1-byte push prefix + payload
        assert_eq!(script.len(), payload.len() + 2);
    }

    /// The 40-byte limit is inclusive.
    #[test]
    fn test_embed_size_limit() {
        assert!(embed(&[0xaa; MAX_DATA_CARRIER_BYTES]).is_ok());
        assert!(matches!(
            embed(&[0xaa; MAX_DATA_CARRIER_BYTES + 1]),
            Err(TransactionError::InvalidReference(_))
        ));
        assert!(embed(&[]).is_err());
    }
}
