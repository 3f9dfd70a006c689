//! Base58 and Base58Check encoding.
//!
//! Base58Check appends a 4-byte double-SHA-256 checksum to the payload
//! before encoding; it is the text format for deposit-chain addresses and
//! WIF private keys.

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Encode a byte slice as a Base58 string.
///
/// Uses the modified Base58 alphabet (no 0, O, I, l). Leading zero bytes
/// encode as leading '1' characters.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_string()
}

/// Decode a Base58 string to bytes.
///
/// Fails with `InvalidBase58` on characters outside the alphabet.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))
}

/// Encode a payload with a trailing 4-byte SHA-256d checksum (Base58Check).
pub fn check_encode(data: &[u8]) -> String {
    let checksum = sha256d(data);
    let mut payload = data.to_vec();
    payload.extend_from_slice(&checksum[..4]);
    encode(&payload)
}

/// Decode a Base58Check string, verifying and stripping the checksum.
///
/// Returns the payload (version byte included, checksum removed). Fails
/// with `ChecksumMismatch` when the trailing 4 bytes do not match the
/// payload's SHA-256d.
pub fn check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let decoded = decode(s)?;
    if decoded.len() < 4 {
        return Err(PrimitivesError::InvalidBase58(
            "data too short for checksum".to_string(),
        ));
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - 4);
    let expected = sha256d(payload);
    if checksum != &expected[..4] {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base58_empty() {
        assert_eq!(encode(&[]), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_base58_leading_zeros() {
        let input = hex::decode("000000287fb4cd").unwrap();
        let encoded = encode(&input);
        assert_eq!(encoded, "111233QC4");
        assert_eq!(decode("111233QC4").unwrap(), input);
    }

    /// A classic versioned-payload vector.
    #[test]
    fn test_base58_versioned_payload() {
        let input = hex::decode("00010966776006953D5567439E5E39F86A0D273BEED61967F6").unwrap();
        assert_eq!(encode(&input), "16UwLL9Risc3QfPqBUvKofHmBQ7wMtjvM");
    }

    #[test]
    fn test_base58_invalid_character() {
        assert!(decode("1234!@#$%").is_err());
    }

    #[test]
    fn test_check_roundtrip() {
        let payload = hex::decode("1ef54a5851e9372b87810a8e60cdd2e7cfd80b6e31").unwrap();
        let encoded = check_encode(&payload);
        assert_eq!(check_decode(&encoded).unwrap(), payload);
    }

    /// Corrupting any character breaks the checksum.
    #[test]
    fn test_check_decode_tampered() {
        let payload = vec![0x9e, 0x01, 0x02, 0x03];
        let mut encoded = check_encode(&payload);
        let last = encoded.pop().unwrap();
        encoded.push(if last == '1' { '2' } else { '1' });
        assert!(matches!(
            check_decode(&encoded),
            Err(PrimitivesError::ChecksumMismatch) | Err(PrimitivesError::InvalidBase58(_))
        ));
    }

    /// Strings shorter than the checksum are rejected outright.
    #[test]
    fn test_check_decode_too_short() {
        assert!(check_decode("11").is_err());
    }
}
