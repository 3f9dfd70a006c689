//! secp256k1 public key with deposit-chain functionality.
//!
//! Supports compressed/uncompressed SEC1 serialization, public key hash
//! derivation, and ECDSA verification.

use std::fmt;

use k256::ecdsa::VerifyingKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;

use crate::ec::signature::Signature;
use crate::hash::hash160;
use crate::PrimitivesError;

/// Length of a compressed SEC1 public key.
const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed SEC1 public key.
const UNCOMPRESSED_LEN: usize = 65;

/// A secp256k1 public key.
///
/// Wraps a k256 `VerifyingKey` and adds the serializations the deposit
/// chain's scripts and addresses are built from.
#[derive(Clone, Debug)]
pub struct PublicKey {
    /// The underlying k256 verifying key.
    inner: VerifyingKey,
}

impl PublicKey {
    /// Create a public key from SEC1-encoded bytes.
    ///
    /// Accepts both compressed (33-byte) and uncompressed (65-byte) form;
    /// fails if the bytes do not describe a point on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() {
            return Err(PrimitivesError::InvalidPublicKey(
                "public key bytes are empty".to_string(),
            ));
        }
        let vk = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        Ok(PublicKey { inner: vk })
    }

    /// Create a public key from a hex-encoded SEC1 string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Wrap an existing k256 verifying key.
    pub(crate) fn from_verifying_key(vk: &VerifyingKey) -> Self {
        PublicKey { inner: vk.clone() }
    }

    /// Serialize in compressed SEC1 format (33 bytes).
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize in uncompressed SEC1 format (65 bytes).
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize in the form selected by `compressed`.
    ///
    /// The deposit chain hashes whichever serialization the spending key
    /// was imported with, so the choice must follow the key's WIF flag.
    pub fn serialize(&self, compressed: bool) -> Vec<u8> {
        if compressed {
            self.to_compressed().to_vec()
        } else {
            self.to_uncompressed().to_vec()
        }
    }

    /// Hex string of the compressed serialization.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Hash160 of the serialization selected by `compressed`.
    pub fn hash160(&self, compressed: bool) -> [u8; 20] {
        hash160(&self.serialize(compressed))
    }

    /// Verify an ECDSA signature over a message hash.
    pub fn verify(&self, hash: &[u8], signature: &Signature) -> bool {
        signature.verify_with(hash, &self.inner)
    }

    /// Access the underlying k256 verifying key.
    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.inner
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPRESSED_KEY: &str =
        "026cf33373a9f3f6c676b75b543180703df225f7f8edbffedc417718a8ad4e89ce";

    /// Compressed and uncompressed serializations describe the same point.
    #[test]
    fn test_serialization_forms() {
        let key = PublicKey::from_hex(COMPRESSED_KEY).unwrap();
        let uncompressed = key.to_uncompressed();
        assert_eq!(uncompressed[0], 0x04);
        let reparsed = PublicKey::from_bytes(&uncompressed).unwrap();
        assert_eq!(reparsed.to_compressed(), key.to_compressed());
    }

    /// The hash160 depends on the chosen serialization.
    #[test]
    fn test_hash160_forms_differ() {
        let key = PublicKey::from_hex(COMPRESSED_KEY).unwrap();
        assert_ne!(key.hash160(true), key.hash160(false));
        assert_eq!(
            hex::encode(key.hash160(true)),
            "00ac6144c4db7b5790f343cf0477a65fb8a02eb7"
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(PublicKey::from_bytes(&[]).is_err());
        assert!(PublicKey::from_bytes(&[0x02; 33]).is_err());
        assert!(PublicKey::from_hex("zz").is_err());
    }
}
