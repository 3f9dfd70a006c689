//! secp256k1 private key with WIF import/export.
//!
//! Wraps a k256 signing key and records the WIF compression flag, which
//! determines how the corresponding public key is serialized when deriving
//! the signer's own address.

use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;

use crate::base58;
use crate::ec::public_key::PublicKey;
use crate::ec::signature::Signature;
use crate::network::Network;
use crate::PrimitivesError;

/// Length of a serialized private key scalar.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// Flag byte appended to WIF payloads for compressed public keys.
const COMPRESS_MAGIC: u8 = 0x01;

/// A secp256k1 private key for signing deposit-chain transactions.
#[derive(Clone, Debug)]
pub struct PrivateKey {
    /// The underlying k256 signing key.
    inner: SigningKey,
    /// Whether the public key serializes in compressed form.
    compressed: bool,
}

impl PrivateKey {
    /// Generate a random private key (compressed) from the OS RNG.
    pub fn new() -> Self {
        PrivateKey {
            inner: SigningKey::random(&mut OsRng),
            compressed: true,
        }
    }

    /// Create a private key from a raw 32-byte scalar.
    ///
    /// Fails if the scalar is zero or not below the curve order. The key
    /// defaults to compressed public key serialization.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_BYTES_LEN,
                bytes.len()
            )));
        }
        let signing_key = SigningKey::from_bytes(bytes.into())
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey {
            inner: signing_key,
            compressed: true,
        })
    }

    /// Create a private key from a 64-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Decode a WIF string for the given network.
    ///
    /// Base58Check-decodes, validates the checksum and the network's WIF
    /// version byte, strips the version byte and the optional trailing
    /// compression flag, and retains the flag on the key.
    ///
    /// Fails with `InvalidWif` on a checksum mismatch, a malformed length,
    /// a foreign version byte, or an unrecognized flag byte.
    pub fn from_wif(wif: &str, network: Network) -> Result<Self, PrimitivesError> {
        let payload = match base58::check_decode(wif) {
            Ok(p) => p,
            Err(PrimitivesError::ChecksumMismatch) => {
                return Err(PrimitivesError::InvalidWif("checksum mismatch".to_string()))
            }
            Err(e) => return Err(PrimitivesError::InvalidWif(e.to_string())),
        };

        // version byte + 32-byte key, plus an optional compression flag
        let compressed = match payload.len() {
            34 => {
                if payload[33] != COMPRESS_MAGIC {
                    return Err(PrimitivesError::InvalidWif(format!(
                        "unrecognized flag byte 0x{:02x}",
                        payload[33]
                    )));
                }
                true
            }
            33 => false,
            other => {
                return Err(PrimitivesError::InvalidWif(format!(
                    "malformed payload length {}",
                    other
                )));
            }
        };

        let expected_version = network.params().wif_version;
        if payload[0] != expected_version {
            return Err(PrimitivesError::InvalidWif(format!(
                "version byte 0x{:02x} does not match {} (expected 0x{:02x})",
                payload[0], network, expected_version
            )));
        }

        let mut key = Self::from_bytes(&payload[1..1 + PRIVATE_KEY_BYTES_LEN])?;
        key.compressed = compressed;
        Ok(key)
    }

    /// Encode as a WIF string for the given network.
    ///
    /// The compression flag byte is appended only when the key is marked
    /// compressed, so decode/encode round-trips exactly.
    pub fn to_wif(&self, network: Network) -> String {
        let mut payload = Vec::with_capacity(1 + PRIVATE_KEY_BYTES_LEN + 1);
        payload.push(network.params().wif_version);
        payload.extend_from_slice(&self.to_bytes());
        if self.compressed {
            payload.push(COMPRESS_MAGIC);
        }
        base58::check_encode(&payload)
    }

    /// The raw 32-byte big-endian scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// The scalar as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Whether the public key serializes in compressed form.
    pub fn compressed(&self) -> bool {
        self.compressed
    }

    /// Derive the corresponding public key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.inner.verifying_key())
    }

    /// The public key serialized per this key's compression flag.
    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.pub_key().serialize(self.compressed)
    }

    /// The Hash160 of the serialized public key.
    ///
    /// This is the public key hash the signer's own P2PKH outputs lock to.
    pub fn public_key_hash(&self) -> [u8; 20] {
        self.pub_key().hash160(self.compressed)
    }

    /// Sign a message hash with deterministic RFC6979 nonces.
    ///
    /// Produces a low-S normalized signature.
    pub fn sign(&self, hash: &[u8]) -> Result<Signature, PrimitivesError> {
        Signature::sign(hash, self)
    }

    /// Access the underlying k256 signing key.
    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }
}

impl Default for PrivateKey {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        let mut bytes = self.inner.to_bytes();
        bytes.zeroize();
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes() && self.compressed == other.compressed
    }
}

impl Eq for PrivateKey {}
