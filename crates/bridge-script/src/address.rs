/// Deposit-chain address handling.
///
/// P2PKH addresses are the Base58Check encoding of the network's address
/// version byte followed by a 20-byte public key hash. The version byte is
/// taken from the canonical parameter table, never hardcoded here.

use std::fmt;

use bridge_primitives::base58;
use bridge_primitives::{Network, PrimitivesError, PublicKey};

use crate::ScriptError;

/// A pay-to-public-key-hash address.
///
/// Holds the 20-byte public key hash and the network it was encoded for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    /// The human-readable Base58Check address string.
    pub address_string: String,
    /// The 20-byte RIPEMD-160(SHA-256(pubkey)) hash.
    pub public_key_hash: [u8; 20],
    /// The network this address was encoded for.
    pub network: Network,
}

impl Address {
    /// Parse a Base58Check-encoded address for the given network.
    ///
    /// Validates the checksum, the payload length, and that the version
    /// byte matches the network's address version.
    pub fn from_string(addr: &str, network: Network) -> Result<Self, ScriptError> {
        let payload = match base58::check_decode(addr) {
            Ok(p) => p,
            Err(PrimitivesError::ChecksumMismatch) => {
                return Err(ScriptError::InvalidAddress(format!(
                    "checksum mismatch for '{}'",
                    addr
                )))
            }
            Err(e) => return Err(ScriptError::InvalidAddress(format!("'{}': {}", addr, e))),
        };

        if payload.len() != 21 {
            return Err(ScriptError::InvalidAddressLength(addr.to_string()));
        }

        let expected = network.params().pubkey_hash_version;
        if payload[0] != expected {
            return Err(ScriptError::AddressVersionMismatch {
                address: addr.to_string(),
                got: payload[0],
                expected,
            });
        }

        let mut pkh = [0u8; 20];
        pkh.copy_from_slice(&payload[1..21]);

        Ok(Address {
            address_string: addr.to_string(),
            public_key_hash: pkh,
            network,
        })
    }

    /// Create an address from a 20-byte public key hash.
    pub fn from_public_key_hash(hash: &[u8; 20], network: Network) -> Self {
        let mut payload = Vec::with_capacity(21);
        payload.push(network.params().pubkey_hash_version);
        payload.extend_from_slice(hash);
        let address_string = base58::check_encode(&payload);

        Address {
            address_string,
            public_key_hash: *hash,
            network,
        }
    }

    /// Create an address from a public key.
    ///
    /// `compressed` selects which serialization is hashed; it must match
    /// the compression flag of the key that will later spend from this
    /// address.
    pub fn from_public_key(key: &PublicKey, compressed: bool, network: Network) -> Self {
        Self::from_public_key_hash(&key.hash160(compressed), network)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address_string)
    }
}
