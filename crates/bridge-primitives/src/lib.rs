/// Bridge SDK - hashing, encoding, network parameters, and EC key primitives.
///
/// Provides the hash functions, Base58Check codec, canonical per-network
/// parameter table, chain hash type, binary reader/writer, and secp256k1
/// keys shared by the script, transaction, and orchestration crates.

pub mod base58;
pub mod chainhash;
pub mod ec;
pub mod hash;
pub mod network;
pub mod util;

mod error;
pub use chainhash::Hash;
pub use ec::{PrivateKey, PublicKey, Signature};
pub use error::PrimitivesError;
pub use network::{ChainParams, Network};
