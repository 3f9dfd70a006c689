//! secp256k1 keys and signatures for spending deposit-chain outputs.

mod private_key;
mod public_key;
mod signature;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;
