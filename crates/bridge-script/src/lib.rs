/// Bridge SDK - script construction and address handling.
///
/// Provides the Script type, the opcode constants the bridge emits, and
/// P2PKH address encoding/decoding over the canonical network parameter
/// table.

pub mod address;
pub mod opcodes;
pub mod script;

mod error;
pub use address::Address;
pub use error::ScriptError;
pub use script::Script;
