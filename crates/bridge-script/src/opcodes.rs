//! Opcode constants for the script fragments the bridge emits.
//!
//! Only the opcodes appearing in P2PKH and data-carrier outputs are
//! defined; the bridge constructs scripts, it never evaluates them.

/// Push an empty byte vector.
pub const OP_0: u8 = 0x00;

/// Direct push of 20 bytes (a public key hash).
pub const OP_DATA_20: u8 = 0x14;

/// Push data with a 1-byte length prefix.
pub const OP_PUSHDATA1: u8 = 0x4c;

/// Push data with a 2-byte length prefix.
pub const OP_PUSHDATA2: u8 = 0x4d;

/// Push data with a 4-byte length prefix.
pub const OP_PUSHDATA4: u8 = 0x4e;

/// Mark an output as unspendable; remaining bytes carry data.
pub const OP_RETURN: u8 = 0x6a;

/// Duplicate the top stack item.
pub const OP_DUP: u8 = 0x76;

/// Pop equality check, fail the script on mismatch.
pub const OP_EQUALVERIFY: u8 = 0x88;

/// Hash160 the top stack item.
pub const OP_HASH160: u8 = 0xa9;

/// Verify an ECDSA signature against a public key.
pub const OP_CHECKSIG: u8 = 0xac;
