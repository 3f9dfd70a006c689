/// Error types for script and address operations.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Invalid address string.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid address length after Base58Check decoding.
    #[error("invalid address length for '{0}'")]
    InvalidAddressLength(String),

    /// Address version byte does not match the selected network.
    #[error("address '{address}' has version byte 0x{got:02x}, expected 0x{expected:02x}")]
    AddressVersionMismatch {
        /// The offending address string.
        address: String,
        /// The version byte found in the address.
        got: u8,
        /// The version byte the selected network requires.
        expected: u8,
    },

    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Push data exceeds the maximum encodable size.
    #[error("push data too big: {0} bytes")]
    DataTooBig(usize),

    /// Error from the primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] bridge_primitives::PrimitivesError),
}
