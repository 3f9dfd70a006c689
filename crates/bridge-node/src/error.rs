//! Error types for chain-node operations.

/// Errors that can occur when talking to the chain node.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to serialize or deserialize an RPC body.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The node rejected the transaction because the script signature was
    /// not in canonical form. This strongly suggests the spent output is
    /// not a plain pay-to-public-key-hash output.
    #[error(
        "node rejected the script signature as non-canonical ({code}): {message}. \
         Is the spent output a pay-to-public-key-hash output?"
    )]
    SignatureFormat {
        /// The node's rejection code.
        code: i32,
        /// The node's rejection message.
        message: String,
    },

    /// Any other node-side rejection, passed through unchanged.
    #[error("broadcast rejected ({code}): {message}")]
    Broadcast {
        /// The node's rejection code.
        code: i32,
        /// The node's rejection message.
        message: String,
    },

    /// The node returned a response with neither a result nor an error.
    #[error("malformed RPC response: missing result")]
    MissingResult,
}
