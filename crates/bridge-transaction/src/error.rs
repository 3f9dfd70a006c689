/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The transaction structure is invalid (e.g. an out-of-range input index).
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// An error occurred during input signing (e.g. missing source output).
    #[error("signing error: {0}")]
    SigningError(String),

    /// An error occurred during binary/hex serialization or deserialization.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// The input UTXO does not cover the payment amount plus fee.
    #[error("insufficient funds: input holds {available}, need {required}")]
    InsufficientFunds {
        /// Amount plus fee the transaction must spend.
        required: u64,
        /// Value held by the input UTXO.
        available: u64,
    },

    /// The embedded cross-chain reference is unusable (e.g. too large).
    #[error("invalid embedded reference: {0}")]
    InvalidReference(String),

    /// An underlying script error (forwarded from `bridge-script`).
    #[error("script error: {0}")]
    Script(#[from] bridge_script::ScriptError),

    /// An underlying primitives error (forwarded from `bridge-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] bridge_primitives::PrimitivesError),
}
