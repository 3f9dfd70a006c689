//! Error types for the lock/unlock orchestration.

use bridge_node::NodeError;
use bridge_primitives::PrimitivesError;
use bridge_script::ScriptError;
use bridge_transaction::TransactionError;

use crate::registry::RegistryError;

/// Errors surfaced by the allocation engine and the orchestrators.
///
/// Every variant aborts the run immediately; nothing is retried, and
/// transactions broadcast before the failure remain broadcast.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// A request failed validation before any work was done.
    #[error("validation error: {0}")]
    Validation(String),

    /// No operator could absorb any amount at all.
    #[error("no operator could absorb any of the requested {requested} units")]
    InsufficientCapacity {
        /// The amount the caller asked for.
        requested: u64,
    },

    /// A broadcast failed; carries the operator whose step was in flight.
    #[error("broadcast failed at operator {operator}: {source}")]
    Submit {
        /// Hex public key hash of the operator being processed.
        operator: String,
        /// The underlying node error.
        #[source]
        source: NodeError,
    },

    /// A withdrawal write failed; carries the operator whose step was in
    /// flight.
    #[error("withdrawal request failed at operator {operator}: {source}")]
    Withdrawal {
        /// Hex public key hash of the operator being processed.
        operator: String,
        /// The underlying registry error.
        #[source]
        source: RegistryError,
    },

    /// A registry read failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// An underlying transaction error.
    #[error("transaction error: {0}")]
    Transaction(#[from] TransactionError),

    /// An underlying script or address error.
    #[error("script error: {0}")]
    Script(#[from] ScriptError),

    /// An underlying primitives error.
    #[error("primitives error: {0}")]
    Primitives(#[from] PrimitivesError),
}
