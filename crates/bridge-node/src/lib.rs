/// Bridge SDK - chain-node RPC client and rejection classification.
///
/// Provides the JSON-RPC client the lock leg submits raw transactions
/// through, plus the isolated classifier that turns node rejections into
/// the SDK's error taxonomy.

pub mod client;
pub mod types;

mod error;
pub use client::{Broadcaster, NodeClient};
pub use error::NodeError;
pub use types::{NodeConfig, NodeInfo, RejectionReason, RPC_VERIFY_REJECTED};
