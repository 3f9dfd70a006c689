//! Chain-node data types: configuration, RPC envelopes, and the
//! rejection-reason classifier.

use serde::{Deserialize, Serialize};

/// Rejection code for transactions or blocks that violate network rules.
///
/// Mirrors the node's RPC protocol table (`RPC_VERIFY_REJECTED`).
pub const RPC_VERIFY_REJECTED: i32 = -26;

/// Node message fragment identifying a non-canonical script signature.
const NON_CANONICAL_SIG_FRAGMENT: &str = "Non-canonical DER signature";

/// Configuration for a [`NodeClient`](crate::NodeClient).
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Host of the chain node.
    pub host: String,
    /// Port of the chain node's RPC interface.
    pub port: u16,
    /// RPC username.
    pub user: String,
    /// RPC password.
    pub password: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 22555,
            user: String::new(),
            password: String::new(),
        }
    }
}

impl NodeConfig {
    /// The HTTP endpoint URL for this configuration.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// A JSON-RPC request envelope.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    /// Protocol version tag.
    pub jsonrpc: &'static str,
    /// Request id echoed back by the node.
    pub id: u64,
    /// Method name.
    pub method: &'a str,
    /// Positional parameters.
    pub params: Vec<serde_json::Value>,
}

/// A JSON-RPC response envelope.
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    /// The result payload, `null` on error.
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    /// The error object, `null` on success.
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

/// The error object carried by a failed JSON-RPC response.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    /// Numeric error code.
    pub code: i32,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}

/// Subset of the node's `getinfo` response used as a connectivity probe.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeInfo {
    /// Node software version.
    #[serde(default)]
    pub version: Option<u64>,
    /// Current chain height.
    #[serde(default)]
    pub blocks: Option<u64>,
    /// Peer connection count.
    #[serde(default)]
    pub connections: Option<u64>,
}

/// Why the node refused a broadcast transaction.
///
/// The node reports failures as a numeric code plus a human-readable
/// message; classifying by message substring is fragile, so the matching
/// lives here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// Network-rule rejection naming a non-canonical script signature.
    NonCanonicalSignature,
    /// Anything else.
    Other,
}

impl RejectionReason {
    /// Classify a node rejection from its code and message.
    pub fn classify(code: i32, message: &str) -> Self {
        if code == RPC_VERIFY_REJECTED && message.contains(NON_CANONICAL_SIG_FRAGMENT) {
            RejectionReason::NonCanonicalSignature
        } else {
            RejectionReason::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The verify-rejected code plus the signature fragment classifies as
    /// a non-canonical signature.
    #[test]
    fn test_classify_non_canonical() {
        let reason = RejectionReason::classify(
            RPC_VERIFY_REJECTED,
            "64: mandatory-script-verify-flag-failed (Non-canonical DER signature)",
        );
        assert_eq!(reason, RejectionReason::NonCanonicalSignature);
    }

    /// The fragment alone is not enough; the code must match too.
    #[test]
    fn test_classify_requires_code() {
        let reason = RejectionReason::classify(-25, "Non-canonical DER signature");
        assert_eq!(reason, RejectionReason::Other);
    }

    /// Other verify-rejected messages stay unclassified.
    #[test]
    fn test_classify_other_rejections() {
        assert_eq!(
            RejectionReason::classify(RPC_VERIFY_REJECTED, "dust"),
            RejectionReason::Other
        );
        assert_eq!(
            RejectionReason::classify(-5, "No information available about transaction"),
            RejectionReason::Other
        );
    }
}
