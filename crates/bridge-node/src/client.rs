//! JSON-RPC client for the deposit-chain node.

use crate::error::NodeError;
use crate::types::{NodeConfig, NodeInfo, RejectionReason, RpcRequest, RpcResponse};

/// Async broadcasting seam between the orchestrator and the node.
///
/// Implemented by [`NodeClient`]; test doubles implement it to drive the
/// orchestrator without a running node.
pub trait Broadcaster {
    /// Submit raw transaction bytes to the chain; returns the txid hex.
    fn send_raw_transaction(
        &self,
        raw_tx: &[u8],
    ) -> impl std::future::Future<Output = Result<String, NodeError>> + Send;
}

/// HTTP client for the chain node's JSON-RPC interface.
#[derive(Debug, Clone)]
pub struct NodeClient {
    /// Client configuration.
    config: NodeConfig,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl NodeClient {
    /// Create a new node client with the given configuration.
    pub fn new(config: NodeConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// Probe the node with `getinfo`.
    ///
    /// Used once at startup to verify connectivity and credentials before
    /// any transaction is built.
    pub async fn get_info(&self) -> Result<NodeInfo, NodeError> {
        let result = self.call("getinfo", Vec::new()).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Broadcast raw transaction bytes with `sendrawtransaction`.
    ///
    /// Rejections are classified: a network-rule rejection naming a
    /// non-canonical signature surfaces as `NodeError::SignatureFormat`,
    /// everything else as `NodeError::Broadcast`. Nothing is retried.
    pub async fn send_raw_transaction(&self, raw_tx: &[u8]) -> Result<String, NodeError> {
        let params = vec![serde_json::Value::String(hex::encode(raw_tx))];
        let result = self.call("sendrawtransaction", params).await?;
        match result {
            serde_json::Value::String(txid) => Ok(txid),
            other => Ok(other.to_string()),
        }
    }

    /// Perform one JSON-RPC call and unwrap the response envelope.
    async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, NodeError> {
        let request = RpcRequest {
            jsonrpc: "1.0",
            id: 1,
            method,
            params,
        };

        let resp = self
            .client
            .post(self.config.url())
            .basic_auth(&self.config.user, Some(&self.config.password))
            .json(&request)
            .send()
            .await?;

        let body: RpcResponse = serde_json::from_str(&resp.text().await?)?;

        if let Some(err) = body.error {
            return Err(match RejectionReason::classify(err.code, &err.message) {
                RejectionReason::NonCanonicalSignature => NodeError::SignatureFormat {
                    code: err.code,
                    message: err.message,
                },
                RejectionReason::Other => NodeError::Broadcast {
                    code: err.code,
                    message: err.message,
                },
            });
        }

        body.result.ok_or(NodeError::MissingResult)
    }
}

impl Broadcaster for NodeClient {
    async fn send_raw_transaction(&self, raw_tx: &[u8]) -> Result<String, NodeError> {
        NodeClient::send_raw_transaction(self, raw_tx).await
    }
}
