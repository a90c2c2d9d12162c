use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;

/// Executes operation documents against the remote content endpoint.
///
/// Implementations own connection handling and authentication; the facade
/// only hands over a document and its variables.
#[async_trait]
pub trait RemoteExecutor: Send + Sync {
    /// Whether the current session may perform editorial operations
    async fn is_authenticated(&self) -> Result<bool, TransportError>;

    /// Run one operation document and return the response data
    async fn execute(&self, document: &str, variables: Value) -> Result<Value, TransportError>;
}
