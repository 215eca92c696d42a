//! Search Gateway port
//!
//! Defines the interface for one call to a remote search/summarization provider.

use crate::ports::llm_gateway::GatewayError;
use async_trait::async_trait;

/// Gateway to a search provider that returns textual context
#[async_trait]
pub trait SearchGateway: Send + Sync {
    /// Label used in logs
    fn name(&self) -> &str;

    /// Make exactly one search call and return the context as text
    async fn search(&self, query: &str) -> Result<String, GatewayError>;
}
