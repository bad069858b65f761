use async_trait::async_trait;
use thiserror::Error;

use crate::models::Overview;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("invalid provider configuration: {0}")]
    Config(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("empty response body")]
    EmptyBody,

    #[error("rate limited: {0}")]
    RateLimited(String),
}

#[async_trait]
pub trait OverviewProvider: Send + Sync {
    /// Fetch company fundamentals for `symbol`. Unknown symbols come back as
    /// an `Overview` without a symbol, not as an error.
    async fn fetch_overview(
        &self,
        symbol: &str,
        api_key: &str,
    ) -> Result<Overview, ProviderError>;
}
