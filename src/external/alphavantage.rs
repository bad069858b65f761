use crate::external::overview_provider::{OverviewProvider, ProviderError};
use crate::models::Overview;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";

pub struct AlphaVantageClient {
    client: reqwest::Client,
    base_url: String,
}

impl AlphaVantageClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn query_url(&self) -> Result<Url, ProviderError> {
        Url::parse(&self.base_url)
            .and_then(|base| base.join("query"))
            .map_err(|e| ProviderError::Config(format!("{}: {}", self.base_url, e)))
    }
}

impl Default for AlphaVantageClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

// The OVERVIEW function reports failures inside a 200 body:
//   { "Error Message": "Invalid API call. ..." }
//   { "Note": "Thank you for using Alpha Vantage! ..." }
//   { "Information": "... standard API rate limit is 25 requests per day ..." }
// and answers unknown symbols with `{}`.
fn parse_overview(body: Value) -> Result<Overview, ProviderError> {
    let obj = match body {
        Value::Null => return Err(ProviderError::EmptyBody),
        Value::Object(obj) => obj,
        other => return Err(ProviderError::Parse(format!("expected JSON object, got {}", other))),
    };

    if let Some(msg) = obj.get("Error Message").and_then(Value::as_str) {
        return Err(ProviderError::BadResponse(msg.to_string()));
    }

    if !obj.contains_key("Symbol") {
        let throttle = obj
            .get("Note")
            .or_else(|| obj.get("Information"))
            .and_then(Value::as_str);
        if let Some(msg) = throttle {
            return Err(ProviderError::RateLimited(msg.to_string()));
        }
    }

    serde_json::from_value(Value::Object(obj)).map_err(|e| ProviderError::Parse(e.to_string()))
}

#[async_trait]
impl OverviewProvider for AlphaVantageClient {
    async fn fetch_overview(
        &self,
        symbol: &str,
        api_key: &str,
    ) -> Result<Overview, ProviderError> {
        let url = self.query_url()?;
        debug!("Requesting OVERVIEW for {} from {}", symbol, url);

        let resp = self
            .client
            .get(url)
            .query(&[
                ("function", "OVERVIEW"),
                ("symbol", symbol),
                ("apikey", api_key),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    ProviderError::Config(e.to_string())
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            warn!("OVERVIEW request for {} returned HTTP {}", symbol, status);
            return Err(ProviderError::BadResponse(format!("HTTP {}", status)));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyBody);
        }

        let body: Value =
            serde_json::from_str(&text).map_err(|e| ProviderError::Parse(e.to_string()))?;
        parse_overview(body)
    }
}
