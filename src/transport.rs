use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::FinderConfig;
use crate::error::{Result, SearchError};
use crate::query::Operation;

/// Issues one GET against the Finding service and hands back the decoded body.
#[async_trait]
pub trait FindingTransport: Send + Sync {
    async fn get(&self, operation: Operation, params: Vec<(String, String)>) -> Result<Value>;
}

// ==================== HTTP TRANSPORT ====================
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    app_id: String,
}

impl HttpTransport {
    pub fn new(config: &FinderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("ebay-resell/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SearchError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            app_id: config.app_id.clone(),
        })
    }

    fn map_send_error(operation: Operation, err: reqwest::Error) -> SearchError {
        if err.is_timeout() {
            SearchError::Timeout { operation }
        } else {
            SearchError::Request {
                operation,
                source: err,
            }
        }
    }
}

#[async_trait]
impl FindingTransport for HttpTransport {
    async fn get(&self, operation: Operation, mut params: Vec<(String, String)>) -> Result<Value> {
        params.push(("SECURITY-APPNAME".to_string(), self.app_id.clone()));
        debug!("Sending {} request to {}", operation, self.endpoint);

        let resp = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(|e| Self::map_send_error(operation, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SearchError::Status { operation, status });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| Self::map_send_error(operation, e))?;
        debug!("{} responded with {} bytes", operation, body.len());

        serde_json::from_str(&body)
            .map_err(|e| SearchError::shape(operation, format!("body is not JSON: {}", e)))
    }
}
