//! Ledger Backend Client
//!
//! A JSON-over-HTTP client for the ledger backend: chain status, statistics,
//! block list, recent activity, verification and audit export.

use crate::api::LedgerApi;
use crate::api::error::ApiError;
use crate::api::types::{
    ActivityEntry, AuditArtifact, Block, Statistics, SystemStatus, VerificationResult,
};
use crate::consts::dashboard_consts::http;
use crate::environment::Environment;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderMap, HeaderName};
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;

// Build timestamp in milliseconds since epoch
const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP");

// User-Agent string with dashboard version
const USER_AGENT: &str = concat!("ledger-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct LedgerClient {
    client: Client,
    environment: Environment,
}

impl LedgerClient {
    pub fn new(environment: Environment) -> Result<Self, ApiError> {
        let client = ClientBuilder::new()
            .connect_timeout(http::connect_timeout())
            .timeout(http::request_timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
        serde_json::from_slice(bytes).map_err(ApiError::Decode)
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header("X-Build-Timestamp", BUILD_TIMESTAMP)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }

    async fn post_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        log::debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header("X-Build-Timestamp", BUILD_TIMESTAMP)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }

    fn header_text(headers: &HeaderMap, name: HeaderName) -> Option<String> {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string())
    }
}

#[async_trait::async_trait]
impl LedgerApi for LedgerClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn get_status(&self) -> Result<SystemStatus, ApiError> {
        self.get_request("api/status").await
    }

    async fn get_statistics(&self) -> Result<Statistics, ApiError> {
        self.get_request("api/statistics").await
    }

    async fn get_blocks(&self) -> Result<Vec<Block>, ApiError> {
        self.get_request("api/blockchain").await
    }

    async fn get_recent_activity(&self) -> Result<Vec<ActivityEntry>, ApiError> {
        self.get_request("api/activity/recent").await
    }

    async fn get_block(&self, index: u64) -> Result<Block, ApiError> {
        self.get_request(&format!("api/block/{}", index)).await
    }

    async fn verify_chain(&self) -> Result<VerificationResult, ApiError> {
        self.post_request("api/verify").await
    }

    async fn export_audit(&self) -> Result<AuditArtifact, ApiError> {
        let url = self.build_url("api/export/audit");
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header("X-Build-Timestamp", BUILD_TIMESTAMP)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let content_type = Self::header_text(response.headers(), CONTENT_TYPE);
        let content_disposition = Self::header_text(response.headers(), CONTENT_DISPOSITION);
        let body = response.bytes().await?.to_vec();

        Ok(AuditArtifact {
            content_type,
            content_disposition,
            body,
        })
    }
}

#[cfg(test)]
/// These are ignored by default since they require a live backend to run.
mod live_backend_tests {
    use crate::api::LedgerApi;
    use crate::environment::Environment;

    #[tokio::test]
    #[ignore] // This test requires a live backend instance.
    /// Should fetch the chain status.
    async fn test_get_status() {
        let client = super::LedgerClient::new(Environment::Local).unwrap();
        match client.get_status().await {
            Ok(status) => println!("Block height: {}", status.block_height),
            Err(e) => panic!("Failed to get status: {}", e),
        }
    }

    #[tokio::test]
    #[ignore] // This test requires a live backend instance.
    /// Should run a verification pass.
    async fn test_verify_chain() {
        let client = super::LedgerClient::new(Environment::Local).unwrap();
        match client.verify_chain().await {
            Ok(result) => println!("Verified {} blocks", result.total_blocks),
            Err(e) => panic!("Failed to verify chain: {}", e),
        }
    }
}
