//! Vendor cloud API client
//!
//! [`CloudApi`] is the seam between the integration and the vendor cloud:
//! the "list endpoints" call doubles as the connection validation used by
//! the config flow, and `send_commands` is the device command channel.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use ember_config_entries::ConnectionConfig;
use ember_core::Command;

use crate::error::CloudError;

/// Header carrying the API token.
const API_TOKEN_HEADER: &str = "X-API-Key";

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// An endpoint known to the vendor cloud.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: u64,
    pub name: String,
}

/// Async client interface to the vendor cloud.
#[async_trait]
pub trait CloudApi: Send + Sync {
    /// List the endpoints visible to the configured token.
    ///
    /// This is also the remote validation operation: it succeeds iff the
    /// URL is reachable and the token is accepted.
    async fn list_endpoints(&self) -> Result<Vec<Endpoint>, CloudError>;

    /// Send a batch of data-point commands to one device.
    async fn send_commands(&self, device_id: &str, commands: &[Command]) -> Result<(), CloudError>;
}

/// HTTP implementation of [`CloudApi`] over reqwest.
pub struct HttpCloudClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCloudClient {
    /// Build a client from connection settings.
    pub fn new(config: &ConnectionConfig) -> Result<Self, CloudError> {
        let mut token = HeaderValue::from_str(&config.api_token)
            .map_err(|_| CloudError::Api("API token is not a valid header value".to_string()))?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_TOKEN_HEADER, token);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| CloudError::Api(err.to_string()))?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    /// Classify a transport failure into the error taxonomy.
    fn classify(err: reqwest::Error) -> CloudError {
        if err.is_timeout() {
            CloudError::Timeout
        } else if err.is_connect() {
            CloudError::Connection(err.to_string())
        } else {
            CloudError::Api(err.to_string())
        }
    }

    /// Map HTTP status codes onto the error taxonomy.
    fn check_status(response: reqwest::Response) -> Result<reqwest::Response, CloudError> {
        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(CloudError::Authentication),
            status if status.is_success() => Ok(response),
            status => Err(CloudError::Api(format!("unexpected status {status}"))),
        }
    }
}

#[async_trait]
impl CloudApi for HttpCloudClient {
    async fn list_endpoints(&self) -> Result<Vec<Endpoint>, CloudError> {
        let url = format!("{}/api/endpoints", self.base_url);
        let response = self.http.get(&url).send().await.map_err(Self::classify)?;
        let response = Self::check_status(response)?;

        let endpoints: Vec<Endpoint> = response
            .json()
            .await
            .map_err(|err| CloudError::Api(err.to_string()))?;

        debug!(count = endpoints.len(), "Listed vendor cloud endpoints");
        Ok(endpoints)
    }

    async fn send_commands(&self, device_id: &str, commands: &[Command]) -> Result<(), CloudError> {
        let url = format!("{}/api/devices/{}/commands", self.base_url, device_id);
        let body = serde_json::json!({ "commands": commands });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(Self::classify)?;
        Self::check_status(response)?;

        debug!(device_id, count = commands.len(), "Sent device commands");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(verify_ssl: bool) -> ConnectionConfig {
        ConnectionConfig {
            url: "https://127.0.0.1:9000/".to_string(),
            api_token: "test_api_token".to_string(),
            verify_ssl,
        }
    }

    #[test]
    fn test_client_builds_and_strips_trailing_slash() {
        let client = HttpCloudClient::new(&config(true)).unwrap();
        assert_eq!(client.base_url, "https://127.0.0.1:9000");
    }

    #[test]
    fn test_client_accepts_self_signed_setting() {
        // verify_ssl=false must still produce a usable client
        assert!(HttpCloudClient::new(&config(false)).is_ok());
    }

    #[test]
    fn test_invalid_token_rejected_at_build_time() {
        let mut cfg = config(true);
        cfg.api_token = "bad\ntoken".to_string();
        assert!(matches!(
            HttpCloudClient::new(&cfg),
            Err(CloudError::Api(_))
        ));
    }
}
