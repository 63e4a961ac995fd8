//! GitHub users API client

use super::IdentityLookup;
use super::types::IdentityRecord;
use crate::error::{IdentityError, Result};
use crate::http::{
    body_excerpt, build_client, decode_optional, error_status, join_segments, parse_base_url,
};
use crate::secret::SecretString;
use log::debug;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default endpoint the user handle is appended to
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com/users/";

/// Connection settings for the GitHub users API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Users endpoint, the handle is appended as a path segment
    pub api_url: String,
    /// Personal access token, anonymous requests are made when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<SecretString>,
    /// Request timeout
    pub timeout_seconds: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_GITHUB_API_URL.to_string(),
            token: None,
            timeout_seconds: 30,
        }
    }
}

/// Identity lookup backed by the GitHub REST API
#[derive(Debug, Clone)]
pub struct GitHubClient {
    base_url: Url,
    token: Option<SecretString>,
    http_client: Client,
}

impl GitHubClient {
    /// Create a client from configuration
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let http_client = build_client(Duration::from_secs(config.timeout_seconds))?;
        Self::with_http_client(config, http_client)
    }

    /// Create a client with a pre-built `reqwest::Client`
    pub fn with_http_client(config: GitHubConfig, http_client: Client) -> Result<Self> {
        let base_url = parse_base_url("github.api_url", &config.api_url)?;
        let token = config.token.filter(|t| !t.is_blank());

        Ok(Self {
            base_url,
            token,
            http_client,
        })
    }

    fn user_url(&self, handle: &str) -> Url {
        join_segments(&self.base_url, &[handle])
    }
}

#[async_trait::async_trait]
impl IdentityLookup for GitHubClient {
    async fn fetch(&self, handle: &str) -> Result<Option<IdentityRecord>> {
        let url = self.user_url(handle);
        debug!("Fetching GitHub user from {url}");

        let mut request = self
            .http_client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| IdentityError::lookup_failed(error_status(&e), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IdentityError::lookup_failed(
                Some(status.as_u16()),
                format!("Failed to get GitHub user: {}", body_excerpt(&body)),
            )
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| IdentityError::lookup_failed(Some(status.as_u16()), e.to_string()))?;

        let record = decode_optional::<IdentityRecord>(&body)
            .map_err(|e| IdentityError::deserialization(e.to_string()))?;
        debug!(
            "GitHub lookup for '{handle}' returned {}",
            if record.is_some() { "a user" } else { "no user" }
        );
        Ok(record)
    }
}
