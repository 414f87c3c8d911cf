//! GitHub REST API HTTP client.

use super::response::{RateLimitResponse, RepositorySummary};
use super::{OwnerKind, RepositoryHost, DEFAULT_API_BASE};
use crate::error::{LookupErrorKind, Result, ScanError};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// GitHub API client configuration.
#[derive(Debug, Clone)]
pub struct GitHubClientConfig {
    /// Base URL for the GitHub API
    pub api_base: String,
    /// Request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// Personal access token, sent as a bearer token
    pub token: Option<String>,
}

impl Default for GitHubClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: None,
            token: None,
        }
    }
}

/// Blocking HTTP client for the GitHub API.
pub struct GitHubClient {
    client: Client,
    config: GitHubClientConfig,
}

/// Helper to convert reqwest errors to lookup errors
fn network_error(msg: &str, err: reqwest::Error) -> ScanError {
    ScanError::lookup(msg, LookupErrorKind::NetworkError(err.to_string()))
}

/// Helper to create API errors
fn api_error(msg: impl Into<String>) -> ScanError {
    ScanError::lookup("API request", LookupErrorKind::ApiError(msg.into()))
}

impl GitHubClient {
    /// Create a new GitHub client.
    pub fn new(config: GitHubClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| network_error("Failed to create HTTP client", e))?;

        Ok(Self { client, config })
    }

    /// GET a JSON document relative to the API base.
    ///
    /// A 404 is reported as `Ok(None)`.
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let url = format!("{}/{}", self.config.api_base.trim_end_matches('/'), path);
        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| network_error("Failed to send request", e))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(api_error(format!(
                "GitHub API returned error status {} for {}",
                status.as_u16(),
                path
            )));
        }

        let body = response.json().map_err(|e| {
            ScanError::lookup(
                "parsing response",
                LookupErrorKind::InvalidResponse(e.to_string()),
            )
        })?;
        Ok(Some(body))
    }
}

impl RepositoryHost for GitHubClient {
    fn rate_limit(&mut self) -> Result<RateLimitResponse> {
        self.get_json("rate_limit")?
            .ok_or_else(|| api_error("rate limit endpoint not found"))
    }

    fn list_repositories(
        &mut self,
        kind: OwnerKind,
        owner: &str,
    ) -> Result<Option<Vec<RepositorySummary>>> {
        self.get_json(&format!(
            "{}/{}/repos?per_page=100",
            kind.path_segment(),
            owner
        ))
    }
}
