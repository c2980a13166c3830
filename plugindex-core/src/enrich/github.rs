//! GitHub backend for repository metadata
//!
//! Implements [`MetadataSource`] with a plain `GET /repos/{owner}/{name}`.
//! No pagination and no rate-limit header handling; the enricher paces
//! requests instead.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

use super::source::{MetadataSource, RepoMetadata};
use crate::error::{FetchError, RegistryError};

/// Default REST API base
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// GitHub REST API source
pub struct GitHubSource {
    client: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl GitHubSource {
    /// Create a client with a per-request timeout.
    ///
    /// Without a token the API allows far fewer requests per hour, but
    /// lookups still work.
    pub fn new(
        api_base: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("plugindex/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| RegistryError::Client(e.to_string()))?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    fn repo_url(&self, repo_path: &str) -> String {
        format!("{}/repos/{}", self.api_base, repo_path)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[async_trait]
impl MetadataSource for GitHubSource {
    async fn fetch(&self, repo_path: &str) -> Result<RepoMetadata, FetchError> {
        let url = self.repo_url(repo_path);
        debug!("Fetching repository metadata from {}", url);

        let mut request = self.client.get(&url).header(ACCEPT, GITHUB_ACCEPT);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        RepoMetadata::from_json(&body)
    }

    fn name(&self) -> &'static str {
        "github"
    }
}
