//! Metadata source trait - Abstraction over repository information providers
//!
//! This trait allows swapping between:
//! - GitHub REST API (HTTP, see `github`)
//! - Static in-memory table (offline runs, tests)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::FetchError;

/// The repository fields the enricher consumes
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RepoMetadata {
    #[serde(rename = "stargazers_count", default)]
    pub stars: u64,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub license: Option<LicenseInfo>,

    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LicenseInfo {
    #[serde(default)]
    pub spdx_id: Option<String>,
}

impl RepoMetadata {
    /// Decode a repository response body
    pub fn from_json(body: &str) -> Result<Self, FetchError> {
        serde_json::from_str(body).map_err(FetchError::Decode)
    }

    /// SPDX identifier, if the response carried a non-empty one
    pub fn spdx_id(&self) -> Option<&str> {
        self.license
            .as_ref()
            .and_then(|l| l.spdx_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// Trait for repository metadata providers
///
/// Implementations handle their own timeouts; every error is reported
/// per repository and never aborts a batch.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Look up a repository by its `owner/name` path
    async fn fetch(&self, repo_path: &str) -> Result<RepoMetadata, FetchError>;

    /// Source identifier for logging
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<S: MetadataSource + ?Sized> MetadataSource for Box<S> {
    async fn fetch(&self, repo_path: &str) -> Result<RepoMetadata, FetchError> {
        (**self).fetch(repo_path).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// In-memory source keyed by `owner/name`
///
/// Unknown paths fail with [`FetchError::NotFound`]. An empty table makes
/// every record degrade, which is how offline runs work.
#[derive(Debug, Default)]
pub struct StaticSource {
    entries: HashMap<String, RepoMetadata>,
    requested: Mutex<Vec<String>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, repo_path: &str, metadata: RepoMetadata) -> Self {
        self.entries.insert(repo_path.to_string(), metadata);
        self
    }

    /// Paths requested so far, in call order
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|paths| paths.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MetadataSource for StaticSource {
    async fn fetch(&self, repo_path: &str) -> Result<RepoMetadata, FetchError> {
        if let Ok(mut paths) = self.requested.lock() {
            paths.push(repo_path.to_string());
        }
        self.entries
            .get(repo_path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(repo_path.to_string()))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
