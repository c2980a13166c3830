//! Pipeline configuration
//!
//! ## Sources (in precedence order)
//!
//! 1. CLI flags (applied by the binary on top of the loaded config)
//! 2. YAML file passed with `--config`
//! 3. Built-in defaults
//!
//! ```yaml
//! api_base: https://api.github.com
//! token_env: GITHUB_TOKEN
//! timeout_seconds: 10
//! request_delay_ms: 100
//! official_authors: [anthropic, modelcontextprotocol]
//! monorepos: [modelcontextprotocol/servers]
//! enrich_overrides: false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{RegistryError, Result};

/// Settings for one registry build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Metadata API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Environment variable holding the optional API token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Pause after every metadata request, in milliseconds
    #[serde(default = "default_delay")]
    pub request_delay_ms: u64,

    /// Author handles whose records are flagged official
    #[serde(default = "default_official_authors")]
    pub official_authors: Vec<String>,

    /// `owner/name` paths that always install manually
    #[serde(default = "default_monorepos")]
    pub monorepos: Vec<String>,

    /// Also enrich override records before merging
    #[serde(default)]
    pub enrich_overrides: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            token_env: default_token_env(),
            timeout_seconds: default_timeout(),
            request_delay_ms: default_delay(),
            official_authors: default_official_authors(),
            monorepos: default_monorepos(),
            enrich_overrides: false,
        }
    }
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_delay() -> u64 {
    100
}

fn default_official_authors() -> Vec<String> {
    vec!["anthropic".to_string(), "modelcontextprotocol".to_string()]
}

fn default_monorepos() -> Vec<String> {
    vec!["modelcontextprotocol/servers".to_string()]
}

impl PipelineConfig {
    /// Parse config from a YAML string
    pub fn from_yaml(content: &str, origin: &Path) -> Result<Self> {
        serde_yaml_ng::from_str(content).map_err(|source| RegistryError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load config from a YAML file. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content, path)?;
        tracing::debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Load from `path` if given, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Read the API token from the configured environment variable
    pub fn api_token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}
