//! Error types for the registry pipeline
//!
//! Two tiers: [`RegistryError`] aborts the whole run, [`FetchError`]
//! degrades a single record and the run continues.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a registry build
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The catalog document could not be read
    #[error("Failed to read catalog from {path}")]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The override document exists but could not be read
    #[error("Failed to read override records from {path}")]
    OverrideRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The override document is not a JSON array of records
    #[error("Failed to parse override records in {path}")]
    OverrideParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The output document could not be written
    #[error("Failed to write registry to {path}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The registry could not be serialized
    #[error("Failed to serialize registry")]
    Serialize(#[source] serde_json::Error),

    /// The configuration file could not be read
    #[error("Failed to read config from {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for [`crate::PipelineConfig`]
    #[error("Failed to parse config in {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// The metadata client could not be constructed
    #[error("Failed to create metadata client: {0}")]
    Client(String),
}

/// Errors from a single metadata lookup
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (DNS, TLS, timeout, connection reset)
    #[error("request failed")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The source answered with a non-success status
    #[error("metadata source returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected shape
    #[error("failed to decode metadata response")]
    Decode(#[source] serde_json::Error),

    /// The source has no entry for the repository
    #[error("no metadata for {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
