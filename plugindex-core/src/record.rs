//! Registry record model
//!
//! A [`Record`] is one plugin listing. Field names on the wire follow the
//! published registry format (`stars`, `language`), which is also the format
//! accepted for override records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical category tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Productivity,
    Development,
    Ai,
    Data,
    Finance,
    Communication,
    Security,
    #[default]
    Utility,
    Integration,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Productivity => "productivity",
            Category::Development => "development",
            Category::Ai => "ai",
            Category::Data => "data",
            Category::Finance => "finance",
            Category::Communication => "communication",
            Category::Security => "security",
            Category::Utility => "utility",
            Category::Integration => "integration",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a plugin gets installed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallType {
    /// `pip install <package>`
    Pip,
    /// `npm install <owner/name>`
    Npm,
    /// `go install <module>@latest`
    Go,
    /// No package manager; follow the repository's instructions
    #[default]
    #[serde(alias = "")]
    Manual,
}

impl InstallType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallType::Pip => "pip",
            InstallType::Npm => "npm",
            InstallType::Go => "go",
            InstallType::Manual => "manual",
        }
    }
}

impl fmt::Display for InstallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single registry entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Slug derived from the name
    #[serde(default)]
    pub id: String,

    /// Display name
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: Category,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// SPDX identifier, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Repository URL; the merge identity
    pub repository: String,

    #[serde(default)]
    pub author: String,

    /// Star count from the metadata source
    #[serde(rename = "stars", default, skip_serializing_if = "is_zero")]
    pub popularity: u64,

    /// Last push; `None` is written as the zero timestamp
    #[serde(default, with = "timestamp")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(rename = "language", default, skip_serializing_if = "String::is_empty")]
    pub primary_language: String,

    #[serde(default)]
    pub install_type: InstallType,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub package: String,

    #[serde(default)]
    pub verified: bool,

    #[serde(default)]
    pub official: bool,
}

impl Record {
    /// Build a record with every enrichment field at its default.
    ///
    /// Identity fields (`id`, `author`, `official`) are left empty; see
    /// [`crate::identity::IdentityAssigner`].
    pub fn bare(name: &str, description: &str, repository: &str, category: Category) -> Self {
        Self {
            id: String::new(),
            name: name.to_string(),
            description: description.to_string(),
            category,
            tags: Vec::new(),
            license: None,
            repository: repository.to_string(),
            author: String::new(),
            popularity: 0,
            updated_at: None,
            primary_language: String::new(),
            install_type: InstallType::Manual,
            package: String::new(),
            verified: false,
            official: false,
        }
    }
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

/// Serde adapter mapping `None` to the zero timestamp and back
mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const ZERO: &str = "0001-01-01T00:00:00Z";

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => serializer.serialize_str(ZERO),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") | Some(ZERO) => Ok(None),
            Some(text) => DateTime::parse_from_rfc3339(text)
                .map(|ts| Some(ts.with_timezone(&Utc)))
                .map_err(de::Error::custom),
        }
    }
}
