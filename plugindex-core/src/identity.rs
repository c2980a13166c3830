//! Stable identifiers derived from a record's name and repository URL

use once_cell::sync::Lazy;
use regex::Regex;

use crate::record::Record;

/// Only repositories under this prefix are accepted from the catalog
pub const HOST_PREFIX: &str = "https://github.com/";

/// Host used when building Go module paths
pub const MODULE_HOST: &str = "github.com";

static NON_SLUG: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));

/// Lower-case `name` and collapse every run of other characters to `-`
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase();
    NON_SLUG
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// First path segment after [`HOST_PREFIX`], or empty
pub fn author_of(repository: &str) -> String {
    repository
        .strip_prefix(HOST_PREFIX)
        .unwrap_or(repository)
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Reduce a repository URL to its `owner/name` path.
///
/// URLs pointing into a subdirectory or file (`/tree/...`, `/blob/...`) are
/// cut back to the repository root.
pub fn repo_path(repository: &str) -> String {
    let mut path = repository.strip_prefix(HOST_PREFIX).unwrap_or(repository);
    path = path.strip_suffix('/').unwrap_or(path);

    if let Some(idx) = path.find("/tree/") {
        path = &path[..idx];
    }
    if let Some(idx) = path.find("/blob/") {
        path = &path[..idx];
    }

    path.to_string()
}

/// Assigns `id`, `author` and `official` to records
#[derive(Debug, Clone)]
pub struct IdentityAssigner {
    official_authors: Vec<String>,
}

impl IdentityAssigner {
    pub fn new(official_authors: &[String]) -> Self {
        Self {
            official_authors: official_authors.iter().map(|a| a.to_lowercase()).collect(),
        }
    }

    /// Whether `author` belongs to a trusted maintainer
    pub fn is_official(&self, author: &str) -> bool {
        let author = author.to_lowercase();
        self.official_authors
            .iter()
            .any(|handle| !handle.is_empty() && author.contains(handle.as_str()))
    }

    /// Set all identity fields on a freshly extracted record
    pub fn assign(&self, record: &mut Record) {
        record.id = slugify(&record.name);
        record.author = author_of(&record.repository);
        record.official = self.is_official(&record.author);
    }

    /// Fill only the identity fields an override left empty
    pub fn backfill(record: &mut Record) {
        if record.id.is_empty() {
            record.id = slugify(&record.name);
        }
        if record.author.is_empty() {
            record.author = author_of(&record.repository);
        }
    }
}
