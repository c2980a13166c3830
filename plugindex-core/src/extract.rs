//! Catalog extraction
//!
//! Scans the catalog line by line. Level-3 headings carrying an
//! `<a name="..."></a>` anchor set the category context; list items of the
//! form `- [name](url) ... - description` become records.
//!
//! ```text
//! ### 🗄️ <a name="databases"></a>Databases
//! - [Acme DB](https://github.com/acme/db) 🐍 ☁️ - Query Acme databases
//! ```
//!
//! Anything else is skipped without error.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::{debug, info};

use crate::category::CategoryNormalizer;
use crate::error::{RegistryError, Result};
use crate::identity::{IdentityAssigner, HOST_PREFIX};
use crate::record::Record;

const HEADING_PREFIX: &str = "### ";

static LINK_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*-\s*\[([^\]]+)\]\(([^)]+)\).*?-\s*(.+)").expect("valid link regex")
});

static HEADING_ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<a name="([^"]+)"></a>"#).expect("valid anchor regex"));

/// Counters reported after a scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub lines: usize,
    pub headings: usize,
    pub accepted: usize,
    /// Well-formed list items whose URL is not under [`HOST_PREFIX`]
    pub foreign_host: usize,
}

/// Records pulled from a catalog, in source order
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub records: Vec<Record>,
    pub stats: ExtractStats,
}

/// Turns catalog text into records
#[derive(Debug, Clone)]
pub struct Extractor {
    identity: IdentityAssigner,
}

impl Extractor {
    pub fn new(identity: IdentityAssigner) -> Self {
        Self { identity }
    }

    /// Read and extract a catalog file. An unreadable file is fatal.
    pub fn extract_file(&self, path: &Path) -> Result<Extraction> {
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;

        let extraction = self.extract(&content);
        info!(
            "Extracted {} records from {} ({} lines, {} headings, {} off-host links skipped)",
            extraction.stats.accepted,
            path.display(),
            extraction.stats.lines,
            extraction.stats.headings,
            extraction.stats.foreign_host
        );
        Ok(extraction)
    }

    /// Extract records from catalog text
    pub fn extract(&self, text: &str) -> Extraction {
        let mut categories = CategoryNormalizer::default();
        let mut extraction = Extraction::default();

        for line in text.lines() {
            extraction.stats.lines += 1;

            if line.starts_with(HEADING_PREFIX) {
                if let Some(anchor) = HEADING_ANCHOR.captures(line).and_then(|c| c.get(1)) {
                    extraction.stats.headings += 1;
                    categories.observe(anchor.as_str());
                }
                continue;
            }

            let Some(caps) = LINK_LINE.captures(line) else {
                continue;
            };

            let name = caps[1].trim();
            let repository = caps[2].trim();
            let description = caps[3].trim();

            if !repository.starts_with(HOST_PREFIX) {
                extraction.stats.foreign_host += 1;
                continue;
            }

            let mut record = Record::bare(name, description, repository, categories.current());
            self.identity.assign(&mut record);
            debug!("Extracted '{}' ({}) as {}", record.name, record.repository, record.category);

            extraction.records.push(record);
            extraction.stats.accepted += 1;
        }

        extraction
    }
}
