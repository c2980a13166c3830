//! Repository metadata enrichment
//!
//! Walks records in order, one request at a time, and fills in stars,
//! language, license and last push from a [`MetadataSource`]. A failed
//! lookup degrades that record to a manual install and the batch carries on.
//!
//! ```text
//! record ──► repo_path ──► source.fetch ──┬─ ok ──► stats ──► install dispatch ──► monorepo override ─┐
//!                                          └─ err ─► manual, no package ────────────────────────────────┤
//!                                                                                                       ▼
//!                                                                                                  fixed delay
//! ```

pub mod install;
pub mod source;

#[cfg(feature = "github")]
pub mod github;

pub use source::{LicenseInfo, MetadataSource, RepoMetadata, StaticSource};

#[cfg(feature = "github")]
pub use github::{GitHubSource, DEFAULT_API_BASE};

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::identity::repo_path;
use crate::record::{InstallType, Record};

/// Outcome counts for one enrichment pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichSummary {
    pub attempted: usize,
    pub enriched: usize,
    pub degraded: usize,
}

/// Sequential, rate-paced enricher
pub struct Enricher<S> {
    source: S,
    delay: Duration,
    monorepos: Vec<String>,
}

impl<S: MetadataSource> Enricher<S> {
    pub fn new(source: S, delay: Duration, monorepos: Vec<String>) -> Self {
        Self {
            source,
            delay,
            monorepos,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Enrich every record in place, in order
    pub async fn enrich(&self, records: &mut [Record]) -> EnrichSummary {
        let mut summary = EnrichSummary::default();

        info!(
            "Enriching {} records via {} ({:?} between requests)",
            records.len(),
            self.source.name(),
            self.delay
        );

        for record in records.iter_mut() {
            summary.attempted += 1;
            if self.enrich_one(record).await {
                summary.enriched += 1;
            } else {
                summary.degraded += 1;
            }

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        info!(
            "Enrichment finished: {} enriched, {} degraded",
            summary.enriched, summary.degraded
        );
        summary
    }

    /// Returns `false` when the lookup failed and the record was degraded
    async fn enrich_one(&self, record: &mut Record) -> bool {
        let path = repo_path(&record.repository);

        let metadata = match self.source.fetch(&path).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Failed to fetch metadata for {}: {:#}", path, anyhow::Error::new(e));
                record.install_type = InstallType::Manual;
                record.package.clear();
                return false;
            }
        };

        apply_metadata(record, &metadata, &path);

        // Monorepos host many plugins; always manual
        if let Some(monorepo) = install::monorepo_for(&path, &self.monorepos) {
            record.install_type = InstallType::Manual;
            if record.package.is_empty() {
                record.package = monorepo.to_string();
            }
        }

        debug!(
            "{} -> {} {:?} ({} stars)",
            path, record.install_type, record.package, record.popularity
        );
        true
    }
}

fn apply_metadata(record: &mut Record, metadata: &RepoMetadata, path: &str) {
    record.popularity = metadata.stars;
    record.primary_language = metadata.language.clone().unwrap_or_default();
    record.updated_at = metadata.pushed_at;
    if let Some(spdx) = metadata.spdx_id() {
        record.license = Some(spdx.to_string());
    }

    let (install_type, package) = install::detect(&record.primary_language, path);
    record.install_type = install_type;
    record.package = package;
}
