//! End-to-end registry build
//!
//! extract → enrich → (overrides) → merge → rank → write
//!
//! Without an override file there is nothing to merge; every catalog line
//! stays a record, even when two lines share a repository.
//!
//! The override file is read before enrichment starts so a malformed file
//! fails the run without spending any metadata requests.

use std::path::Path;
use tracing::info;

use crate::config::PipelineConfig;
use crate::enrich::{EnrichSummary, Enricher, MetadataSource};
use crate::error::Result;
use crate::extract::Extractor;
use crate::identity::IdentityAssigner;
use crate::merge;
use crate::rank;
use crate::record::Record;

/// What a build produced
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Final ranked records
    pub records: Vec<Record>,
    /// Records extracted from the catalog
    pub extracted: usize,
    /// Override records loaded
    pub overrides: usize,
    pub enrichment: EnrichSummary,
}

/// Registry build wired to a metadata source
pub struct Pipeline<S> {
    config: PipelineConfig,
    extractor: Extractor,
    enricher: Enricher<S>,
}

impl<S: MetadataSource> Pipeline<S> {
    pub fn new(config: PipelineConfig, source: S) -> Self {
        let extractor = Extractor::new(IdentityAssigner::new(&config.official_authors));
        let enricher = Enricher::new(source, config.request_delay(), config.monorepos.clone());
        Self {
            config,
            extractor,
            enricher,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        self.enricher.source()
    }

    /// Build the ranked registry without writing it
    pub async fn build(&self, catalog: &Path, overrides: Option<&Path>) -> Result<BuildReport> {
        let extraction = self.extractor.extract_file(catalog)?;
        let overrides = match overrides {
            Some(path) => Some(merge::load_overrides(path)?),
            None => None,
        };

        Ok(self.assemble(extraction.records, overrides).await)
    }

    /// Enrich, merge and rank already-parsed records
    pub async fn assemble(
        &self,
        mut extracted: Vec<Record>,
        overrides: Option<Vec<Record>>,
    ) -> BuildReport {
        let mut enrichment = self.enricher.enrich(&mut extracted).await;
        let extracted_count = extracted.len();

        let (mut records, override_count) = match overrides {
            Some(mut overrides) => {
                if self.config.enrich_overrides {
                    let extra = self.enricher.enrich(&mut overrides).await;
                    enrichment.attempted += extra.attempted;
                    enrichment.enriched += extra.enriched;
                    enrichment.degraded += extra.degraded;
                }
                let count = overrides.len();
                info!("Merging {} override records", count);
                (merge::merge(extracted, overrides), count)
            }
            None => (extracted, 0),
        };

        rank::rank(&mut records);

        BuildReport {
            records,
            extracted: extracted_count,
            overrides: override_count,
            enrichment,
        }
    }

    /// Build and write the registry to `output`
    pub async fn run(
        &self,
        catalog: &Path,
        overrides: Option<&Path>,
        output: &Path,
    ) -> Result<BuildReport> {
        let report = self.build(catalog, overrides).await?;
        rank::write_registry(&report.records, output)?;
        Ok(report)
    }
}
