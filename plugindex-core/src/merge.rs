//! Operator overrides and repository-keyed merge
//!
//! Overrides are a JSON array of (possibly partial) records. An override
//! sharing a `repository` with an extracted record replaces it outright;
//! only `id` and `author` are backfilled when the override leaves them empty.

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{RegistryError, Result};
use crate::identity::IdentityAssigner;
use crate::record::Record;

/// Parse override records from JSON text and backfill identity fields
pub fn parse_overrides(content: &str, origin: &Path) -> Result<Vec<Record>> {
    let mut records: Vec<Record> =
        serde_json::from_str(content).map_err(|source| RegistryError::OverrideParse {
            path: origin.to_path_buf(),
            source,
        })?;

    for record in &mut records {
        IdentityAssigner::backfill(record);
    }

    Ok(records)
}

/// Load the override file. Unreadable or malformed files are fatal.
pub fn load_overrides(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path).map_err(|source| RegistryError::OverrideRead {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_overrides(&content, path)?;
    info!("Loaded {} override records from {}", records.len(), path.display());
    Ok(records)
}

/// Merge by `repository`; overrides win.
///
/// Result order: extracted records in their original order (a replaced
/// record keeps its slot), then overrides for new repositories in file
/// order.
pub fn merge(extracted: Vec<Record>, overrides: Vec<Record>) -> Vec<Record> {
    let mut merged: Vec<Record> = Vec::with_capacity(extracted.len() + overrides.len());
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut replaced = 0usize;

    for record in extracted.into_iter().chain(overrides) {
        match slots.get(&record.repository) {
            Some(&slot) => {
                debug!("Replacing record for {}", record.repository);
                merged[slot] = record;
                replaced += 1;
            }
            None => {
                slots.insert(record.repository.clone(), merged.len());
                merged.push(record);
            }
        }
    }

    debug!("Merge collapsed {} duplicate repositories", replaced);
    warn_duplicate_ids(&merged);
    merged
}

fn warn_duplicate_ids(records: &[Record]) {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for record in records {
        if let Some(first) = seen.insert(record.id.as_str(), record.repository.as_str()) {
            warn!(
                "Duplicate id '{}' for {} and {}",
                record.id, first, record.repository
            );
        }
    }
}
