//! Ranking and serialization of the final registry

use std::cmp::Ordering;
use std::path::Path;

use crate::error::{RegistryError, Result};
use crate::record::Record;

/// Official first, then most stars, then name (byte-wise ascending)
pub fn compare(a: &Record, b: &Record) -> Ordering {
    b.official
        .cmp(&a.official)
        .then_with(|| b.popularity.cmp(&a.popularity))
        .then_with(|| a.name.cmp(&b.name))
}

/// Sort in place. Stable: full ties keep merge order.
pub fn rank(records: &mut [Record]) {
    records.sort_by(compare);
}

/// Pretty-printed JSON array, newline terminated
pub fn to_json(records: &[Record]) -> Result<String> {
    let mut json = serde_json::to_string_pretty(records).map_err(RegistryError::Serialize)?;
    json.push('\n');
    Ok(json)
}

/// Write the registry, replacing any existing file
pub fn write_registry(records: &[Record], path: &Path) -> Result<()> {
    let json = to_json(records)?;
    std::fs::write(path, json).map_err(|source| RegistryError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
