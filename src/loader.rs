//! Input document loading.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::models::RawRecord;

/// Read the station export, a JSON array of records.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>> {
    info!("Loading stations from {}", path.display());

    let file = File::open(path)
        .with_context(|| format!("Failed to open input file {}", path.display()))?;
    let records: Vec<RawRecord> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse input file {}", path.display()))?;

    info!("Loaded {} records", records.len());
    Ok(records)
}
