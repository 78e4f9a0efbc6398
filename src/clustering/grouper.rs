//! Partition raw records by postal code.

use std::collections::BTreeMap;

use hashbrown::HashSet;
use tracing::{debug, info};

use crate::models::{RawRecord, Station};

/// Stations of each postal code, keyed in ascending postal-code order
pub type Groups = BTreeMap<String, Vec<Station>>;

/// Build per-postal-code groups from raw records.
///
/// Records without both coordinates are skipped. Within a postal code, a
/// station whose `adresse` was already seen is dropped, so the first record
/// for an address wins.
pub fn build_groups<I>(records: I) -> Groups
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut groups = Groups::new();
    let mut skipped = 0usize;

    for record in records {
        match Station::from_record(record) {
            Some(station) => groups.entry(station.postal_code()).or_default().push(station),
            None => skipped += 1,
        }
    }

    let mut duplicates = 0usize;
    for (cp, stations) in groups.iter_mut() {
        let before = stations.len();
        dedup_by_address(stations);
        if stations.len() < before {
            debug!(
                "Postal code {}: dropped {} duplicate addresses",
                cp,
                before - stations.len()
            );
            duplicates += before - stations.len();
        }
    }

    info!(
        "Built {} postal code groups ({} stations, {} without coordinates, {} duplicates)",
        groups.len(),
        groups.values().map(Vec::len).sum::<usize>(),
        skipped,
        duplicates
    );

    groups
}

fn dedup_by_address(stations: &mut Vec<Station>) {
    let mut seen: HashSet<String> = HashSet::new();
    stations.retain(|s| seen.insert(s.address_key()));
}
