//! Station clustering pipeline.
//!
//! Each postal-code group goes through greedy seeding, distance validation
//! with splitting, and merging of undersized clusters. Groups are processed
//! independently and in postal-code order.

mod grouper;
mod merge;
mod params;
mod seed;
mod split;

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{Cluster, Station};

pub use grouper::{build_groups, Groups};
pub use merge::merge_small_clusters;
pub use params::{ClusterParams, ParamsError, MAX_CLUSTER_SIZE, MAX_DISTANCE_M, MIN_CLUSTER_SIZE};
pub use seed::seed_clusters;
pub use split::split_clusters;

/// Final clusters of each postal code
pub type ClustersByPostalCode = BTreeMap<String, Vec<Cluster>>;

/// Cluster the stations of a single postal code.
pub fn cluster_group(stations: Vec<Station>, params: &ClusterParams) -> Vec<Cluster> {
    let seeded = seed_clusters(stations, params);
    let seeded_count = seeded.len();
    let validated = split_clusters(seeded, params);
    let validated_count = validated.len();
    let merged = merge_small_clusters(validated, params);

    debug!(
        "{} seeded, {} after splitting, {} after merging",
        seeded_count,
        validated_count,
        merged.len()
    );

    merged
}

/// Cluster every group in postal-code order.
pub fn cluster_all(groups: Groups, params: &ClusterParams) -> ClustersByPostalCode {
    cluster_all_with_progress(groups, params, |_| {})
}

/// Like [`cluster_all`], calling `on_group` with each postal code once its
/// group is done.
pub fn cluster_all_with_progress<F>(
    groups: Groups,
    params: &ClusterParams,
    mut on_group: F,
) -> ClustersByPostalCode
where
    F: FnMut(&str),
{
    let mut result = ClustersByPostalCode::new();
    for (cp, stations) in groups {
        let clusters = cluster_group(stations, params);
        debug!("Postal code {}: {} clusters", cp, clusters.len());
        on_group(&cp);
        result.insert(cp, clusters);
    }

    result
}
