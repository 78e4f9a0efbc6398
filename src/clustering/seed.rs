//! Greedy nearest-neighbour seeding of initial clusters.

use super::ClusterParams;
use crate::distance::haversine;
use crate::models::{Cluster, Station};

/// Build initial clusters for one postal-code group.
///
/// The first remaining station seeds a cluster and pulls in up to
/// `max_size - 1` of its nearest remaining neighbours within
/// `max_distance_m`. Repeats until every station is placed. The result
/// depends on input order.
pub fn seed_clusters(stations: Vec<Station>, params: &ClusterParams) -> Vec<Cluster> {
    let mut clusters = Vec::new();
    let mut remaining = stations;

    while !remaining.is_empty() {
        let seed = remaining.remove(0);

        let mut nearby: Vec<(usize, f64)> = remaining
            .iter()
            .enumerate()
            .map(|(i, s)| (i, haversine(&seed, s)))
            .filter(|&(_, d)| d <= params.max_distance_m)
            .collect();
        // Stable, so equidistant neighbours keep pool order
        nearby.sort_by(|a, b| a.1.total_cmp(&b.1));
        nearby.truncate(params.max_size.saturating_sub(1));

        let mut slots: Vec<Option<Station>> = remaining.into_iter().map(Some).collect();
        let mut members = Vec::with_capacity(nearby.len() + 1);
        members.push(seed);
        members.extend(nearby.iter().filter_map(|&(i, _)| slots[i].take()));

        remaining = slots.into_iter().flatten().collect();
        clusters.push(Cluster::new(members));
    }

    clusters
}
