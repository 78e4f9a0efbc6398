//! Enforce the distance bound by splitting over-spread clusters.

use std::collections::VecDeque;

use tracing::debug;

use super::ClusterParams;
use crate::models::Cluster;

/// Validate clusters against `max_distance_m`, splitting offenders.
///
/// Clusters are processed first-in first-out. A cluster whose farthest pair
/// exceeds the bound loses the higher-indexed station of that pair; the
/// remainder is re-queued (or kept as-is when it drops below `min_size`) and
/// the removed station joins the first already-accepted cluster that can
/// take it within the bound, or is re-queued on its own.
pub fn split_clusters(clusters: Vec<Cluster>, params: &ClusterParams) -> Vec<Cluster> {
    let mut queue: VecDeque<Cluster> = clusters.into();
    let mut accepted: Vec<Cluster> = Vec::with_capacity(queue.len());

    while let Some(mut cluster) = queue.pop_front() {
        if cluster.len() < params.min_size {
            accepted.push(cluster);
            continue;
        }

        let pair = match cluster.farthest_pair() {
            Some(pair) if pair.distance > params.max_distance_m => pair,
            _ => {
                accepted.push(cluster);
                continue;
            }
        };

        debug!(
            "Splitting cluster of {} stations ({:.0} m between #{} and #{})",
            cluster.len(),
            pair.distance,
            pair.first,
            pair.second
        );

        let moved = cluster.remove(pair.second);
        if cluster.len() >= params.min_size {
            queue.push_back(cluster);
        } else {
            accepted.push(cluster);
        }

        match accepted
            .iter_mut()
            .find(|c| c.max_distance_with(&moved) <= params.max_distance_m)
        {
            Some(target) => target.push(moved),
            None => queue.push_back(Cluster::singleton(moved)),
        }
    }

    accepted
}
