//! Fold undersized clusters into their neighbours.

use tracing::warn;

use super::ClusterParams;
use crate::models::Cluster;

/// Redistribute the stations of clusters smaller than `min_size`.
///
/// Each orphaned station goes to the full-size cluster whose resulting
/// maximum pairwise distance is smallest while staying within
/// `max_distance_m`. When no cluster qualifies it is appended to the first
/// full-size cluster regardless of distance (the cluster is flagged as
/// forced), and when there is none yet it starts a new cluster.
pub fn merge_small_clusters(clusters: Vec<Cluster>, params: &ClusterParams) -> Vec<Cluster> {
    let (mut big, small): (Vec<Cluster>, Vec<Cluster>) = clusters
        .into_iter()
        .partition(|c| c.len() >= params.min_size);

    for station in small.into_iter().flat_map(Cluster::into_stations) {
        let best = big
            .iter()
            .enumerate()
            .map(|(i, c)| (i, c.max_distance_with(&station)))
            .filter(|&(_, d)| d <= params.max_distance_m)
            .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
                Some((_, best_d)) if best_d <= d => best,
                _ => Some((i, d)),
            });

        if let Some((i, _)) = best {
            big[i].push(station);
        } else if let Some(first) = big.first_mut() {
            warn!(
                "No cluster within {} m for station {} ({}); forcing it into the first cluster",
                params.max_distance_m,
                station.objectid,
                station.postal_code()
            );
            first.force_push(station);
        } else {
            big.push(Cluster::singleton(station));
        }
    }

    big
}
