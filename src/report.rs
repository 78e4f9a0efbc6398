//! Output files and console summary for clustered rounds.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::clustering::ClustersByPostalCode;

/// Separator between stations of a route line
pub const ROUTE_SEPARATOR: &str = " -> ";

/// Cluster and station counts for one postal code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostalCodeSummary {
    pub cp: String,
    pub groups: usize,
    pub bureaux: usize,
}

/// Write all clusters as pretty-printed JSON.
pub fn write_clusters_json(path: &Path, clusters: &ClustersByPostalCode) -> Result<()> {
    let json = serde_json::to_string_pretty(clusters).context("Failed to serialize clusters")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Render the routes text report.
///
/// For each postal code: the code, then `Trajet <n>:` followed by the route
/// line for every cluster with at least two stations (`n` counts all
/// clusters, so singletons leave gaps), then a blank line.
pub fn render_routes(clusters: &ClustersByPostalCode) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (cp, rounds) in clusters {
        lines.push(cp.clone());

        for (idx, cluster) in rounds.iter().enumerate() {
            if cluster.len() < 2 {
                continue;
            }
            lines.push(format!("Trajet {}:", idx + 1));
            let parts: Vec<String> = cluster.stations().iter().map(|s| s.route_label()).collect();
            lines.push(parts.join(ROUTE_SEPARATOR));
        }

        lines.push(String::new());
    }

    lines.join("\n")
}

/// Write the routes text report.
pub fn write_routes(path: &Path, clusters: &ClustersByPostalCode) -> Result<()> {
    fs::write(path, render_routes(clusters))
        .with_context(|| format!("Failed to write {}", path.display()))
}

pub fn summarize(clusters: &ClustersByPostalCode) -> Vec<PostalCodeSummary> {
    clusters
        .iter()
        .map(|(cp, rounds)| PostalCodeSummary {
            cp: cp.clone(),
            groups: rounds.len(),
            bureaux: rounds.iter().map(|c| c.len()).sum(),
        })
        .collect()
}
