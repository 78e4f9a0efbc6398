//! Voting-station round planner.
//!
//! Reads the station export, clusters stations per postal code and writes
//! the rounds as JSON and as a text report.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use bureaux::clustering::{build_groups, cluster_all_with_progress, ClusterParams};
use bureaux::loader::load_records;
use bureaux::report::{summarize, write_clusters_json, write_routes};

use crate::config::Config;

/// Number of postal codes printed in the console summary
const SUMMARY_ROWS: usize = 10;

#[derive(Parser, Debug)]
#[command(name = "cluster")]
#[command(about = "Group voting stations into collection rounds per postal code")]
struct Args {
    /// Station export (JSON array)
    #[arg(short, long, default_value = "bureaux_votes_2026.json")]
    file: PathBuf,

    /// Output directory, created if missing
    #[arg(short, long, default_value = "outputs")]
    out_dir: PathBuf,

    /// File name of the JSON clusters output
    #[arg(long, default_value = "clusters_by_cp.json")]
    json_name: String,

    /// File name of the text routes output
    #[arg(long, default_value = "trajets_by_cp.txt")]
    text_name: String,

    /// Optional TOML config with a [clustering] section
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Minimum stations per round
    #[arg(long)]
    min_size: Option<usize>,

    /// Maximum stations per round
    #[arg(long)]
    max_size: Option<usize>,

    /// Maximum distance between two stations of a round, in meters
    #[arg(long)]
    max_distance: Option<f64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Config file values overridden by any flags given on the command line
    fn cluster_params(&self) -> Result<ClusterParams> {
        let mut params = match &self.config {
            Some(path) => {
                info!("Config: {}", path.display());
                Config::load_from_file(path)?.clustering
            }
            None => ClusterParams::default(),
        };

        if let Some(min_size) = self.min_size {
            params.min_size = min_size;
        }
        if let Some(max_size) = self.max_size {
            params.max_size = max_size;
        }
        if let Some(max_distance) = self.max_distance {
            params.max_distance_m = max_distance;
        }

        params
            .validate()
            .context("Invalid clustering parameters")?;
        Ok(params)
    }
}

/// Log filter used when `RUST_LOG` is not set
fn default_log_filter(verbose: bool) -> EnvFilter {
    EnvFilter::new(if verbose { "debug" } else { "info" })
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_log_filter(args.verbose));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Bureaux Round Planner");
    info!("File: {}", args.file.display());

    let params = args.cluster_params()?;
    info!(
        "Rounds of {}-{} stations within {} m",
        params.min_size, params.max_size, params.max_distance_m
    );

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    let records = load_records(&args.file)?;
    let groups = build_groups(records);

    let pb = ProgressBar::new(groups.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    let clusters = cluster_all_with_progress(groups, &params, |cp| {
        pb.set_message(cp.to_string());
        pb.inc(1);
    });
    pb.finish_and_clear();

    let forced = clusters
        .values()
        .flatten()
        .filter(|c| c.is_forced())
        .count();
    if forced > 0 {
        warn!("{} rounds exceed the distance limit after merging", forced);
    }

    let json_path = args.out_dir.join(&args.json_name);
    write_clusters_json(&json_path, &clusters)?;
    info!("Clusters written to {}", json_path.display());

    info!("Summary (first {}):", SUMMARY_ROWS);
    for row in summarize(&clusters).iter().take(SUMMARY_ROWS) {
        info!(
            "  {}: {} rounds, {} stations",
            row.cp, row.groups, row.bureaux
        );
    }

    let text_path = args.out_dir.join(&args.text_name);
    write_routes(&text_path, &clusters)?;
    info!("Text routes written to {}", text_path.display());

    Ok(())
}
