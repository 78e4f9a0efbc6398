//! Bureaux - groups voting stations into short collection rounds per postal code.
//!
//! This library provides the clustering pipeline and I/O helpers used by the
//! `cluster` binary.

pub mod clustering;
pub mod distance;
pub mod loader;
pub mod models;
pub mod report;

pub use clustering::{build_groups, cluster_all, cluster_group, ClusterParams};
pub use models::{Cluster, RawRecord, Station};
