//! Core data models for the clustering pipeline.

pub mod cluster;
pub mod station;

pub use cluster::{Cluster, FarthestPair};
pub use station::{RawRecord, Station, UNKNOWN_POSTAL_CODE};

/// Station at `(lat, lon)` in postal code 75001, addressed by `name`
#[cfg(test)]
pub(crate) fn test_station(name: &str, lat: f64, lon: f64) -> Station {
    Station {
        objectid: serde_json::Value::from(name),
        id_bv: serde_json::Value::Null,
        num_bv: serde_json::Value::Null,
        lib: serde_json::Value::from(format!("Bureau {}", name)),
        adresse: serde_json::Value::from(format!("{} rue de test", name)),
        cp: serde_json::Value::from("75001"),
        lat,
        lon,
    }
}
