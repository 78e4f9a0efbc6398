//! Cluster (travel round) of stations.

use serde::{Deserialize, Serialize};

use super::Station;
use crate::distance::haversine;

/// The two stations of a cluster that are farthest apart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FarthestPair {
    /// Lower index of the pair
    pub first: usize,
    /// Higher index of the pair
    pub second: usize,
    /// Distance between them in meters
    pub distance: f64,
}

/// An ordered group of stations meant to be visited in one round.
///
/// Serializes as a plain array of stations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cluster {
    stations: Vec<Station>,

    /// Set when the merge step placed a station here regardless of distance
    #[serde(skip)]
    forced: bool,
}

impl Cluster {
    pub fn new(stations: Vec<Station>) -> Self {
        Self {
            stations,
            forced: false,
        }
    }

    pub fn singleton(station: Station) -> Self {
        Self::new(vec![station])
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn into_stations(self) -> Vec<Station> {
        self.stations
    }

    pub fn push(&mut self, station: Station) {
        self.stations.push(station);
    }

    /// Remove and return the station at `index`, keeping the order of the rest
    pub fn remove(&mut self, index: usize) -> Station {
        self.stations.remove(index)
    }

    /// Append a station that did not fit within the distance bound anywhere
    pub fn force_push(&mut self, station: Station) {
        self.forced = true;
        self.stations.push(station);
    }

    /// Whether a station was forced into this cluster past the distance bound
    pub fn is_forced(&self) -> bool {
        self.forced
    }

    /// First pair (in `i < j` scan order) with the strictly greatest distance.
    ///
    /// `None` for clusters of fewer than two stations or whose stations all
    /// share a location.
    pub fn farthest_pair(&self) -> Option<FarthestPair> {
        let mut best: Option<FarthestPair> = None;
        let mut best_distance = 0.0;

        for (i, a) in self.stations.iter().enumerate() {
            for (j, b) in self.stations.iter().enumerate().skip(i + 1) {
                let distance = haversine(a, b);
                if distance > best_distance {
                    best_distance = distance;
                    best = Some(FarthestPair {
                        first: i,
                        second: j,
                        distance,
                    });
                }
            }
        }

        best
    }

    /// Maximum pairwise distance in meters (0 for fewer than two stations)
    pub fn max_pairwise_distance(&self) -> f64 {
        self.farthest_pair().map_or(0.0, |pair| pair.distance)
    }

    /// Maximum pairwise distance the cluster would have with `station` appended
    pub fn max_distance_with(&self, station: &Station) -> f64 {
        self.stations
            .iter()
            .map(|s| haversine(s, station))
            .fold(self.max_pairwise_distance(), f64::max)
    }
}

impl From<Vec<Station>> for Cluster {
    fn from(stations: Vec<Station>) -> Self {
        Self::new(stations)
    }
}
