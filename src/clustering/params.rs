//! Size and distance limits for clusters.

use serde::Deserialize;
use thiserror::Error;

/// Minimum number of stations in a round
pub const MIN_CLUSTER_SIZE: usize = 2;
/// Maximum number of stations in a round
pub const MAX_CLUSTER_SIZE: usize = 6;
/// Maximum distance between any two stations of a round, in meters
pub const MAX_DISTANCE_M: f64 = 1000.0;

#[derive(Error, Debug, PartialEq)]
pub enum ParamsError {
    #[error("min_size must be at least 1, got {0}")]
    MinSizeTooSmall(usize),

    #[error("max_size ({max}) must be at least min_size ({min})")]
    MaxBelowMin { min: usize, max: usize },

    #[error("max_distance_m must be a positive finite number, got {0}")]
    InvalidDistance(f64),
}

/// Limits applied by every clustering stage
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClusterParams {
    pub min_size: usize,
    pub max_size: usize,
    pub max_distance_m: f64,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            min_size: MIN_CLUSTER_SIZE,
            max_size: MAX_CLUSTER_SIZE,
            max_distance_m: MAX_DISTANCE_M,
        }
    }
}

impl ClusterParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.min_size < 1 {
            return Err(ParamsError::MinSizeTooSmall(self.min_size));
        }
        if self.max_size < self.min_size {
            return Err(ParamsError::MaxBelowMin {
                min: self.min_size,
                max: self.max_size,
            });
        }
        if !self.max_distance_m.is_finite() || self.max_distance_m <= 0.0 {
            return Err(ParamsError::InvalidDistance(self.max_distance_m));
        }
        Ok(())
    }
}
