//! Great-circle distance between stations.

use geo::Point;

use crate::models::Station;

/// Mean Earth radius in meters (spherical model)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance in meters between two `geo` points (x = lon, y = lat).
///
/// Uses the `atan2` form of the central angle; `geo`'s `HaversineMeasure`
/// uses `asin`, which can differ in the last bits right at the distance limit.
pub fn haversine_points(a: Point<f64>, b: Point<f64>) -> f64 {
    let phi1 = a.y().to_radians();
    let phi2 = b.y().to_radians();
    let d_phi = (b.y() - a.y()).to_radians();
    let d_lambda = (b.x() - a.x()).to_radians();

    let sin_d_phi = (d_phi / 2.0).sin();
    let sin_d_lambda = (d_lambda / 2.0).sin();
    let x = sin_d_phi * sin_d_phi + phi1.cos() * phi2.cos() * sin_d_lambda * sin_d_lambda;
    let c = 2.0 * x.sqrt().atan2((1.0 - x).sqrt());

    EARTH_RADIUS_M * c
}

/// Haversine distance in meters between two stations
pub fn haversine(a: &Station, b: &Station) -> f64 {
    haversine_points(a.location(), b.location())
}
