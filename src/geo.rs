//! Great-circle geometry over WGS84 coordinates.
//!
//! Pure functions only; the ticket manager feeds these with facility
//! candidate sets to rank nearby care options.

use uuid::Uuid;

use crate::models::Coordinate;

/// Mean Earth radius in kilometers (IUGG).
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A ranked candidate returned by [`nearest`].
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked {
    pub id: Uuid,
    pub distance_km: f64,
    pub bearing_deg: f64,
}

/// Haversine great-circle distance in kilometers.
///
/// Symmetric; zero iff the coordinates are equal (modulo floating
/// tolerance).
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Initial heading from `a` to `b`, in degrees in [0, 360).
pub fn bearing_deg(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// The k nearest candidates to `origin`, ascending by distance.
///
/// Ties keep candidate insertion order (stable sort). Empty candidates or
/// `k == 0` yield an empty result, not an error.
pub fn nearest(origin: Coordinate, candidates: &[(Uuid, Coordinate)], k: usize) -> Vec<Ranked> {
    if k == 0 || candidates.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<Ranked> = candidates
        .iter()
        .map(|(id, coord)| Ranked {
            id: *id,
            distance_km: distance_km(origin, *coord),
            bearing_deg: bearing_deg(origin, *coord),
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked.truncate(k);
    ranked
}

/// Whether `target` lies within `radius_km` of `origin` (inclusive).
pub fn within_radius(origin: Coordinate, target: Coordinate, radius_km: f64) -> bool {
    distance_km(origin, target) <= radius_km
}
