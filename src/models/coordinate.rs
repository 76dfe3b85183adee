use serde::{Deserialize, Serialize};

/// A WGS84 point. Immutable value; no altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_serializes_lat_lon() {
        let c = Coordinate::new(31.2, 34.3);
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"lat\":31.2"));
        assert!(json.contains("\"lon\":34.3"));
    }
}
