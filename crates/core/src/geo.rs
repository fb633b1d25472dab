//! Geographic coordinate pair produced by geocoding.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees (WGS 84).
///
/// Serializes as `{ "lat": .., "lng": .. }`, the shape map widgets and the
/// upstream geocoding service both use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are finite and inside the valid WGS 84 ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}
