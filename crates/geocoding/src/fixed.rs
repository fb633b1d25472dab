//! Table-driven geocoder.

use std::collections::HashMap;

use async_trait::async_trait;
use places_core::geo::Coordinates;
use places_core::geocoding::{Geocoder, GeocodingError};

/// Resolves addresses by exact (trimmed) match against a fixed table.
///
/// Unknown addresses yield [`GeocodingError::AddressNotResolved`].
#[derive(Debug, Clone, Default)]
pub struct FixedGeocoder {
    entries: HashMap<String, Coordinates>,
}

impl FixedGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration of one address.
    pub fn with(mut self, address: &str, location: Coordinates) -> Self {
        self.entries.insert(address.trim().to_string(), location);
        self
    }
}

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn locate(&self, address: &str) -> Result<Coordinates, GeocodingError> {
        self.entries
            .get(address.trim())
            .copied()
            .ok_or(GeocodingError::AddressNotResolved)
    }
}
