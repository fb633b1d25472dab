//! Address-to-coordinates capability.
//!
//! The place service only sees this trait; the HTTP-backed implementation
//! lives in `places-geocoding`.

use async_trait::async_trait;

use crate::geo::Coordinates;

/// Failure modes of a geocoding lookup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeocodingError {
    /// The service answered but found no location for the address.
    #[error("Could not find location for the specified address")]
    AddressNotResolved,

    /// Network failure, timeout, non-success status or malformed payload.
    #[error("Geocoding service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Resolves a free-text postal address to a coordinate pair.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn locate(&self, address: &str) -> Result<Coordinates, GeocodingError>;
}
