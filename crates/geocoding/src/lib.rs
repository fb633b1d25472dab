//! Geocoding collaborators.
//!
//! [`opencage::OpenCageGeocoder`] resolves addresses through the OpenCage
//! HTTP API. [`fixed::FixedGeocoder`] answers from an in-memory table and is
//! used for local runs without an API key and in tests.

pub mod fixed;
pub mod opencage;

pub use fixed::FixedGeocoder;
pub use opencage::{OpenCageConfig, OpenCageGeocoder};
