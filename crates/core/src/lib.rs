//! Domain building blocks shared by the storage, geocoding and API crates.
//!
//! Everything here is pure logic: no database handles, no HTTP clients.

pub mod error;
pub mod geo;
pub mod geocoding;
pub mod normalize;
pub mod types;
