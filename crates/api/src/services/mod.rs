//! Business services behind the HTTP handlers.
//!
//! Services depend only on the storage and geocoding capabilities, never on
//! a concrete engine, so tests can drive them with in-memory doubles.

pub mod accounts;
pub mod places;

pub use accounts::{AccountError, AccountService};
pub use places::{PlaceService, PlaceServiceError};
