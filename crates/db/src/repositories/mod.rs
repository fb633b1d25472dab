//! Repository layer: one module per table.
//!
//! Each repository is a zero-sized struct with async static methods that
//! accept any Postgres executor, so the same query runs against the pool or
//! inside an open transaction.

pub mod place_repo;
pub mod user_repo;

pub use place_repo::PlaceRepo;
pub use user_repo::UserRepo;
