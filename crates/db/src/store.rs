//! Storage capabilities consumed by the services.
//!
//! [`Store`] is the shared, cloneable-behind-`Arc` handle for single-record
//! reads and writes. Multi-record writes go through a [`StoreTx`] obtained
//! from [`Store::begin`]: every write made through it becomes visible on
//! [`StoreTx::commit`] or is discarded on [`StoreTx::abort`]. Dropping a
//! transaction without committing discards its writes.

use async_trait::async_trait;
use places_core::types::DbId;

use crate::models::place::{Place, UpdatePlace};
use crate::models::user::User;

/// Errors surfaced by any storage engine.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A user with the same (normalized) email already exists.
    #[error("A user with this email already exists")]
    DuplicateEmail,

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Engine-specific failure that is not a sqlx error.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Shared storage handle.
#[async_trait]
pub trait Store: Send + Sync {
    /// Open a transaction spanning place and user records.
    async fn begin(&self) -> Result<Box<dyn StoreTx>, StoreError>;

    /// Confirm the engine is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;

    async fn find_place(&self, id: DbId) -> Result<Option<Place>, StoreError>;

    /// All places whose creator is `creator`, oldest first.
    async fn list_places_by_creator(&self, creator: DbId) -> Result<Vec<Place>, StoreError>;

    /// Edit title and description. Returns `None` if no place has this id.
    async fn update_place(
        &self,
        id: DbId,
        input: &UpdatePlace,
    ) -> Result<Option<Place>, StoreError>;

    async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError>;

    /// Look up a user by an already-normalized email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// All users, oldest first.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Insert a new user. Fails with [`StoreError::DuplicateEmail`] if the
    /// email is taken.
    async fn create_user(&self, user: &User) -> Result<(), StoreError>;
}

/// One open all-or-nothing unit of work.
#[async_trait]
pub trait StoreTx: Send {
    async fn insert_place(&mut self, place: &Place) -> Result<(), StoreError>;

    /// Remove a place. Returns `false` if it did not exist.
    async fn delete_place(&mut self, id: DbId) -> Result<bool, StoreError>;

    /// Read a user inside the transaction. Engines that support it lock the
    /// row until the transaction ends.
    async fn find_user(&mut self, id: DbId) -> Result<Option<User>, StoreError>;

    /// Persist every mutable field of `user`, including its place set.
    async fn save_user(&mut self, user: &User) -> Result<(), StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;

    async fn abort(self: Box<Self>) -> Result<(), StoreError>;
}
