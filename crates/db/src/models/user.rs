//! User entity model and DTOs.

use chrono::Utc;
use places_core::types::{new_id, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
///
/// The owned-places set is a maintained index over `places.creator_id`. It is
/// only changed through [`User::attach_place`] and [`User::detach_place`].
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub image: String,
    #[sqlx(rename = "place_ids")]
    places: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Build a new account with no places. `email` must already be normalized.
    pub fn new(name: String, email: String, password_hash: String, image: String) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            name,
            email,
            password_hash,
            image,
            places: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Ids of the places this user owns, in attachment order.
    pub fn places(&self) -> &[DbId] {
        &self.places
    }

    pub fn owns_place(&self, place_id: DbId) -> bool {
        self.places.contains(&place_id)
    }

    /// Add a place to the owned set. Returns `false` if it was already there.
    pub fn attach_place(&mut self, place_id: DbId) -> bool {
        if self.owns_place(place_id) {
            return false;
        }
        self.places.push(place_id);
        self.updated_at = Utc::now();
        true
    }

    /// Remove a place from the owned set. Returns `false` if it was absent.
    pub fn detach_place(&mut self, place_id: DbId) -> bool {
        let before = self.places.len();
        self.places.retain(|id| *id != place_id);
        let removed = self.places.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub image: String,
    pub places: Vec<DbId>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            image: user.image.clone(),
            places: user.places.clone(),
        }
    }
}
