//! Place entity model and DTOs.

use chrono::Utc;
use places_core::geo::Coordinates;
use places_core::types::{new_id, DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// A point of interest owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub address: String,
    pub location: Coordinates,
    pub image: String,
    /// The owning user. The owner's place set mirrors this reference.
    pub creator: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields needed to construct a new [`Place`].
#[derive(Debug, Clone)]
pub struct NewPlace {
    pub title: String,
    pub description: String,
    pub address: String,
    pub location: Coordinates,
    pub image: String,
    pub creator: DbId,
}

/// DTO for editing a place. Only title and description are editable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePlace {
    pub title: String,
    pub description: String,
}

impl Place {
    /// Build a place record with a fresh id, not yet persisted.
    pub fn new(input: NewPlace) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            title: input.title,
            description: input.description,
            address: input.address,
            location: input.location,
            image: input.image,
            creator: input.creator,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an edit in place, bumping `updated_at`.
    pub fn apply(&mut self, update: &UpdatePlace) {
        self.title = update.title.clone();
        self.description = update.description.clone();
        self.updated_at = Utc::now();
    }
}
