//! Repository for the `places` table.

use places_core::geo::Coordinates;
use places_core::types::{DbId, Timestamp};
use sqlx::postgres::PgExecutor;
use sqlx::FromRow;

use crate::models::place::{Place, UpdatePlace};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, description, address, lat, lng, image, creator_id, created_at, updated_at";

/// Flat row shape; coordinates are stored as two columns.
#[derive(Debug, FromRow)]
struct PlaceRow {
    id: DbId,
    title: String,
    description: String,
    address: String,
    lat: f64,
    lng: f64,
    image: String,
    creator_id: DbId,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl From<PlaceRow> for Place {
    fn from(row: PlaceRow) -> Self {
        Place {
            id: row.id,
            title: row.title,
            description: row.description,
            address: row.address,
            location: Coordinates::new(row.lat, row.lng),
            image: row.image,
            creator: row.creator_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Provides CRUD operations for places.
pub struct PlaceRepo;

impl PlaceRepo {
    /// Insert a fully-built place.
    pub async fn insert<'e, E: PgExecutor<'e>>(
        executor: E,
        place: &Place,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO places
                (id, title, description, address, lat, lng, image, creator_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(place.id)
        .bind(&place.title)
        .bind(&place.description)
        .bind(&place.address)
        .bind(place.location.lat)
        .bind(place.location.lng)
        .bind(&place.image)
        .bind(place.creator)
        .bind(place.created_at)
        .bind(place.updated_at)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Find a place by id.
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Place>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM places WHERE id = $1");
        let row = sqlx::query_as::<_, PlaceRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(row.map(Place::from))
    }

    /// List the places created by a user, oldest first.
    pub async fn list_by_creator<'e, E: PgExecutor<'e>>(
        executor: E,
        creator: DbId,
    ) -> Result<Vec<Place>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM places WHERE creator_id = $1 ORDER BY created_at ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, PlaceRow>(&query)
            .bind(creator)
            .fetch_all(executor)
            .await?;
        Ok(rows.into_iter().map(Place::from).collect())
    }

    /// Update title and description.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        input: &UpdatePlace,
    ) -> Result<Option<Place>, sqlx::Error> {
        let query = format!(
            "UPDATE places SET title = $2, description = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PlaceRow>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_optional(executor)
            .await?;
        Ok(row.map(Place::from))
    }

    /// Permanently delete a place by ID. Returns `true` if a row was removed.
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM places WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
