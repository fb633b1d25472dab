//! Repository for the `users` table.

use places_core::types::DbId;
use sqlx::postgres::PgExecutor;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, image, place_ids, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user row.
    pub async fn insert<'e, E: PgExecutor<'e>>(executor: E, user: &User) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO users
                (id, name, email, password_hash, image, place_ids, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.image)
        .bind(user.places())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Find a user by internal ID.
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a user by ID and lock the row until the enclosing transaction ends.
    pub async fn find_by_id_for_update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a user by normalized email.
    pub async fn find_by_email<'e, E: PgExecutor<'e>>(
        executor: E,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(executor)
            .await
    }

    /// List all users, oldest first.
    pub async fn list<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at ASC, id ASC");
        sqlx::query_as::<_, User>(&query).fetch_all(executor).await
    }

    /// Overwrite the mutable columns of an existing user.
    ///
    /// Returns `true` if the row existed.
    pub async fn save<'e, E: PgExecutor<'e>>(executor: E, user: &User) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET
                name = $2,
                email = $3,
                password_hash = $4,
                image = $5,
                place_ids = $6,
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.image)
        .bind(user.places())
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
