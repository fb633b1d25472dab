//! PostgreSQL implementation of the storage capabilities.

use async_trait::async_trait;
use places_core::types::DbId;
use sqlx::{Postgres, Transaction};

use crate::models::place::{Place, UpdatePlace};
use crate::models::user::User;
use crate::repositories::{PlaceRepo, UserRepo};
use crate::store::{Store, StoreError, StoreTx};
use crate::DbPool;

/// Name of the unique constraint guarding `users.email`.
const EMAIL_CONSTRAINT: &str = "uq_users_email";

/// [`Store`] backed by a sqlx connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Translate a unique violation on the email constraint into
/// [`StoreError::DuplicateEmail`]; pass everything else through.
fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        // PostgreSQL unique constraint violation: error code 23505
        if db_err.code().as_deref() == Some("23505")
            && db_err.constraint() == Some(EMAIL_CONSTRAINT)
        {
            return StoreError::DuplicateEmail;
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl Store for PgStore {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgTx { tx }))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn find_place(&self, id: DbId) -> Result<Option<Place>, StoreError> {
        Ok(PlaceRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_places_by_creator(&self, creator: DbId) -> Result<Vec<Place>, StoreError> {
        Ok(PlaceRepo::list_by_creator(&self.pool, creator).await?)
    }

    async fn update_place(
        &self,
        id: DbId,
        input: &UpdatePlace,
    ) -> Result<Option<Place>, StoreError> {
        Ok(PlaceRepo::update(&self.pool, id, input).await?)
    }

    async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(UserRepo::list(&self.pool).await?)
    }

    async fn create_user(&self, user: &User) -> Result<(), StoreError> {
        UserRepo::insert(&self.pool, user).await.map_err(classify)
    }
}

/// An open PostgreSQL transaction. sqlx rolls it back if dropped.
struct PgTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTx for PgTx {
    async fn insert_place(&mut self, place: &Place) -> Result<(), StoreError> {
        Ok(PlaceRepo::insert(&mut *self.tx, place).await?)
    }

    async fn delete_place(&mut self, id: DbId) -> Result<bool, StoreError> {
        Ok(PlaceRepo::delete(&mut *self.tx, id).await?)
    }

    async fn find_user(&mut self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_id_for_update(&mut *self.tx, id).await?)
    }

    async fn save_user(&mut self, user: &User) -> Result<(), StoreError> {
        let saved = UserRepo::save(&mut *self.tx, user).await.map_err(classify)?;
        if !saved {
            return Err(StoreError::Database(sqlx::Error::RowNotFound));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await.map_err(classify)
    }

    async fn abort(self: Box<Self>) -> Result<(), StoreError> {
        Ok(self.tx.rollback().await?)
    }
}
