//! Account listing, signup and login.

use std::sync::Arc;

use places_core::normalize::normalize_email;
use places_db::models::user::User;
use places_db::{Store, StoreError};
use tracing::instrument;

use crate::auth::password::{hash_password, verify_password, verify_without_account};

/// Errors from account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Email is already registered")]
    EmailTaken,

    /// Unknown email or wrong password. Deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AccountError::EmailTaken,
            other => AccountError::Store(other),
        }
    }
}

/// Input for [`AccountService::signup`].
#[derive(Debug, Clone)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Manages user accounts.
pub struct AccountService {
    store: Arc<dyn Store>,
    user_image_url: String,
}

impl AccountService {
    pub fn new(store: Arc<dyn Store>, user_image_url: String) -> Self {
        Self {
            store,
            user_image_url,
        }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AccountError> {
        Ok(self.store.list_users().await?)
    }

    /// Register a new user with a hashed password and an empty place set.
    #[instrument(skip(self, input))]
    pub async fn signup(&self, input: Signup) -> Result<User, AccountError> {
        let email = normalize_email(&input.email);
        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(AccountError::EmailTaken);
        }

        let password_hash =
            hash_password(&input.password).map_err(|e| AccountError::Hashing(e.to_string()))?;
        let user = User::new(input.name, email, password_hash, self.user_image_url.clone());

        // The unique constraint still catches a concurrent signup that slipped
        // past the lookup above.
        self.store.create_user(&user).await?;

        tracing::info!(user_id = %user.id, "user signed up");
        Ok(user)
    }

    /// Check credentials and return the matching user.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AccountError> {
        let email = normalize_email(email);
        let Some(user) = self.store.find_user_by_email(&email).await? else {
            verify_without_account(password);
            return Err(AccountError::InvalidCredentials);
        };

        let matches = verify_password(password, &user.password_hash)
            .map_err(|e| AccountError::Hashing(e.to_string()))?;
        if !matches {
            return Err(AccountError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "user logged in");
        Ok(user)
    }
}
