//! Handlers for the `/users` resource (listing, signup, login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use places_db::models::user::UserResponse;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::response::{LoginEnvelope, UserEnvelope, UsersEnvelope};
use crate::services::accounts::Signup;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Request body for `POST /users/login`. Only shape-checked; any mismatch
/// is reported as bad credentials.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/users
pub async fn list(State(state): State<AppState>) -> AppResult<Json<UsersEnvelope>> {
    let users = state.accounts.list_users().await?;
    Ok(Json(UsersEnvelope::from_users(&users)))
}

/// POST /api/users/signup
///
/// Hashes the password and returns the safe user view with 201 Created.
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<UserEnvelope>)> {
    let user = state
        .accounts
        .signup(Signup {
            name: input.name,
            email: input.email,
            password: input.password,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope {
            user: UserResponse::from(&user),
        }),
    ))
}

/// POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginEnvelope>> {
    let user = state.accounts.login(&input.email, &input.password).await?;
    Ok(Json(LoginEnvelope {
        message: "Logged in!",
        user: UserResponse::from(&user),
    }))
}
