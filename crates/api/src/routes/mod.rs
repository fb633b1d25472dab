pub mod health;
pub mod places;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /places                     create (POST)
/// /places/user/{uid}          list places created by a user (GET)
/// /places/{pid}               get, update (PATCH), delete
///
/// /users                      list (GET)
/// /users/signup               create account (POST)
/// /users/login                check credentials (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/places", places::router())
        .nest("/users", users::router())
}
