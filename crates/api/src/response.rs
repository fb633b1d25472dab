//! Response envelopes for API handlers.
//!
//! Every successful body is a JSON object keyed by what it carries
//! (`place`, `places`, `user`, `users`, `message`). Use these types instead of
//! ad-hoc `serde_json::json!` so the wire shape is checked at compile time.

use places_db::models::place::Place;
use places_db::models::user::{User, UserResponse};
use serde::Serialize;

/// `{ "place": Place }`
#[derive(Debug, Serialize)]
pub struct PlaceEnvelope {
    pub place: Place,
}

/// `{ "places": [Place] }`
#[derive(Debug, Serialize)]
pub struct PlacesEnvelope {
    pub places: Vec<Place>,
}

/// `{ "user": User }` without password material.
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

/// `{ "users": [User] }` without password material.
#[derive(Debug, Serialize)]
pub struct UsersEnvelope {
    pub users: Vec<UserResponse>,
}

impl UsersEnvelope {
    pub fn from_users(users: &[User]) -> Self {
        Self {
            users: users.iter().map(UserResponse::from).collect(),
        }
    }
}

/// `{ "message": .., "user": User }`, returned on successful login.
#[derive(Debug, Serialize)]
pub struct LoginEnvelope {
    pub message: &'static str,
    pub user: UserResponse,
}

/// `{ "message": .. }`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
