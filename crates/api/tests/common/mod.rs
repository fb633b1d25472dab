//! Shared helpers for API integration tests.
//!
//! Tests run the real router and services against [`MemoryStore`] and a
//! [`FixedGeocoder`], optionally wrapped in [`FaultyStore`] to inject storage
//! failures in the middle of a transaction.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use places_core::geo::Coordinates;
use places_core::types::DbId;
use places_db::models::place::{Place, UpdatePlace};
use places_db::models::user::User;
use places_db::{MemoryStore, Store, StoreError, StoreTx};
use places_geocoding::FixedGeocoder;
use tower::ServiceExt;

use places_api::config::ServerConfig;
use places_api::router::build_app_router;
use places_api::state::AppState;

pub const CAFE_ADDRESS: &str = "1 Main St, Springfield";
pub const CAFE_LOCATION: Coordinates = Coordinates {
    lat: 39.1,
    lng: -89.6,
};
pub const PARK_ADDRESS: &str = "2 Elm St, Springfield";
pub const PARK_LOCATION: Coordinates = Coordinates {
    lat: 39.2,
    lng: -89.7,
};

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Default configuration, as if no environment variables were set.
pub fn test_config() -> ServerConfig {
    ServerConfig::from_lookup(|_| None).expect("defaults are valid")
}

/// Geocoder that knows the two test addresses.
pub fn test_geocoder() -> FixedGeocoder {
    FixedGeocoder::new()
        .with(CAFE_ADDRESS, CAFE_LOCATION)
        .with(PARK_ADDRESS, PARK_LOCATION)
}

pub fn test_state(store: Arc<dyn Store>) -> AppState {
    AppState::new(store, Arc::new(test_geocoder()), test_config())
}

/// Build the full application router over the given store.
pub fn build_test_app(store: Arc<dyn Store>) -> Router {
    build_app_router(test_state(store))
}

/// Insert a user directly, bypassing password hashing.
pub async fn seed_user(store: &dyn Store, email: &str) -> User {
    let user = User::new(
        "Seeded User".to_string(),
        email.to_string(),
        "$argon2id$not-a-real-hash".to_string(),
        "https://picsum.photos/200".to_string(),
    );
    store.create_user(&user).await.expect("seed user");
    user
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request("POST", uri, body)).await
}

pub async fn patch_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request("PATCH", uri, body)).await
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read the full response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

/// Assert the status and return the body.
pub async fn expect_status(response: Response, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Fault injection
// ---------------------------------------------------------------------------

/// Where a [`FaultyStore`] transaction fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    SaveUser,
    Commit,
    /// Reads inside the transaction find no user.
    OwnerMissing,
}

/// [`MemoryStore`] wrapper whose transactions fail at a chosen step.
#[derive(Clone)]
pub struct FaultyStore {
    pub inner: MemoryStore,
    fail_at: FailPoint,
}

impl FaultyStore {
    pub fn new(inner: MemoryStore, fail_at: FailPoint) -> Self {
        Self { inner, fail_at }
    }
}

fn injected() -> StoreError {
    StoreError::Backend("injected failure".to_string())
}

#[async_trait]
impl Store for FaultyStore {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, StoreError> {
        let inner = self.inner.begin().await?;
        Ok(Box::new(FaultyTx {
            inner,
            fail_at: self.fail_at,
        }))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.inner.health_check().await
    }

    async fn find_place(&self, id: DbId) -> Result<Option<Place>, StoreError> {
        self.inner.find_place(id).await
    }

    async fn list_places_by_creator(&self, creator: DbId) -> Result<Vec<Place>, StoreError> {
        self.inner.list_places_by_creator(creator).await
    }

    async fn update_place(
        &self,
        id: DbId,
        input: &UpdatePlace,
    ) -> Result<Option<Place>, StoreError> {
        self.inner.update_place(id, input).await
    }

    async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        self.inner.find_user(id).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.inner.find_user_by_email(email).await
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.inner.list_users().await
    }

    async fn create_user(&self, user: &User) -> Result<(), StoreError> {
        self.inner.create_user(user).await
    }
}

struct FaultyTx {
    inner: Box<dyn StoreTx>,
    fail_at: FailPoint,
}

#[async_trait]
impl StoreTx for FaultyTx {
    async fn insert_place(&mut self, place: &Place) -> Result<(), StoreError> {
        self.inner.insert_place(place).await
    }

    async fn delete_place(&mut self, id: DbId) -> Result<bool, StoreError> {
        self.inner.delete_place(id).await
    }

    async fn find_user(&mut self, id: DbId) -> Result<Option<User>, StoreError> {
        if self.fail_at == FailPoint::OwnerMissing {
            return Ok(None);
        }
        self.inner.find_user(id).await
    }

    async fn save_user(&mut self, user: &User) -> Result<(), StoreError> {
        if self.fail_at == FailPoint::SaveUser {
            return Err(injected());
        }
        self.inner.save_user(user).await
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        if self.fail_at == FailPoint::Commit {
            self.inner.abort().await?;
            return Err(injected());
        }
        self.inner.commit().await
    }

    async fn abort(self: Box<Self>) -> Result<(), StoreError> {
        self.inner.abort().await
    }
}
