use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use places_core::error::CoreError;
use places_core::geocoding::GeocodingError;
use places_db::StoreError;
use serde_json::json;

use crate::services::{AccountError, PlaceServiceError};

/// Generic message for anything that must not leak internals.
const INTERNAL_MESSAGE: &str = "Something went wrong, please try again later.";

/// Application-level error type for HTTP handlers.
///
/// Every failure a handler can hit converts into this type, and
/// [`IntoResponse`] turns it into a `{ "message": ... }` JSON body with the
/// matching status code.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `places_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Place(#[from] PlaceServiceError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A resource (or route) without a single id to report.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Status code and client-facing message for this error.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
                CoreError::Internal(msg) => internal(msg),
            },

            AppError::Place(err) => match err {
                PlaceServiceError::PlaceNotFound(_) => (
                    StatusCode::NOT_FOUND,
                    "Could not find a place for the provided id.".to_string(),
                ),
                PlaceServiceError::NoPlacesForUser(_) => (
                    StatusCode::NOT_FOUND,
                    "Could not find places for the provided user id.".to_string(),
                ),
                PlaceServiceError::GeocodingFailure(GeocodingError::AddressNotResolved) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Could not find a location for the specified address.".to_string(),
                ),
                PlaceServiceError::GeocodingFailure(GeocodingError::ServiceUnavailable(detail)) => {
                    tracing::error!(error = %detail, "Geocoding service unavailable");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Could not fetch coordinates, please try again.".to_string(),
                    )
                }
                PlaceServiceError::CreatorNotFound(id) => {
                    tracing::error!(creator = %id, "Place creator does not exist");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Creating place failed: could not find a user for the provided creator id."
                            .to_string(),
                    )
                }
                PlaceServiceError::InconsistentOwner { place, owner } => {
                    tracing::error!(place = %place, owner = %owner, "Place owner is missing");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Something went wrong, could not delete the place.".to_string(),
                    )
                }
                PlaceServiceError::Store(store) => classify_store_error(store),
            },

            AppError::Account(err) => match err {
                AccountError::EmailTaken => email_taken(),
                AccountError::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    "Invalid credentials, could not log you in.".to_string(),
                ),
                AccountError::Hashing(msg) => internal(msg),
                AccountError::Store(store) => classify_store_error(store),
            },

            AppError::Store(store) => classify_store_error(store),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, axum::Json(json!({ "message": message }))).into_response()
    }
}

fn email_taken() -> (StatusCode, String) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        "User exists already, please login instead.".to_string(),
    )
}

/// Log the real cause and hand the client a sanitized 500.
fn internal(detail: &str) -> (StatusCode, String) {
    tracing::error!(error = %detail, "Internal error");
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
}

/// Classify a storage error into an HTTP status and message.
///
/// - Duplicate email maps to 422.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, String) {
    match err {
        StoreError::DuplicateEmail => email_taken(),
        other => internal(&other.to_string()),
    }
}
