//! Handlers for the `/places` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use places_core::types::DbId;
use places_db::models::place::UpdatePlace;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::{path_id, ValidatedJson};
use crate::response::{MessageResponse, PlaceEnvelope, PlacesEnvelope};
use crate::services::places::CreatePlace;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /places`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlaceRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub address: String,
    pub creator: DbId,
}

/// Request body for `PATCH /places/{pid}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePlaceRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/places/{pid}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(pid): Path<String>,
) -> AppResult<Json<PlaceEnvelope>> {
    let id = path_id(&pid, "a place")?;
    let place = state.places.get_place(id).await?;
    Ok(Json(PlaceEnvelope { place }))
}

/// GET /api/places/user/{uid}
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> AppResult<Json<PlacesEnvelope>> {
    let user_id = path_id(&uid, "places")?;
    let places = state.places.list_places_for_user(user_id).await?;
    Ok(Json(PlacesEnvelope { places }))
}

/// POST /api/places
///
/// Geocodes the address and creates the place together with the owner's
/// back-reference. Returns 201 Created.
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreatePlaceRequest>,
) -> AppResult<(StatusCode, Json<PlaceEnvelope>)> {
    let place = state
        .places
        .create_place(CreatePlace {
            title: input.title,
            description: input.description,
            address: input.address,
            creator: input.creator,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(PlaceEnvelope { place })))
}

/// PATCH /api/places/{pid}
pub async fn update(
    State(state): State<AppState>,
    Path(pid): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdatePlaceRequest>,
) -> AppResult<Json<PlaceEnvelope>> {
    let id = path_id(&pid, "a place")?;
    let update = UpdatePlace {
        title: input.title,
        description: input.description,
    };
    let place = state.places.update_place(id, &update).await?;
    Ok(Json(PlaceEnvelope { place }))
}

/// DELETE /api/places/{pid}
pub async fn delete(
    State(state): State<AppState>,
    Path(pid): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = path_id(&pid, "a place")?;
    state.places.delete_place(id).await?;
    Ok(Json(MessageResponse {
        message: "Deleted place successfully.",
    }))
}
