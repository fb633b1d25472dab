//! Place lifecycle and the place/owner consistency rule.
//!
//! A place exists exactly when its id is in its creator's place set. Create
//! and delete touch both records and therefore run inside one storage
//! transaction; on any failure after `begin` the transaction is aborted and
//! neither record changes. Edits touch only the place record.
//!
//! This service is the only writer of `User` place sets.

use std::sync::Arc;

use places_core::geocoding::{Geocoder, GeocodingError};
use places_core::normalize::non_blank;
use places_core::types::DbId;
use places_db::models::place::{NewPlace, Place, UpdatePlace};
use places_db::{Store, StoreError, StoreTx};
use tracing::instrument;

/// Errors from place operations.
#[derive(Debug, thiserror::Error)]
pub enum PlaceServiceError {
    /// The address could not be turned into coordinates.
    #[error("Geocoding failed: {0}")]
    GeocodingFailure(#[from] GeocodingError),

    /// The `creator` of a new place does not exist.
    #[error("Creator {0} not found")]
    CreatorNotFound(DbId),

    #[error("Place {0} not found")]
    PlaceNotFound(DbId),

    /// The user has no places.
    #[error("No places found for user {0}")]
    NoPlacesForUser(DbId),

    /// A place references an owner record that does not exist.
    #[error("Owner {owner} of place {place} is missing")]
    InconsistentOwner { place: DbId, owner: DbId },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Input for [`PlaceService::create_place`].
#[derive(Debug, Clone)]
pub struct CreatePlace {
    pub title: String,
    pub description: String,
    pub address: String,
    pub creator: DbId,
}

/// Creates, reads, edits and deletes places.
pub struct PlaceService {
    store: Arc<dyn Store>,
    geocoder: Arc<dyn Geocoder>,
    place_image_url: String,
}

impl PlaceService {
    pub fn new(store: Arc<dyn Store>, geocoder: Arc<dyn Geocoder>, place_image_url: String) -> Self {
        Self {
            store,
            geocoder,
            place_image_url,
        }
    }

    pub async fn get_place(&self, id: DbId) -> Result<Place, PlaceServiceError> {
        self.store
            .find_place(id)
            .await?
            .ok_or(PlaceServiceError::PlaceNotFound(id))
    }

    /// All places created by `user_id`. An empty result is an error.
    pub async fn list_places_for_user(&self, user_id: DbId) -> Result<Vec<Place>, PlaceServiceError> {
        let places = self.store.list_places_by_creator(user_id).await?;
        if places.is_empty() {
            return Err(PlaceServiceError::NoPlacesForUser(user_id));
        }
        Ok(places)
    }

    /// Geocode the address, then insert the place and attach it to its
    /// creator in one transaction.
    ///
    /// There is no idempotency key: calling this twice with the same input
    /// creates two places.
    #[instrument(skip(self, input), fields(creator = %input.creator))]
    pub async fn create_place(&self, input: CreatePlace) -> Result<Place, PlaceServiceError> {
        let address = non_blank(&input.address).ok_or(GeocodingError::AddressNotResolved)?;
        let location = self.geocoder.locate(address).await?;

        let place = Place::new(NewPlace {
            title: input.title,
            description: input.description,
            address: input.address,
            location,
            image: self.place_image_url.clone(),
            creator: input.creator,
        });

        let mut tx = self.store.begin().await?;
        if let Err(err) = attach_new_place(tx.as_mut(), &place).await {
            abort(tx).await;
            return Err(err);
        }
        tx.commit().await?;

        tracing::info!(place_id = %place.id, "place created");
        Ok(place)
    }

    /// Edit title and description. Single-record write, no transaction.
    #[instrument(skip(self, input))]
    pub async fn update_place(
        &self,
        id: DbId,
        input: &UpdatePlace,
    ) -> Result<Place, PlaceServiceError> {
        let place = self
            .store
            .update_place(id, input)
            .await?
            .ok_or(PlaceServiceError::PlaceNotFound(id))?;
        tracing::info!(place_id = %id, "place updated");
        Ok(place)
    }

    /// Remove the place and detach it from its creator in one transaction.
    #[instrument(skip(self))]
    pub async fn delete_place(&self, id: DbId) -> Result<(), PlaceServiceError> {
        let place = self
            .store
            .find_place(id)
            .await?
            .ok_or(PlaceServiceError::PlaceNotFound(id))?;

        let mut tx = self.store.begin().await?;
        if let Err(err) = detach_place(tx.as_mut(), &place).await {
            abort(tx).await;
            return Err(err);
        }
        tx.commit().await?;

        tracing::info!(place_id = %id, owner = %place.creator, "place deleted");
        Ok(())
    }
}

async fn attach_new_place(tx: &mut dyn StoreTx, place: &Place) -> Result<(), PlaceServiceError> {
    tx.insert_place(place).await?;

    let mut owner = tx
        .find_user(place.creator)
        .await?
        .ok_or(PlaceServiceError::CreatorNotFound(place.creator))?;
    owner.attach_place(place.id);
    tx.save_user(&owner).await?;
    Ok(())
}

async fn detach_place(tx: &mut dyn StoreTx, place: &Place) -> Result<(), PlaceServiceError> {
    // Another request may have deleted it since the lookup.
    if !tx.delete_place(place.id).await? {
        return Err(PlaceServiceError::PlaceNotFound(place.id));
    }

    let mut owner = tx.find_user(place.creator).await?.ok_or(
        PlaceServiceError::InconsistentOwner {
            place: place.id,
            owner: place.creator,
        },
    )?;
    if !owner.detach_place(place.id) {
        tracing::warn!(
            place_id = %place.id,
            owner = %owner.id,
            "deleted place was missing from its owner's place set"
        );
    }
    tx.save_user(&owner).await?;
    Ok(())
}

/// Roll back after a failed step. The failing step's error is what the caller
/// sees; a failed rollback is only logged.
async fn abort(tx: Box<dyn StoreTx>) {
    if let Err(err) = tx.abort().await {
        tracing::warn!(error = %err, "transaction rollback failed");
    }
}
