use std::sync::Arc;

use places_core::geocoding::Geocoder;
use places_db::Store;

use crate::config::ServerConfig;
use crate::services::{AccountService, PlaceService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). The storage handle
/// is built once at startup and passed in; nothing reaches for a global.
#[derive(Clone)]
pub struct AppState {
    /// Storage engine, used directly only for health checks.
    pub store: Arc<dyn Store>,
    pub config: Arc<ServerConfig>,
    pub places: Arc<PlaceService>,
    pub accounts: Arc<AccountService>,
}

impl AppState {
    /// Wire the services onto a store and geocoder.
    pub fn new(store: Arc<dyn Store>, geocoder: Arc<dyn Geocoder>, config: ServerConfig) -> Self {
        let places = PlaceService::new(
            Arc::clone(&store),
            geocoder,
            config.place_image_url.clone(),
        );
        let accounts = AccountService::new(Arc::clone(&store), config.user_image_url.clone());
        Self {
            store,
            config: Arc::new(config),
            places: Arc::new(places),
            accounts: Arc::new(accounts),
        }
    }
}
