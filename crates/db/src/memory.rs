//! In-process implementation of the storage capabilities.
//!
//! All data lives in two hash maps behind one async mutex. A transaction
//! holds the mutex for its whole lifetime and works on a private copy of the
//! maps; commit swaps the copy in, abort (or drop) throws it away. This makes
//! transactions fully serialized.
//!
//! A task holding an open [`MemoryTx`] must not call back into the same
//! [`MemoryStore`] handle, or it will wait on itself.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use places_core::types::DbId;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::models::place::{Place, UpdatePlace};
use crate::models::user::User;
use crate::store::{Store, StoreError, StoreTx};

#[derive(Debug, Default, Clone)]
struct Collections {
    places: HashMap<DbId, Place>,
    users: HashMap<DbId, User>,
}

impl Collections {
    fn email_taken(&self, email: &str, except: Option<DbId>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

/// [`Store`] held entirely in memory. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<Mutex<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored places (test and diagnostics helper).
    pub async fn place_count(&self) -> usize {
        self.data.lock().await.places.len()
    }

    /// Number of stored users (test and diagnostics helper).
    pub async fn user_count(&self) -> usize {
        self.data.lock().await.users.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, StoreError> {
        let guard = Arc::clone(&self.data).lock_owned().await;
        let working = (*guard).clone();
        Ok(Box::new(MemoryTx { guard, working }))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_place(&self, id: DbId) -> Result<Option<Place>, StoreError> {
        Ok(self.data.lock().await.places.get(&id).cloned())
    }

    async fn list_places_by_creator(&self, creator: DbId) -> Result<Vec<Place>, StoreError> {
        let data = self.data.lock().await;
        let mut places: Vec<Place> = data
            .places
            .values()
            .filter(|p| p.creator == creator)
            .cloned()
            .collect();
        places.sort_by_key(|p| (p.created_at, p.id));
        Ok(places)
    }

    async fn update_place(
        &self,
        id: DbId,
        input: &UpdatePlace,
    ) -> Result<Option<Place>, StoreError> {
        let mut data = self.data.lock().await;
        Ok(data.places.get_mut(&id).map(|place| {
            place.apply(input);
            place.clone()
        }))
    }

    async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(self.data.lock().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let data = self.data.lock().await;
        Ok(data.users.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let data = self.data.lock().await;
        let mut users: Vec<User> = data.users.values().cloned().collect();
        users.sort_by_key(|u| (u.created_at, u.id));
        Ok(users)
    }

    async fn create_user(&self, user: &User) -> Result<(), StoreError> {
        let mut data = self.data.lock().await;
        if data.email_taken(&user.email, None) {
            return Err(StoreError::DuplicateEmail);
        }
        if data.users.contains_key(&user.id) {
            return Err(StoreError::Backend(format!("duplicate user id {}", user.id)));
        }
        data.users.insert(user.id, user.clone());
        Ok(())
    }
}

/// An open in-memory transaction.
pub struct MemoryTx {
    guard: OwnedMutexGuard<Collections>,
    working: Collections,
}

#[async_trait]
impl StoreTx for MemoryTx {
    async fn insert_place(&mut self, place: &Place) -> Result<(), StoreError> {
        if self.working.places.contains_key(&place.id) {
            return Err(StoreError::Backend(format!(
                "duplicate place id {}",
                place.id
            )));
        }
        self.working.places.insert(place.id, place.clone());
        Ok(())
    }

    async fn delete_place(&mut self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.working.places.remove(&id).is_some())
    }

    async fn find_user(&mut self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(self.working.users.get(&id).cloned())
    }

    async fn save_user(&mut self, user: &User) -> Result<(), StoreError> {
        if self.working.email_taken(&user.email, Some(user.id)) {
            return Err(StoreError::DuplicateEmail);
        }
        match self.working.users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                stored.updated_at = Utc::now();
                Ok(())
            }
            None => Err(StoreError::Backend(format!("user {} does not exist", user.id))),
        }
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let MemoryTx { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }

    async fn abort(self: Box<Self>) -> Result<(), StoreError> {
        Ok(())
    }
}
