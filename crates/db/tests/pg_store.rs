//! PostgreSQL store tests.
//!
//! These need a live database and are skipped unless `DATABASE_URL` is set.
//! Every test uses fresh ids and emails so runs do not interfere.

use assert_matches::assert_matches;
use places_core::geo::Coordinates;
use places_core::types::new_id;
use places_db::models::place::{NewPlace, Place, UpdatePlace};
use places_db::models::user::User;
use places_db::{PgStore, Store, StoreError};

/// Connect and migrate, or `None` when no database is configured.
async fn setup() -> Option<PgStore> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = places_db::create_pool(&url, 5)
        .await
        .expect("connect to DATABASE_URL");
    places_db::run_migrations(&pool)
        .await
        .expect("apply migrations");
    Some(PgStore::new(pool))
}

fn new_user() -> User {
    User::new(
        "Pg User".to_string(),
        format!("pg-{}@example.com", new_id()),
        "$argon2id$stub".to_string(),
        "https://picsum.photos/200".to_string(),
    )
}

fn new_place(creator: &User) -> Place {
    Place::new(NewPlace {
        title: "Cafe".to_string(),
        description: "A lovely spot".to_string(),
        address: "1 Main St, Springfield".to_string(),
        location: Coordinates::new(39.1, -89.6),
        image: "https://picsum.photos/id/237/200/300".to_string(),
        creator: creator.id,
    })
}

#[tokio::test]
async fn create_place_transaction_commits_both_records() {
    let Some(store) = setup().await else { return };
    let user = new_user();
    store.create_user(&user).await.unwrap();

    let place = new_place(&user);
    let mut tx = store.begin().await.unwrap();
    tx.insert_place(&place).await.unwrap();
    let mut owner = tx.find_user(user.id).await.unwrap().unwrap();
    owner.attach_place(place.id);
    tx.save_user(&owner).await.unwrap();
    tx.commit().await.unwrap();

    let stored = store.find_place(place.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Cafe");
    assert_eq!(stored.location, Coordinates::new(39.1, -89.6));
    assert_eq!(stored.creator, user.id);
    let owner = store.find_user(user.id).await.unwrap().unwrap();
    assert_eq!(owner.places(), &[place.id]);
}

#[tokio::test]
async fn rollback_discards_place_insert() {
    let Some(store) = setup().await else { return };
    let user = new_user();
    store.create_user(&user).await.unwrap();

    let place = new_place(&user);
    let mut tx = store.begin().await.unwrap();
    tx.insert_place(&place).await.unwrap();
    tx.abort().await.unwrap();

    assert!(store.find_place(place.id).await.unwrap().is_none());
}

#[tokio::test]
async fn place_with_unknown_creator_fails_at_commit() {
    let Some(store) = setup().await else { return };
    let orphan = new_user();

    let mut tx = store.begin().await.unwrap();
    tx.insert_place(&new_place(&orphan)).await.unwrap();
    assert!(tx.find_user(orphan.id).await.unwrap().is_none());
    assert_matches!(tx.commit().await, Err(StoreError::Database(_)));
}

#[tokio::test]
async fn duplicate_email_maps_to_store_error() {
    let Some(store) = setup().await else { return };
    let user = new_user();
    store.create_user(&user).await.unwrap();

    let mut twin = new_user();
    twin.email = user.email.clone();
    assert_matches!(
        store.create_user(&twin).await,
        Err(StoreError::DuplicateEmail)
    );
}

#[tokio::test]
async fn update_and_list_by_creator() {
    let Some(store) = setup().await else { return };
    let user = new_user();
    store.create_user(&user).await.unwrap();
    let place = new_place(&user);
    let mut tx = store.begin().await.unwrap();
    tx.insert_place(&place).await.unwrap();
    tx.commit().await.unwrap();

    let updated = store
        .update_place(
            place.id,
            &UpdatePlace {
                title: "Bistro".to_string(),
                description: "Even nicer now".to_string(),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Bistro");

    let listed = store.list_places_by_creator(user.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, place.id);

    assert!(store
        .update_place(new_id(), &UpdatePlace {
            title: "x".to_string(),
            description: "xxxxx".to_string(),
        })
        .await
        .unwrap()
        .is_none());
}
