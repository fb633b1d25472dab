//! HTTP-level tests for `/api/users`: listing, signup and login.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::StatusCode;
use axum::Router;
use places_api::services::accounts::Signup;
use places_api::services::{AccountError, AccountService};
use places_db::{MemoryStore, Store};
use serde_json::json;

use common::{build_test_app, expect_status, get, post_json};

async fn signup(app: &Router, name: &str, email: &str, password: &str) -> serde_json::Value {
    let body = json!({ "name": name, "email": email, "password": password });
    expect_status(
        post_json(app, "/api/users/signup", body).await,
        StatusCode::CREATED,
    )
    .await
}

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn signup_returns_201_without_password_material() {
    let store = MemoryStore::new();
    let app = build_test_app(Arc::new(store.clone()));

    let json = signup(&app, "Ann", "Ann@Example.com", "s3cret!").await;

    let user = &json["user"];
    assert_eq!(user["name"], "Ann");
    assert_eq!(user["email"], "ann@example.com");
    assert_eq!(user["places"], json!([]));
    assert!(user["image"].is_string());
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());

    let stored = store
        .find_user_by_email("ann@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.password_hash, "s3cret!");
}

#[tokio::test]
async fn signup_with_taken_email_returns_422_and_creates_nothing() {
    let store = MemoryStore::new();
    let app = build_test_app(Arc::new(store.clone()));
    signup(&app, "Ann", "ann@example.com", "s3cret!").await;

    let body = json!({ "name": "Imposter", "email": "ANN@example.com", "password": "other-pass" });
    let json = expect_status(
        post_json(&app, "/api/users/signup", body).await,
        StatusCode::UNPROCESSABLE_ENTITY,
    )
    .await;

    assert_eq!(json["message"], "User exists already, please login instead.");
    assert_eq!(store.user_count().await, 1);
}

#[tokio::test]
async fn signup_validates_input() {
    let store = MemoryStore::new();
    let app = build_test_app(Arc::new(store.clone()));

    let body = json!({ "name": "", "email": "not-an-email", "password": "123" });
    let json = expect_status(
        post_json(&app, "/api/users/signup", body).await,
        StatusCode::UNPROCESSABLE_ENTITY,
    )
    .await;

    assert_eq!(
        json["message"],
        "Invalid inputs passed, please check your data (invalid: email, name, password)."
    );
    assert_eq!(store.user_count().await, 0);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_with_correct_credentials() {
    let app = build_test_app(Arc::new(MemoryStore::new()));
    let created = signup(&app, "Ann", "ann@example.com", "s3cret!").await;

    let body = json!({ "email": "ANN@example.com", "password": "s3cret!" });
    let json = expect_status(
        post_json(&app, "/api/users/login", body).await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(json["message"], "Logged in!");
    assert_eq!(json["user"]["id"], created["user"]["id"]);
    assert!(json["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = build_test_app(Arc::new(MemoryStore::new()));
    signup(&app, "Ann", "ann@example.com", "s3cret!").await;

    let wrong_password = expect_status(
        post_json(
            &app,
            "/api/users/login",
            json!({ "email": "ann@example.com", "password": "guess" }),
        )
        .await,
        StatusCode::UNAUTHORIZED,
    )
    .await;
    let unknown_email = expect_status(
        post_json(
            &app,
            "/api/users/login",
            json!({ "email": "nobody@example.com", "password": "s3cret!" }),
        )
        .await,
        StatusCode::UNAUTHORIZED,
    )
    .await;

    assert_eq!(wrong_password, unknown_email);
}

/// Fastest of a few login attempts, so scheduler noise cannot inflate it.
async fn fastest_login(accounts: &AccountService, email: &str, password: &str) -> Duration {
    let mut fastest = Duration::MAX;
    for _ in 0..3 {
        let started = Instant::now();
        let result = accounts.login(email, password).await;
        fastest = fastest.min(started.elapsed());
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }
    fastest
}

#[tokio::test]
async fn unknown_email_login_pays_for_a_password_check() {
    let accounts = AccountService::new(
        Arc::new(MemoryStore::new()),
        "https://picsum.photos/200".to_string(),
    );
    accounts
        .signup(Signup {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            password: "s3cret!".into(),
        })
        .await
        .unwrap();

    let wrong_password = fastest_login(&accounts, "ann@example.com", "guess").await;
    let unknown_email = fastest_login(&accounts, "nobody@example.com", "guess").await;

    assert!(
        unknown_email * 4 >= wrong_password,
        "unknown email took {unknown_email:?}, wrong password took {wrong_password:?}"
    );
}

#[tokio::test]
async fn login_with_missing_fields_returns_422() {
    let app = build_test_app(Arc::new(MemoryStore::new()));

    let response = post_json(&app, "/api/users/login", json!({ "email": "ann@example.com" })).await;

    expect_status(response, StatusCode::UNPROCESSABLE_ENTITY).await;
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_users_returns_all_without_passwords() {
    let app = build_test_app(Arc::new(MemoryStore::new()));

    let empty = expect_status(get(&app, "/api/users").await, StatusCode::OK).await;
    assert_eq!(empty, json!({ "users": [] }));

    signup(&app, "Ann", "ann@example.com", "s3cret!").await;
    signup(&app, "Bob", "bob@example.com", "hunter22").await;

    let json = expect_status(get(&app, "/api/users").await, StatusCode::OK).await;
    let users = json["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["name"], "Ann");
    assert_eq!(users[1]["name"], "Bob");
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
}
