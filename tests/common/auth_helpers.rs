//! Authentication test helpers
//!
//! Provides utilities for creating test users through the public API and
//! logging them in.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use super::app::{TestApp, TestResponse};

pub const TEST_PASSWORD: &str = "password123";

/// A registered, logged-in user
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub access_token: String,
    pub refresh_token: String,
}

pub async fn register(app: &TestApp, email: &str, name: &str, password: &str) -> TestResponse {
    app.post_json(
        "/api/v1/users/registerUser",
        &json!({ "email": email, "name": name, "password": password }),
        None,
    )
    .await
}

pub async fn login(app: &TestApp, email: &str, password: &str) -> TestResponse {
    app.post_json(
        "/api/v1/users/loginUser",
        &json!({ "email": email, "password": password }),
        None,
    )
    .await
}

/// Register a user and log them in
pub async fn create_test_user(app: &TestApp, email: &str) -> TestUser {
    let name = email.split('@').next().unwrap_or("user").to_string();

    let registered = register(app, email, &name, TEST_PASSWORD).await;
    assert_eq!(registered.status, StatusCode::CREATED, "register failed: {:?}", registered.body);

    let logged_in = login(app, email, TEST_PASSWORD).await;
    assert_eq!(logged_in.status, StatusCode::OK, "login failed: {:?}", logged_in.body);

    let data = &logged_in.body["data"];
    TestUser {
        id: data["user"]["id"]
            .as_str()
            .and_then(|id| Uuid::parse_str(id).ok())
            .expect("login response should carry the user id"),
        email: email.to_string(),
        name,
        access_token: data["accessToken"].as_str().expect("accessToken").to_string(),
        refresh_token: data["refreshToken"].as_str().expect("refreshToken").to_string(),
    }
}
