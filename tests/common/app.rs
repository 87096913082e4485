//! Test application
//!
//! Builds the full router over a fresh `MemoryStore` and a local media
//! store rooted in a temporary directory, then sends requests through it
//! without opening a socket.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use backendhub::backend::media::MediaStore;
use backendhub::backend::server::config::{ServerConfig, ServerConfigBuilder};
use backendhub::backend::server::{create_app, AppState};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_BASE_URL: &str = "http://localhost:3000";

/// A running (in-process) application
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    /// Keeps the upload directory alive for the test's duration
    pub upload_dir: TempDir,
}

/// A fully buffered response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub bytes: Vec<u8>,
    /// JSON body, or `Value::Null` if the body is not JSON
    pub body: Value,
}

impl TestResponse {
    async fn read(response: axum::response::Response) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body")
            .to_vec();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Self {
            status,
            headers,
            bytes,
            body,
        }
    }

    /// All `Set-Cookie` header values
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }

    /// The `Set-Cookie` header for one cookie name
    pub fn set_cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{}=", name);
        self.set_cookies().into_iter().find(|c| c.starts_with(&prefix))
    }

    /// The value assigned to a cookie by this response
    pub fn cookie_value(&self, name: &str) -> Option<String> {
        let cookie = self.set_cookie(name)?;
        let pair = cookie.split(';').next()?;
        pair.split_once('=').map(|(_, value)| value.to_string())
    }
}

fn test_config(upload_dir: &TempDir) -> ServerConfigBuilder {
    ServerConfig::builder()
        .token_secrets("test-access-secret", "test-refresh-secret")
        .bcrypt_cost(4)
        .cookie_secure(false)
        .upload_dir(upload_dir.path())
        .public_base_url(TEST_BASE_URL)
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(|builder| builder)
    }

    /// Build with a customised configuration
    pub fn with_config(customize: impl FnOnce(ServerConfigBuilder) -> ServerConfigBuilder) -> Self {
        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
        let config = customize(test_config(&upload_dir))
            .build()
            .expect("Test config should be valid");
        let state = AppState::in_memory(config).expect("Failed to build state");
        Self::from_state(state, upload_dir)
    }

    /// Build with a specific media store
    pub fn with_media(media: Arc<dyn MediaStore>) -> Self {
        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
        let config = test_config(&upload_dir)
            .build()
            .expect("Test config should be valid");
        let state =
            AppState::in_memory_with_media(config, media).expect("Failed to build state");
        Self::from_state(state, upload_dir)
    }

    fn from_state(state: AppState, upload_dir: TempDir) -> Self {
        Self {
            router: create_app(state.clone()),
            state,
            upload_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router should not fail");
        TestResponse::read(response).await
    }

    fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match token {
            Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        let request = Self::builder(Method::GET, uri, token)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        let request = Self::builder(Method::DELETE, uri, token)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    pub async fn json(&self, method: Method, uri: &str, body: &Value, token: Option<&str>) -> TestResponse {
        let request = Self::builder(method, uri, token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value, token: Option<&str>) -> TestResponse {
        self.json(Method::POST, uri, body, token).await
    }

    pub async fn patch_json(&self, uri: &str, body: &Value, token: Option<&str>) -> TestResponse {
        self.json(Method::PATCH, uri, body, token).await
    }

    /// GET with the access token sent as a cookie instead of a header
    pub async fn get_with_cookie(&self, uri: &str, cookie: &str) -> TestResponse {
        let request = Request::builder()
            .uri(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }
}
