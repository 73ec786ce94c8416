//! Testing utilities for boxoffice
//!
//! This module provides a scripted [`MockTransport`] standing in for the
//! HTTP API, and a `TestStore` wrapper for temporary session storage.
//!
//! Only available when compiled with `cfg(test)`.

use crate::api::{ApiError, ApiRequest, ApiResponse, Transport};
use crate::auth::SessionStore;
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;
use tempfile::TempDir;

/// Transport that replays scripted responses in order and records requests
///
/// # Examples
/// ```ignore
/// let transport = MockTransport::new();
/// transport.push_json(200, json!([]));
/// let client = ApiClient::new(transport, "http://localhost");
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, response: Result<ApiResponse, ApiError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Queue a response with a raw text body
    pub fn push_text(&self, status: u16, body: &str) {
        let status_text = StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or_default()
            .to_string();
        self.push(Ok(ApiResponse {
            status,
            status_text,
            body: body.to_string(),
        }));
    }

    /// Queue a JSON response
    pub fn push_json(&self, status: u16, body: Value) {
        self.push_text(status, &body.to_string());
    }

    /// Queue a response without content
    pub fn push_empty(&self, status: u16) {
        self.push_text(status, "");
    }

    /// Queue a network failure
    pub fn push_error(&self, message: &str) {
        self.push(Err(ApiError::Transport(message.to_string())));
    }

    /// Every request sent so far
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send {
        self.requests.lock().unwrap().push(request);
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_string())));
        async move { response }
    }
}

/// Session store in a temporary directory, removed on drop
pub struct TestStore {
    _dir: TempDir,
    store: SessionStore,
}

impl TestStore {
    /// # Panics
    /// Panics if the temporary store cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = SessionStore::open(dir.path().join("session")).expect("Failed to open test store");
        Self { _dir: dir, store }
    }

    #[must_use]
    pub const fn store(&self) -> &SessionStore {
        &self.store
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use serde_json::json;

    fn request() -> ApiRequest {
        ApiRequest::new(Method::Get, "http://localhost/api/category/all")
    }

    #[tokio::test]
    async fn test_replays_in_order() {
        let transport = MockTransport::new();
        transport.push_json(200, json!([1]));
        transport.push_empty(204);

        let first = transport.send(request()).await.unwrap();
        assert_eq!(first.body, "[1]");
        assert_eq!(first.status_text, "OK");
        let second = transport.send(request()).await.unwrap();
        assert_eq!(second.status, 204);
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_runs_dry() {
        let transport = MockTransport::new();
        assert!(transport.send(request()).await.is_err());
    }

    #[test]
    fn test_store_is_usable() {
        let test_store = TestStore::new();
        assert!(test_store.store().token().unwrap().is_none());
    }
}
