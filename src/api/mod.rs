//! Client for the ticketing platform's HTTP API
//!
//! All requests are rooted at `<api_url>/api`. A bearer token is attached
//! whenever one is held; the token is set by the auth session after login
//! or restore and cleared on logout.
//!
//! Response handling follows one convention across every endpoint:
//!
//! - non-2xx → [`ApiError::Status`] with the body text (or status text)
//! - 204 or empty body → no content
//! - anything else → JSON

pub mod error;
pub mod transport;

pub use error::ApiError;
pub use transport::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{PoisonError, RwLock};

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Typed front-end over a [`Transport`]
#[derive(Debug)]
pub struct ApiClient<T> {
    transport: T,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl<T: Transport> ApiClient<T> {
    /// Create a client for the API hosted at `api_url`
    ///
    /// The `/api` prefix is appended here, so `api_url` is the bare origin.
    #[must_use]
    pub fn new(transport: T, api_url: &str) -> Self {
        Self {
            transport,
            base_url: format!("{}/api", api_url.trim_end_matches('/')),
            token: RwLock::new(None),
        }
    }

    /// Base URL including the `/api` prefix
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Underlying transport
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Replace the bearer token used for subsequent requests
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Current bearer token, if any
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Send a request and apply the shared response convention
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` for non-2xx replies, `ApiError::Transport`
    /// when no response arrived, and `ApiError::Decode` for malformed JSON.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<Option<Value>> {
        let request = ApiRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            query,
            body,
            bearer: self.token(),
        };
        log::debug!("{} {}", request.method, request.url);

        let response = self.transport.send(request).await?;

        if !response.is_success() {
            log::debug!("{} {} -> {}", method, path, response.status);
            return Err(ApiError::from_status(
                response.status,
                &response.status_text,
                &response.body,
            ));
        }

        if !response.has_content() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&response.body)?))
    }

    /// GET and decode the JSON body
    ///
    /// # Errors
    ///
    /// Propagates request failures; an empty body decodes as JSON `null`.
    pub async fn get<R: DeserializeOwned>(&self, path: &str, query: Vec<(String, String)>) -> Result<R> {
        let value = self
            .execute(Method::Get, path, query, None)
            .await?
            .unwrap_or(Value::Null);
        Ok(serde_json::from_value(value)?)
    }

    /// POST a JSON body
    ///
    /// # Errors
    ///
    /// Propagates request failures.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Option<Value>> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::Post, path, Vec::new(), Some(body)).await
    }

    /// PUT a JSON body
    ///
    /// # Errors
    ///
    /// Propagates request failures.
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Option<Value>> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::Put, path, Vec::new(), Some(body)).await
    }

    /// DELETE a resource
    ///
    /// # Errors
    ///
    /// Propagates request failures.
    pub async fn delete(&self, path: &str) -> Result<Option<Value>> {
        self.execute(Method::Delete, path, Vec::new(), None).await
    }
}
