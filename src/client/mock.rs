//! Mock Intelix transport for testing
//!
//! Responses are scripted per request path. Each path holds a queue of
//! bodies; the last body of a queue is sticky, so repeated polls keep
//! returning it.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use super::models::AccessToken;
use super::{FileUpload, IntelixApi};
use crate::error::{ApiError, Result};

/// Base URL reported by the mock transport
pub const MOCK_BASE_URL: &str = "mock://intelix";

/// A request seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRequest {
    pub method: &'static str,
    /// Path with any query appended as `?k=v&...`
    pub path: String,
    pub authorization: String,
    pub upload: Option<FileUpload>,
}

/// Mock API transport.
///
/// Clones share state, so a test can keep a handle after moving one into a
/// client.
///
/// # Example
/// ```ignore
/// let mock = MockIntelixApi::new()
///     .with_response("/lookup/files/v1/<hash>", json!({"requestId": "r1"}));
/// let mut client = IntelixClient::with_api(mock.clone(), Region::De, creds).await?;
/// client.lookup_sha256("<hash>", true).await?;
/// assert_eq!(mock.requests().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MockIntelixApi {
    /// Token handed out by request_token
    token: Arc<Mutex<Option<String>>>,
    /// Status to fail the token exchange with
    auth_failure: Arc<Mutex<Option<StatusCode>>>,
    /// Scripted bodies per path
    responses: Arc<Mutex<HashMap<String, VecDeque<Value>>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Number of token exchanges
    token_requests: Arc<Mutex<usize>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockIntelixApi {
    pub fn new() -> Self {
        Self::default().with_token("mock-token")
    }

    /// Token returned by a successful exchange
    pub fn with_token(self, token: &str) -> Self {
        *self.token.lock().unwrap() = Some(token.to_string());
        self
    }

    /// Make the token exchange fail with `status`
    pub fn with_auth_failure(self, status: StatusCode) -> Self {
        *self.auth_failure.lock().unwrap() = Some(status);
        self
    }

    /// Queue a response body for `path`
    pub fn with_response(self, path: &str, body: Value) -> Self {
        self.push_response(path, body);
        self
    }

    /// Queue a response body after construction
    pub fn push_response(&self, path: &str, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(body);
    }

    /// Replace every queued response for `path`
    pub fn set_response(&self, path: &str, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), VecDeque::from([body]));
    }

    /// Drop every queued response for `path`
    pub fn clear_response(&self, path: &str) {
        self.responses.lock().unwrap().remove(path);
    }

    /// Fail the next service request with `error`
    pub fn fail_next(&self, error: ApiError) {
        *self.error.lock().unwrap() = Some(error);
    }

    pub fn token_requests(&self) -> usize {
        *self.token_requests.lock().unwrap()
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().unwrap().clone()
    }

    /// Paths of captured service requests in order
    pub fn request_paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }

    fn respond(
        &self,
        method: &'static str,
        token: &AccessToken,
        path: String,
        upload: Option<FileUpload>,
    ) -> Result<Value> {
        self.captured_requests.lock().unwrap().push(CapturedRequest {
            method,
            path: path.clone(),
            authorization: token.as_str().to_string(),
            upload,
        });

        if let Some(err) = self.error.lock().unwrap().take() {
            return Err(err.into());
        }

        let mut responses = self.responses.lock().unwrap();
        let queue = responses
            .get_mut(&path)
            .ok_or_else(|| ApiError::InvalidResponse(format!("No mock response for {}", path)))?;
        let body = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        body.ok_or_else(|| {
            ApiError::InvalidResponse(format!("No mock response for {}", path)).into()
        })
    }
}

#[async_trait]
impl IntelixApi for MockIntelixApi {
    fn base_url(&self) -> &str {
        MOCK_BASE_URL
    }

    async fn request_token(&self, _client_id: &str, _client_secret: &str) -> Result<AccessToken> {
        *self.token_requests.lock().unwrap() += 1;

        if let Some(status) = *self.auth_failure.lock().unwrap() {
            return Err(ApiError::AuthenticationFailed(status).into());
        }

        self.token
            .lock()
            .unwrap()
            .clone()
            .and_then(AccessToken::new)
            .ok_or_else(|| ApiError::InvalidResponse("No mock token configured".to_string()).into())
    }

    async fn get(&self, token: &AccessToken, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let path = if query.is_empty() {
            path.to_string()
        } else {
            let query: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            format!("{}?{}", path, query.join("&"))
        };
        self.respond("GET", token, path, None)
    }

    async fn upload(&self, token: &AccessToken, path: &str, file: FileUpload) -> Result<Value> {
        self.respond("POST", token, path.to_string(), Some(file))
    }
}
