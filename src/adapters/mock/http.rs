//! Mock HTTP client for testing.
//!
//! Routes are matched by exact URL first, then by prefix. Each route holds a
//! queue of responses: they are served in order and the last one repeats, so
//! a test can script "down, down, up" for the poller.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Headers,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (any status)
    Success(Response),
    /// Fail at the transport level
    Error(HttpError),
}

impl MockResponse {
    /// 200 with a JSON body.
    pub fn json(value: serde_json::Value) -> Self {
        MockResponse::Success(Response::json_body(200, &value))
    }

    /// Arbitrary status with a plain-text body.
    pub fn status(status: u16, body: &str) -> Self {
        MockResponse::Success(Response::new(status, body.to_string()))
    }

    /// Connection refused, the usual "backend not running" case.
    pub fn refused() -> Self {
        MockResponse::Error(HttpError::ConnectionFailed("connection refused".to_string()))
    }
}

/// Mock HTTP client for testing.
///
/// Clones share routes and recorded requests, so a test can keep one handle
/// while the client under test owns another.
///
/// # Example
///
/// ```ignore
/// use noema_dash::adapters::{MockHttpClient, MockResponse};
///
/// let http = MockHttpClient::new();
/// http.push_response("http://run/api/run/state", MockResponse::refused());
/// http.push_response("http://run/api/run/state", MockResponse::json(json!({"tick": 1})));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    routes: Arc<Mutex<HashMap<String, VecDeque<MockResponse>>>>,
    default_response: Arc<Mutex<Option<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `response` for `url` on every request, replacing any queue.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        lock(&self.routes).insert(url.to_string(), VecDeque::from([response]));
    }

    /// Append `response` to the queue for `url`.
    pub fn push_response(&self, url: &str, response: MockResponse) {
        lock(&self.routes)
            .entry(url.to_string())
            .or_default()
            .push_back(response);
    }

    /// Set a default response for URLs without a route.
    pub fn set_default_response(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// URLs requested so far, in order.
    pub fn requested_urls(&self) -> Vec<String> {
        lock(&self.requests).iter().map(|r| r.url.clone()).collect()
    }

    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }

    fn next_response(&self, url: &str) -> Option<MockResponse> {
        let mut routes = lock(&self.routes);

        let key = if routes.contains_key(url) {
            Some(url.to_string())
        } else {
            routes
                .keys()
                .filter(|pattern| url.starts_with(pattern.as_str()))
                .max_by_key(|pattern| pattern.len())
                .cloned()
        };

        if let Some(queue) = key.as_ref().and_then(|k| routes.get_mut(k)) {
            let response = if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            };
            if response.is_some() {
                return response;
            }
        }

        lock(&self.default_response).clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        lock(&self.requests).push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
        });

        match self.next_response(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}
