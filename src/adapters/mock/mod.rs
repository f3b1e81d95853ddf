//! Mock implementations for testing.
//!
//! Lets the API client and the poller run without network access.

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
