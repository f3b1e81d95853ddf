//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP GET against the run API

pub mod http;

pub use http::{Headers, HttpClient, HttpError, Response};
