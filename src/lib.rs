//! noema-dash - a terminal dashboard for a running Noema loop.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod poller;
pub mod report;
pub mod terminal;
pub mod traits;
pub mod ui;
