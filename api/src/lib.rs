//! # Bug Tracker API
//!
//! Thin HTTP layer over the token lifecycle core: bearer authentication
//! middleware, role gates, and the refresh/logout/me endpoints.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{configure_app, AppState};
