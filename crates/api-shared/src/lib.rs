//! # API Shared
//!
//! Shared definitions for the drive REST API.
//!
//! Contains:
//! - Request and response types with OpenAPI schemas (`models` module)
//! - Shared services like `HealthService`
//! - Session cookie helpers (`auth` module)

pub mod auth;
pub mod health;
pub mod models;

pub use health::HealthService;
pub use models::*;
