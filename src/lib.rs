//! Local Service Connect
//!
//! Marketplace screens for finding local professionals and managing a
//! customer profile, served as JSON view projections over axum.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod validation;
pub mod views;

pub use app::{create_app, AppState};
pub use config::Settings;
