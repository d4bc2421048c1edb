pub mod auth;
pub mod health;
pub mod listings;
pub mod profile;

use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::app::AppState;

/// Build the router with all screens
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        // Listings
        .route("/", get(listings::home))
        .route("/professionals", get(listings::find_professionals))
        .route("/professionals/:id", get(listings::get_professional))
        .route(
            "/services/:service_name",
            get(listings::find_service_professionals),
        )
        // Auth
        .route("/auth/login", post(auth::login))
        // Customer profile
        .route("/profile", get(profile::get_profile))
        .route("/profile/edit", post(profile::begin_edit))
        .route("/profile/draft", patch(profile::update_draft))
        .route("/profile/cancel", post(profile::cancel_edit))
        .route(
            "/profile/avatar",
            post(profile::upload_avatar).delete(profile::remove_avatar),
        )
        .route("/profile/submit", post(profile::submit_profile))
}
