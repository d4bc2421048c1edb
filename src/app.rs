use axum::{extract::DefaultBodyLimit, http::HeaderValue, Router};
use chrono::{NaiveDate, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Settings;
use crate::domain::{seed_listings, CustomerProfile};
use crate::middleware::{request_id_layer, request_span};
use crate::routes;
use crate::services::{Backends, ListingQueryEngine, ProfileEditor};

/// Shared application state
pub struct AppState {
    pub settings: Settings,
    pub listings: ListingQueryEngine,
    /// The customer profile screen; one editor per running service
    pub profile: Arc<Mutex<ProfileEditor>>,
    pub backends: Backends,
}

impl AppState {
    pub fn new(settings: Settings, backends: Backends) -> Arc<Self> {
        let profile = ProfileEditor::new(
            CustomerProfile::default(),
            settings.success_notice_duration,
        );

        Arc::new(Self {
            listings: ListingQueryEngine::new(seed_listings()),
            profile: Arc::new(Mutex::new(profile)),
            backends,
            settings,
        })
    }

    /// State backed by the in-process mock backends
    pub fn with_mock_backends(settings: Settings) -> Arc<Self> {
        let backends = Backends::mock(
            settings.simulated_latency,
            &settings.demo_login_email,
            settings.mock_profile_store_fail,
        );
        Self::new(settings, backends)
    }

    /// Calendar date used by age checks
    pub fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Build the complete application with all middleware
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(&state.settings);

    // Spans at DEBUG to keep INFO quiet
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(request_span)
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    let (set_request_id, propagate_request_id) = request_id_layer();

    // Multipart uploads are capped here instead of by axum's 2 MB default so
    // that oversize images reach the attachment check.
    let body_limit = RequestBodyLimitLayer::new(state.settings.max_request_body_bytes);

    Router::new()
        .merge(routes::api_router())
        // Middleware stack (applied bottom-up)
        .layer(DefaultBodyLimit::disable())
        .layer(body_limit)
        .layer(propagate_request_id)
        .layer(trace_layer)
        .layer(set_request_id)
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors_allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let max_age = if settings.env.is_dev() {
        std::time::Duration::from_secs(86400)
    } else {
        std::time::Duration::from_secs(3600)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::HeaderName::from_static("x-request-id"),
        ]))
        .allow_credentials(true)
        .max_age(max_age)
}
