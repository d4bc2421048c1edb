//! Listing routes
//!
//! Home, professional search (optionally scoped to a service category) and
//! the professional detail screen. Unknown route parameters degrade to an
//! empty view instead of an error.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::app::AppState;
use crate::domain::{ListingQueryParams, QueryState};
use crate::views::{HomeView, ProfessionalDetailView, Screen, SearchView};

fn search(state: &AppState, query: QueryState) -> Screen<SearchView> {
    let results = state.listings.run(&query);
    tracing::debug!(
        search = %query.search,
        category = ?query.category,
        sort = %query.sort,
        results = results.len(),
        "Professional search"
    );
    Screen::new("search", SearchView::project(&query, &results))
}

/// GET /
pub async fn home(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Screen::new("home", HomeView::project(&state.listings))
}

/// GET /professionals
pub async fn find_professionals(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListingQueryParams>,
) -> impl IntoResponse {
    search(&state, params.into_query(None))
}

/// GET /services/:service_name
///
/// Search scoped to one service category.
pub async fn find_service_professionals(
    State(state): State<Arc<AppState>>,
    Path(service_name): Path<String>,
    Query(params): Query<ListingQueryParams>,
) -> impl IntoResponse {
    let category = Some(service_name).filter(|s| !s.trim().is_empty());
    search(&state, params.into_query(category))
}

/// GET /professionals/:id
pub async fn get_professional(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let listing = id.parse::<u32>().ok().and_then(|id| state.listings.find(id));
    if listing.is_none() {
        tracing::debug!(id = %id, "Professional not found, rendering empty detail view");
    }
    Screen::new("professional", ProfessionalDetailView::project(listing))
}
