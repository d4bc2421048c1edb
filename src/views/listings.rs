//! Projections for the home, search and professional detail screens

use serde::Serialize;

use crate::domain::{ProfessionalListing, QueryState, SortKey};
use crate::services::listing_query::{CategorySummary, ListingQueryEngine};

/// Avatars are numbered from this offset by result position
const AVATAR_OFFSET: usize = 10;

/// One professional card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingCard {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub avatar_url: String,
    pub price_label: String,
    pub rating_label: String,
    pub next_available: String,
    pub distance_label: String,
    pub service_category: String,
}

impl ListingCard {
    pub fn project(listing: &ProfessionalListing, position: usize) -> Self {
        Self {
            id: listing.id,
            name: listing.name.clone(),
            role: listing.role.clone(),
            avatar_url: format!("https://i.pravatar.cc/150?img={}", position + AVATAR_OFFSET),
            price_label: format!("${}/hr", listing.hourly_price.normalize()),
            rating_label: format!("{} ({})", listing.rating, listing.review_count),
            next_available: format!("{}, {}", listing.next_day, listing.next_time),
            distance_label: format!("{} miles", listing.distance_miles),
            service_category: listing.service_category.clone(),
        }
    }
}

/// Which toggles are switched on, echoed back for the filter buttons
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFilters {
    pub search: String,
    pub today_only: bool,
    pub top_rated: bool,
    pub under_60: bool,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchView {
    pub title: &'static str,
    pub summary: String,
    pub total: usize,
    pub sort: SortKey,
    pub filters: ActiveFilters,
    pub professionals: Vec<ListingCard>,
}

impl SearchView {
    pub fn project(query: &QueryState, results: &[ProfessionalListing]) -> Self {
        Self {
            title: "Find Professionals",
            summary: format!("{} professionals found", results.len()),
            total: results.len(),
            sort: query.sort,
            filters: ActiveFilters {
                search: query.search.clone(),
                today_only: query.today_only,
                top_rated: query.top_rated,
                under_60: query.under_60,
                category: query.category.clone(),
            },
            professionals: results
                .iter()
                .enumerate()
                .map(|(i, l)| ListingCard::project(l, i))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCard {
    pub name: String,
    pub professional_count: usize,
    pub href: String,
}

impl From<CategorySummary> for ServiceCard {
    fn from(c: CategorySummary) -> Self {
        Self {
            href: format!("/services/{}", c.name),
            name: c.name,
            professional_count: c.professional_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeView {
    pub services: Vec<ServiceCard>,
    pub recommended: Vec<ListingCard>,
}

impl HomeView {
    pub const RECOMMENDED_LIMIT: usize = 3;

    pub fn project(engine: &ListingQueryEngine) -> Self {
        Self {
            services: engine.categories().into_iter().map(ServiceCard::from).collect(),
            recommended: engine
                .recommended(Self::RECOMMENDED_LIMIT)
                .iter()
                .enumerate()
                .map(|(i, l)| ListingCard::project(l, i))
                .collect(),
        }
    }
}

/// Detail screen; an unknown id renders an empty view rather than an error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfessionalDetailView {
    pub found: bool,
    pub professional: Option<ListingCard>,
}

impl ProfessionalDetailView {
    pub fn project(listing: Option<&ProfessionalListing>) -> Self {
        Self {
            found: listing.is_some(),
            professional: listing.map(|l| ListingCard::project(l, 0)),
        }
    }
}
