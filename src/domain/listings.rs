//! Professional listing domain types
//!
//! The marketplace catalogue is a fixed, in-memory collection. Nothing in the
//! service mutates a listing once the catalogue has been built.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Day label that the "today only" filter matches against.
///
/// Availability is carried as free-text labels ("Today", "Tomorrow", "Monday"),
/// not as calendar dates.
pub const TODAY_LABEL: &str = "Today";

/// Professional listing shown in search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalListing {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub hourly_price: Decimal,
    pub rating: f64,
    pub review_count: u32,
    pub next_day: String,
    pub next_time: String,
    pub distance_miles: f64,
    pub service_category: String,
}

impl ProfessionalListing {
    pub fn is_available_today(&self) -> bool {
        self.next_day == TODAY_LABEL
    }
}

/// Ordering applied to a filtered view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Relevance,
    Rating,
    Price,
}

impl SortKey {
    /// Parse a sort key; anything unrecognised keeps the declared order.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "rating" => Self::Rating,
            "price" => Self::Price,
            _ => Self::Relevance,
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Relevance => write!(f, "relevance"),
            Self::Rating => write!(f, "rating"),
            Self::Price => write!(f, "price"),
        }
    }
}

/// User-chosen predicates and ordering for one search screen
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct QueryState {
    pub search: String,
    pub today_only: bool,
    pub top_rated: bool,
    pub under_60: bool,
    pub sort: SortKey,
    pub category: Option<String>,
}

impl QueryState {
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// True when no predicate is active and the declared order is kept
    pub fn is_identity(&self) -> bool {
        self.search.is_empty()
            && !self.today_only
            && !self.top_rated
            && !self.under_60
            && self.category.is_none()
            && self.sort == SortKey::Relevance
    }
}

/// Raw query-string parameters for the search routes.
///
/// Toggles are kept as text so an odd value (`?today_only=maybe`) switches
/// the toggle off instead of rejecting the request.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListingQueryParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub today_only: Option<String>,
    #[serde(default)]
    pub top_rated: Option<String>,
    #[serde(default)]
    pub under_60: Option<String>,
    #[serde(default)]
    pub sort: Option<String>, // relevance, rating, price
}

/// `true`, `1`, `yes` and `on` switch a toggle on; anything else leaves it off
fn toggle(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        )
    })
}

impl ListingQueryParams {
    pub fn into_query(self, category: Option<String>) -> QueryState {
        QueryState {
            search: self.search.unwrap_or_default(),
            today_only: toggle(self.today_only.as_deref()),
            top_rated: toggle(self.top_rated.as_deref()),
            under_60: toggle(self.under_60.as_deref()),
            sort: self.sort.as_deref().map(SortKey::parse).unwrap_or_default(),
            category,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn listing(
    id: u32,
    name: &str,
    role: &str,
    hourly_price: i64,
    rating: f64,
    review_count: u32,
    next: (&str, &str),
    distance_miles: f64,
    service_category: &str,
) -> ProfessionalListing {
    ProfessionalListing {
        id,
        name: name.to_string(),
        role: role.to_string(),
        hourly_price: Decimal::from(hourly_price),
        rating,
        review_count,
        next_day: next.0.to_string(),
        next_time: next.1.to_string(),
        distance_miles,
        service_category: service_category.to_string(),
    }
}

/// The marketplace catalogue, in declaration order
pub fn seed_listings() -> Vec<ProfessionalListing> {
    vec![
        listing(
            1,
            "Arthur Miller",
            "Master Electrician",
            65,
            4.9,
            86,
            ("Tomorrow", "9 AM"),
            0.8,
            "electrician",
        ),
        listing(
            2,
            "Sarah Jenkins",
            "Senior Interior Designer",
            85,
            5.0,
            120,
            ("Monday", "11 AM"),
            1.5,
            "developer",
        ),
        listing(
            3,
            "David Chen",
            "Math & Physics Tutor",
            45,
            4.8,
            54,
            ("Today", "4 PM"),
            2.2,
            "tutor",
        ),
        listing(
            4,
            "Marcus Thorne",
            "Licensed Plumber",
            70,
            4.7,
            102,
            ("Tomorrow", "10 AM"),
            3.5,
            "plumber",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sort_keys_fall_back_to_relevance() {
        assert_eq!(SortKey::parse("Rating"), SortKey::Rating);
        assert_eq!(SortKey::parse("price"), SortKey::Price);
        assert_eq!(SortKey::parse("distance"), SortKey::Relevance);
        assert_eq!(SortKey::parse(""), SortKey::Relevance);
    }

    #[test]
    fn params_default_to_identity_query() {
        let query = ListingQueryParams::default().into_query(None);
        assert!(query.is_identity());

        let scoped = ListingQueryParams::default().into_query(Some("plumber".into()));
        assert!(!scoped.is_identity());
    }

    #[test]
    fn toggles_parse_leniently() {
        let params = ListingQueryParams {
            today_only: Some("1".into()),
            top_rated: Some("TRUE".into()),
            under_60: Some("maybe".into()),
            ..Default::default()
        };
        let query = params.into_query(None);
        assert!(query.today_only);
        assert!(query.top_rated);
        assert!(!query.under_60);

        let off = ListingQueryParams {
            today_only: Some("false".into()),
            top_rated: Some(String::new()),
            ..Default::default()
        };
        assert!(off.into_query(None).is_identity());
    }

    #[test]
    fn seed_catalogue_keeps_declared_order() {
        let names: Vec<_> = seed_listings().into_iter().map(|l| l.name).collect();
        assert_eq!(
            names,
            ["Arthur Miller", "Sarah Jenkins", "David Chen", "Marcus Thorne"]
        );
    }
}
