//! Listing query engine
//!
//! Derives the ordered, filtered view of the catalogue for a [`QueryState`].
//! All active predicates are conjunctive. The source collection is never
//! mutated; the engine only remembers the last (query, result) pair so that
//! repeated renders of the same screen state do not recompute.

use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::domain::{ProfessionalListing, QueryState, SortKey};

/// Minimum rating for the "top rated" toggle
pub const TOP_RATED_MIN: f64 = 4.8;

/// Exclusive upper bound on hourly price for the "under $60" toggle
pub fn under_60_limit() -> Decimal {
    Decimal::from(60)
}

/// True when `listing` satisfies every active predicate of `query`
pub fn matches(listing: &ProfessionalListing, query: &QueryState) -> bool {
    if !query.search.is_empty() {
        let needle = query.search.to_lowercase();
        if !listing.name.to_lowercase().contains(&needle)
            && !listing.role.to_lowercase().contains(&needle)
        {
            return false;
        }
    }

    if query.today_only && !listing.is_available_today() {
        return false;
    }

    if let Some(category) = &query.category {
        if listing.service_category.to_lowercase() != category.to_lowercase() {
            return false;
        }
    }

    if query.top_rated && listing.rating < TOP_RATED_MIN {
        return false;
    }

    if query.under_60 && listing.hourly_price >= under_60_limit() {
        return false;
    }

    true
}

/// Order a filtered view in place. Stable, so ties keep catalogue order.
pub fn sort_listings(listings: &mut [ProfessionalListing], key: SortKey) {
    match key {
        SortKey::Relevance => {}
        SortKey::Rating => listings.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Price => listings.sort_by(|a, b| a.hourly_price.cmp(&b.hourly_price)),
    }
}

/// Filter then order `source` for `query`
pub fn apply(source: &[ProfessionalListing], query: &QueryState) -> Vec<ProfessionalListing> {
    let mut result: Vec<_> = source
        .iter()
        .filter(|listing| matches(listing, query))
        .cloned()
        .collect();
    sort_listings(&mut result, query.sort);
    result
}

/// A service category present in the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub professional_count: usize,
}

struct Memo {
    query: QueryState,
    result: Arc<[ProfessionalListing]>,
}

/// Query engine over a fixed catalogue
pub struct ListingQueryEngine {
    source: Arc<[ProfessionalListing]>,
    last: Mutex<Option<Memo>>,
    recomputations: AtomicU64,
}

impl ListingQueryEngine {
    pub fn new(source: Vec<ProfessionalListing>) -> Self {
        Self {
            source: source.into(),
            last: Mutex::new(None),
            recomputations: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &[ProfessionalListing] {
        &self.source
    }

    /// Derived view for `query`, reusing the previous result when the query
    /// is unchanged.
    #[instrument(skip(self), fields(memo_hit))]
    pub fn run(&self, query: &QueryState) -> Arc<[ProfessionalListing]> {
        let mut last = self.last.lock();

        if let Some(memo) = last.as_ref() {
            if memo.query == *query {
                tracing::Span::current().record("memo_hit", true);
                return Arc::clone(&memo.result);
            }
        }

        tracing::Span::current().record("memo_hit", false);
        let result: Arc<[ProfessionalListing]> = apply(&self.source, query).into();
        self.recomputations.fetch_add(1, Ordering::Relaxed);
        debug!(results = result.len(), "Recomputed listing view");

        *last = Some(Memo {
            query: query.clone(),
            result: Arc::clone(&result),
        });
        result
    }

    /// Number of times a view has actually been computed
    pub fn recomputations(&self) -> u64 {
        self.recomputations.load(Ordering::Relaxed)
    }

    pub fn find(&self, id: u32) -> Option<&ProfessionalListing> {
        self.source.iter().find(|l| l.id == id)
    }

    /// Top-rated professionals, best first
    pub fn recommended(&self, limit: usize) -> Vec<ProfessionalListing> {
        let query = QueryState {
            top_rated: true,
            sort: SortKey::Rating,
            ..Default::default()
        };
        let mut result = apply(&self.source, &query);
        result.truncate(limit);
        result
    }

    /// Distinct categories in first-seen catalogue order
    pub fn categories(&self) -> Vec<CategorySummary> {
        let mut out: Vec<CategorySummary> = Vec::new();
        for listing in self.source.iter() {
            match out
                .iter_mut()
                .find(|c| c.name.eq_ignore_ascii_case(&listing.service_category))
            {
                Some(existing) => existing.professional_count += 1,
                None => out.push(CategorySummary {
                    name: listing.service_category.to_lowercase(),
                    professional_count: 1,
                }),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed_listings;

    fn names(listings: &[ProfessionalListing]) -> Vec<&str> {
        listings.iter().map(|l| l.name.as_str()).collect()
    }

    fn all_queries() -> Vec<QueryState> {
        let mut out = Vec::new();
        for search in ["", "tutor", "MA", "zzz"] {
            for flags in 0..8u8 {
                for sort in [SortKey::Relevance, SortKey::Rating, SortKey::Price] {
                    for category in [None, Some("PLUMBER"), Some("tutor"), Some("unknown")] {
                        out.push(QueryState {
                            search: search.to_string(),
                            today_only: flags & 1 != 0,
                            top_rated: flags & 2 != 0,
                            under_60: flags & 4 != 0,
                            sort,
                            category: category.map(str::to_string),
                        });
                    }
                }
            }
        }
        out
    }

    #[test]
    fn identity_query_preserves_catalogue_order() {
        let source = seed_listings();
        assert_eq!(apply(&source, &QueryState::default()), source);
    }

    /// Each active flag checked straight against the listing fields
    fn expected_match(listing: &ProfessionalListing, query: &QueryState) -> bool {
        let search = query.search.to_lowercase();
        let text_ok = query.search.is_empty()
            || listing.name.to_lowercase().contains(&search)
            || listing.role.to_lowercase().contains(&search);
        let today_ok = !query.today_only || listing.next_day == "Today";
        let rating_ok = !query.top_rated || listing.rating >= 4.8;
        let price_ok = !query.under_60 || listing.hourly_price < Decimal::from(60);
        let category_ok = query
            .category
            .as_ref()
            .map_or(true, |c| c.to_lowercase() == listing.service_category.to_lowercase());
        text_ok && today_ok && rating_ok && price_ok && category_ok
    }

    #[test]
    fn every_result_satisfies_every_active_predicate() {
        let source = seed_listings();
        for query in all_queries() {
            let result = apply(&source, &query);
            assert!(result.len() <= source.len());
            for listing in &result {
                assert!(
                    expected_match(listing, &query),
                    "{query:?} let {} through",
                    listing.name
                );
            }
            // nothing that matches is dropped
            let expected = source.iter().filter(|l| expected_match(l, &query)).count();
            assert_eq!(result.len(), expected, "{query:?}");
        }
    }

    #[test]
    fn flag_queries_pick_known_listings() {
        let source = seed_listings();
        let run = |query: QueryState| names(&apply(&source, &query)).join(", ");

        let today = QueryState {
            today_only: true,
            ..Default::default()
        };
        assert_eq!(run(today), "David Chen");

        let top = QueryState {
            top_rated: true,
            ..Default::default()
        };
        assert_eq!(run(top), "Arthur Miller, Sarah Jenkins, David Chen");

        let search = QueryState {
            search: "PLUMB".into(),
            ..Default::default()
        };
        assert_eq!(run(search), "Marcus Thorne");
    }

    #[test]
    fn sorting_is_idempotent() {
        let source = seed_listings();
        for key in [SortKey::Rating, SortKey::Price] {
            let mut once = source.clone();
            sort_listings(&mut once, key);
            let mut twice = once.clone();
            sort_listings(&mut twice, key);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn category_scope_is_case_insensitive() {
        let source = seed_listings();
        let result = apply(&source, &QueryState::default().with_category("Plumber"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Marcus Thorne");
        assert_eq!(result[0].role, "Licensed Plumber");
    }

    #[test]
    fn unknown_category_yields_empty_view() {
        let source = seed_listings();
        assert!(apply(&source, &QueryState::default().with_category("astronaut")).is_empty());
    }

    #[test]
    fn under_60_is_strict() {
        let source = seed_listings();
        let query = QueryState {
            under_60: true,
            ..Default::default()
        };
        let result = apply(&source, &query);
        assert_eq!(names(&result), ["David Chen"]);

        let mut at_limit = source[0].clone();
        at_limit.hourly_price = Decimal::from(60);
        assert!(!matches(&at_limit, &query));
    }

    #[test]
    fn search_matches_name_or_role_case_insensitively() {
        let source = seed_listings();
        let by_role = QueryState {
            search: "ELECTRIC".into(),
            ..Default::default()
        };
        assert_eq!(names(&apply(&source, &by_role)), ["Arthur Miller"]);

        let by_name = QueryState {
            search: "chen".into(),
            ..Default::default()
        };
        assert_eq!(names(&apply(&source, &by_name)), ["David Chen"]);
    }

    #[test]
    fn today_only_and_top_rated_compose() {
        let source = seed_listings();
        let top = QueryState {
            top_rated: true,
            ..Default::default()
        };
        assert_eq!(
            names(&apply(&source, &top)),
            ["Arthur Miller", "Sarah Jenkins", "David Chen"]
        );

        let today_top = QueryState {
            today_only: true,
            top_rated: true,
            ..Default::default()
        };
        assert_eq!(names(&apply(&source, &today_top)), ["David Chen"]);
    }

    #[test]
    fn rating_sort_is_descending_and_price_sort_ascending() {
        let source = seed_listings();
        let by_rating = QueryState {
            sort: SortKey::Rating,
            ..Default::default()
        };
        assert_eq!(
            names(&apply(&source, &by_rating)),
            ["Sarah Jenkins", "Arthur Miller", "David Chen", "Marcus Thorne"]
        );

        let by_price = QueryState {
            sort: SortKey::Price,
            ..Default::default()
        };
        assert_eq!(
            names(&apply(&source, &by_price)),
            ["David Chen", "Arthur Miller", "Marcus Thorne", "Sarah Jenkins"]
        );
    }

    #[test]
    fn ties_keep_catalogue_order() {
        let mut source = seed_listings();
        for listing in &mut source {
            listing.rating = 4.5;
        }
        let query = QueryState {
            sort: SortKey::Rating,
            ..Default::default()
        };
        assert_eq!(apply(&source, &query), source);
    }

    #[test]
    fn engine_memoizes_last_query_only() {
        let engine = ListingQueryEngine::new(seed_listings());
        let query = QueryState {
            sort: SortKey::Price,
            ..Default::default()
        };

        let first = engine.run(&query);
        let second = engine.run(&query);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(engine.recomputations(), 1);

        engine.run(&QueryState::default());
        assert_eq!(engine.recomputations(), 2);

        // the memo only covers the last-seen inputs
        engine.run(&query);
        assert_eq!(engine.recomputations(), 3);
        assert_eq!(engine.source().len(), 4);
    }

    #[test]
    fn recommended_and_categories() {
        let engine = ListingQueryEngine::new(seed_listings());
        assert_eq!(
            names(&engine.recommended(2)),
            ["Sarah Jenkins", "Arthur Miller"]
        );

        let categories: Vec<_> = engine.categories().into_iter().map(|c| c.name).collect();
        assert_eq!(categories, ["electrician", "developer", "tutor", "plumber"]);
        assert_eq!(engine.find(4).map(|l| l.name.as_str()), Some("Marcus Thorne"));
        assert!(engine.find(99).is_none());
    }
}
