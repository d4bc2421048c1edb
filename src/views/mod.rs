//! View projections
//!
//! Each screen is rendered from its state by a pure function, so the output
//! can be asserted on without an HTTP stack.

pub mod listings;
pub mod profile;
pub mod screen;

pub use listings::{HomeView, ListingCard, ProfessionalDetailView, SearchView};
pub use profile::ProfileView;
pub use screen::Screen;
