//! Domain types and DTOs
//!
//! These types define the data structures for the local services marketplace.

pub mod auth;
pub mod listings;
pub mod profiles;

pub use auth::*;
pub use listings::*;
pub use profiles::*;
