//! Service layer modules.
//!
//! Contains the listing query engine, the profile edit state machine, avatar
//! attachment handling and the backend capabilities they depend on.

pub mod attachment;
pub mod backend;
pub mod listing_query;
pub mod profile_editor;

pub use backend::Backends;
pub use listing_query::ListingQueryEngine;
pub use profile_editor::ProfileEditor;
