//! # Candidate Model Crate
//!
//! Shared data model for the candidate listing client.
//!
//! ## Main Components
//!
//! - **types**: Filters, selection sets, sorting, pagination cursor, candidate
//!   records and the result snapshot
//! - **catalog**: Filter category definitions loaded from JSON
//! - **error**: Error types for catalog loading and decoding
//!
//! ## Example Usage
//!
//! ```ignore
//! use candidate_model::{CategoryKey, FilterUpdate, Filters};
//!
//! let filters = Filters::default();
//! let sources = filters.selection(CategoryKey::Source).toggled("LinkedIn");
//! let next = filters.apply(FilterUpdate::selection(CategoryKey::Source, sources));
//!
//! assert_ne!(filters, next);
//! ```

// Public modules
pub mod catalog;
pub mod error;
pub mod types;

// Re-export commonly used types for convenience
pub use catalog::{CategoryCatalog, FilterCategory};
pub use error::{ModelError, Result};
pub use types::{
    // Constants and helpers
    PER_PAGE,
    clamp_page,
    // Filters
    CategoryKey,
    FilterUpdate,
    Filters,
    SelectionSet,
    SortBy,
    SortOrder,
    // Pagination and results
    Candidate,
    CandidateId,
    CandidatePage,
    PaginationCursor,
    ResultSnapshot,
};
