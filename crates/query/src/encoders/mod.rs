//! Encoder implementations for the query builder.
//!
//! This module contains the concrete stages that are composed into a
//! QueryBuilder, one per group of request parameters.

pub mod job_id;
pub mod paging;
pub mod search;
pub mod selection;

// Re-export for convenience
pub use job_id::JobIdEncoder;
pub use paging::PagingEncoder;
pub use search::SearchEncoder;
pub use selection::SelectionEncoder;
