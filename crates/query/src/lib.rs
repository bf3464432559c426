//! Query construction for the candidates endpoint.
//!
//! This crate provides:
//! - ParamEncoder trait and implementations, one per parameter group
//! - QueryBuilder for composing encoders
//! - QueryParams, the ordered (and repeatable) key/value list
//!
//! ## Architecture
//! A query is built in stages:
//! 1. Paging and sorting parameters, always present
//! 2. Free-text search, when non-empty
//! 3. Multi-select categories, one pair per selected option
//! 4. Job scoping, when a job is selected
//!
//! ## Example Usage
//! ```ignore
//! use query::{build_query, QueryBuilder};
//!
//! let params = build_query(&filters, &cursor);
//! println!("/api/candidates?{}", params);
//! ```

pub mod encoders;
pub mod params;
pub mod query_builder;
pub mod traits;

// Re-export main types
pub use params::QueryParams;
pub use query_builder::{QueryBuilder, build_query};
pub use traits::ParamEncoder;
