//! Core trait for query construction.
//!
//! This module defines the ParamEncoder trait that lets each group of
//! request parameters be produced by its own small, composable stage.

use candidate_model::{Filters, PaginationCursor};

use crate::params::QueryParams;

/// One stage of query construction.
///
/// All encoders must implement this trait to be used in the QueryBuilder.
///
/// ## Design Note
/// - `Send + Sync` allows a built QueryBuilder to be shared across tasks
/// - Encoders take ownership of the params and return them extended, so
///   earlier stages' pairs are never reordered
/// - Encoders are pure: the output depends only on the inputs
pub trait ParamEncoder: Send + Sync {
    /// Returns the name of this encoder (for logging/debugging)
    fn name(&self) -> &str;

    /// Append this stage's parameters.
    ///
    /// # Arguments
    /// * `params` - Parameters produced by earlier stages (takes ownership)
    /// * `filters` - Current filter snapshot
    /// * `cursor` - Current page
    fn encode(
        &self,
        params: QueryParams,
        filters: &Filters,
        cursor: &PaginationCursor,
    ) -> QueryParams;
}
