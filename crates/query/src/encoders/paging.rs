//! Paging and sorting parameters.
//!
//! These four are sent on every request, so this is always the first
//! stage.

use crate::params::QueryParams;
use crate::traits::ParamEncoder;
use candidate_model::{Filters, PaginationCursor};

/// Emits `page`, `per_page`, `sort_by`, `sort_order`.
pub struct PagingEncoder {
    per_page: u32,
}

impl PagingEncoder {
    /// # Arguments
    /// * `per_page` - Page size sent with every request (the listing uses 5)
    pub fn new(per_page: u32) -> Self {
        Self { per_page }
    }
}

impl ParamEncoder for PagingEncoder {
    fn name(&self) -> &str {
        "PagingEncoder"
    }

    fn encode(
        &self,
        mut params: QueryParams,
        filters: &Filters,
        cursor: &PaginationCursor,
    ) -> QueryParams {
        params.push("page", cursor.current_page().to_string());
        params.push("per_page", self.per_page.to_string());
        params.push("sort_by", filters.sort_by.as_str());
        params.push("sort_order", filters.sort_order.as_str());
        params
    }
}
