//! Free-text search parameter.

use crate::params::QueryParams;
use crate::traits::ParamEncoder;
use candidate_model::{Filters, PaginationCursor};

/// Emits `search` only when the search text is non-empty.
///
/// The text is sent exactly as typed: no trimming, no case folding.
pub struct SearchEncoder;

impl ParamEncoder for SearchEncoder {
    fn name(&self) -> &str {
        "SearchEncoder"
    }

    fn encode(
        &self,
        mut params: QueryParams,
        filters: &Filters,
        _cursor: &PaginationCursor,
    ) -> QueryParams {
        if !filters.search.is_empty() {
            params.push("search", filters.search.as_str());
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_encoder_skips_empty_text() {
        let params = SearchEncoder.encode(QueryParams::new(), &Filters::default(), &PaginationCursor::default());
        assert!(params.is_empty());
    }

    #[test]
    fn test_search_encoder_sends_text_verbatim() {
        let filters = Filters {
            search: "  Ada ".to_string(),
            ..Filters::default()
        };
        let params = SearchEncoder.encode(QueryParams::new(), &filters, &PaginationCursor::default());
        assert_eq!(params.get("search"), Some("  Ada "));
    }
}
