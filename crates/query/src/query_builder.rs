//! The QueryBuilder chains parameter encoders.
//!
//! This module provides the main QueryBuilder struct that composes
//! encoders using the builder pattern, plus the standard chain used for
//! `GET /api/candidates`.

use crate::encoders::{JobIdEncoder, PagingEncoder, SearchEncoder, SelectionEncoder};
use crate::params::QueryParams;
use crate::traits::ParamEncoder;
use candidate_model::{CategoryKey, Filters, PER_PAGE, PaginationCursor};

/// Order in which the multi-select categories are sent
const SELECTION_ORDER: [CategoryKey; 5] = [
    CategoryKey::Responsibility,
    CategoryKey::PipelineTasks,
    CategoryKey::Education,
    CategoryKey::ApplicationType,
    CategoryKey::Source,
];

/// Chains encoders together into a query construction pipeline.
///
/// ## Usage
/// ```ignore
/// let builder = QueryBuilder::new()
///     .add_encoder(PagingEncoder::new(PER_PAGE))
///     .add_encoder(SearchEncoder)
///     .add_encoder(JobIdEncoder);
///
/// let params = builder.build(&filters, &cursor);
/// ```
pub struct QueryBuilder {
    encoders: Vec<Box<dyn ParamEncoder>>,
}

impl QueryBuilder {
    /// Create a new empty QueryBuilder.
    pub fn new() -> Self {
        Self {
            encoders: Vec::new(),
        }
    }

    /// The chain for the candidates endpoint:
    /// 1. page, per_page, sort_by, sort_order
    /// 2. search (if non-empty)
    /// 3. responsibility, pipeline_task, education, application_type, source
    ///    (repeated, if selected)
    /// 4. job_id (if set)
    pub fn standard() -> Self {
        let builder = QueryBuilder::new()
            .add_encoder(PagingEncoder::new(PER_PAGE))
            .add_encoder(SearchEncoder);

        SELECTION_ORDER
            .into_iter()
            .fold(builder, |builder, key| builder.add_encoder(SelectionEncoder::new(key)))
            .add_encoder(JobIdEncoder)
    }

    /// Add an encoder to the chain (builder pattern).
    ///
    /// # Arguments
    /// * `encoder` - Any type implementing the ParamEncoder trait
    ///
    /// # Returns
    /// Self for method chaining
    pub fn add_encoder(mut self, encoder: impl ParamEncoder + 'static) -> Self {
        self.encoders.push(Box::new(encoder));
        self
    }

    /// Run every encoder in order.
    ///
    /// The output depends only on `filters` and `cursor`, never on earlier
    /// calls, so equal inputs always give equal parameter lists.
    pub fn build(&self, filters: &Filters, cursor: &PaginationCursor) -> QueryParams {
        let mut params = QueryParams::new();
        for encoder in &self.encoders {
            let before = params.len();
            params = encoder.encode(params, filters, cursor);
            tracing::trace!(
                "Encoder applied: {} (added {} params)",
                encoder.name(),
                params.len() - before
            );
        }
        params
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::standard()
    }
}

/// Build the candidates query with the standard chain.
pub fn build_query(filters: &Filters, cursor: &PaginationCursor) -> QueryParams {
    QueryBuilder::standard().build(filters, cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use candidate_model::{SortBy, SortOrder};

    #[test]
    fn test_empty_builder() {
        let builder = QueryBuilder::new();
        let params = builder.build(&Filters::default(), &PaginationCursor::default());
        assert!(params.is_empty());
    }

    #[test]
    fn test_default_filters_only_send_paging() {
        let params = build_query(&Filters::default(), &PaginationCursor::default());
        assert_eq!(
            params.to_query_string(),
            "page=1&per_page=5&sort_by=last_activity&sort_order=desc"
        );
    }

    #[test]
    fn test_documented_example() {
        let filters = Filters {
            search: "foo".to_string(),
            application_type: ["Direct"].into_iter().collect(),
            sort_by: SortBy::Name,
            sort_order: SortOrder::Asc,
            ..Filters::default()
        };

        let params = build_query(&filters, &PaginationCursor::new(2));
        let pairs: Vec<(&str, &str)> = params.iter().collect();

        assert_eq!(
            pairs,
            vec![
                ("page", "2"),
                ("per_page", "5"),
                ("sort_by", "name"),
                ("sort_order", "asc"),
                ("search", "foo"),
                ("application_type", "Direct"),
            ]
        );
    }

    #[test]
    fn test_custom_chain() {
        let builder = QueryBuilder::new().add_encoder(JobIdEncoder);
        let filters = Filters {
            job_id: Some("j1".to_string()),
            search: "ignored".to_string(),
            ..Filters::default()
        };
        let params = builder.build(&filters, &PaginationCursor::default());
        assert_eq!(params.to_query_string(), "job_id=j1");
    }
}
