//! Integration tests for query construction.
//!
//! These tests drive the public builder with realistic filter snapshots and
//! check the exact parameter lists sent to the endpoint.

use candidate_model::{CategoryKey, FilterUpdate, Filters, PaginationCursor, SortBy, SortOrder};
use query::{QueryBuilder, build_query};

fn create_busy_filters() -> Filters {
    Filters {
        search: "engineer".to_string(),
        application_type: ["Referral", "Agency"].into_iter().collect(),
        source: ["Indeed"].into_iter().collect(),
        responsibility: ["Manager"].into_iter().collect(),
        pipeline_tasks: ["Offer Sent", "Interview Scheduled"].into_iter().collect(),
        education: ["PhD"].into_iter().collect(),
        job_id: Some("job-7".to_string()),
        sort_by: SortBy::LastActivity,
        sort_order: SortOrder::Desc,
    }
}

#[test]
fn test_full_query_order() {
    let params = build_query(&create_busy_filters(), &PaginationCursor::new(4));
    let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();

    assert_eq!(
        keys,
        vec![
            "page",
            "per_page",
            "sort_by",
            "sort_order",
            "search",
            "responsibility",
            "pipeline_task",
            "pipeline_task",
            "education",
            "application_type",
            "application_type",
            "source",
            "job_id",
        ]
    );
    assert_eq!(params.get_all("pipeline_task"), vec!["Offer Sent", "Interview Scheduled"]);
    assert_eq!(params.get_all("application_type"), vec!["Referral", "Agency"]);
}

#[test]
fn test_identical_inputs_give_identical_output() {
    let filters = create_busy_filters();
    let cursor = PaginationCursor::new(2);
    let builder = QueryBuilder::standard();

    let first = builder.build(&filters, &cursor).to_query_string();
    // Unrelated builds in between must not influence the result
    let _ = builder.build(&Filters::default(), &PaginationCursor::new(9));
    let second = builder.build(&filters.clone(), &cursor).to_query_string();
    let third = build_query(&filters, &cursor).to_query_string();

    assert_eq!(first, second);
    assert_eq!(first, third);
}

#[test]
fn test_selection_order_follows_ticking_order() {
    let filters = Filters::default();
    let sources = filters
        .selection(CategoryKey::Source)
        .toggled("Glassdoor")
        .toggled("LinkedIn");
    let filters = filters.apply(FilterUpdate::selection(CategoryKey::Source, sources));

    let params = build_query(&filters, &PaginationCursor::default());
    assert_eq!(params.get_all("source"), vec!["Glassdoor", "LinkedIn"]);
}

#[test]
fn test_values_are_not_normalized() {
    let filters = Filters {
        search: " MiXeD ".to_string(),
        education: ["high school"].into_iter().collect(),
        ..Filters::default()
    };

    let params = build_query(&filters, &PaginationCursor::default());
    assert_eq!(params.get("search"), Some(" MiXeD "));
    assert_eq!(params.get("education"), Some("high school"));
}
