//! Benchmarks for query construction
//!
//! Run with: cargo bench --package query

use candidate_model::{Filters, PaginationCursor};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use query::QueryBuilder;

fn busy_filters() -> Filters {
    Filters {
        search: "engineer".to_string(),
        application_type: ["Referral", "Direct", "Agency"].into_iter().collect(),
        source: ["LinkedIn", "Indeed"].into_iter().collect(),
        education: ["Bachelor", "Master", "PhD"].into_iter().collect(),
        job_id: Some("job-7".to_string()),
        ..Filters::default()
    }
}

fn bench_standard_build(c: &mut Criterion) {
    let builder = QueryBuilder::standard();
    let filters = busy_filters();
    let cursor = PaginationCursor::new(3);

    c.bench_function("standard_build", |b| {
        b.iter(|| {
            let params = builder.build(black_box(&filters), black_box(&cursor));
            black_box(params)
        })
    });
}

fn bench_query_string(c: &mut Criterion) {
    let params = QueryBuilder::standard().build(&busy_filters(), &PaginationCursor::new(3));

    c.bench_function("to_query_string", |b| {
        b.iter(|| black_box(params.to_query_string()))
    });
}

criterion_group!(benches, bench_standard_build, bench_query_string);
criterion_main!(benches);
