//! Job scoping parameter.

use crate::params::QueryParams;
use crate::traits::ParamEncoder;
use candidate_model::{Filters, PaginationCursor};

/// Emits `job_id` when a job is selected. An empty id counts as no job.
pub struct JobIdEncoder;

impl ParamEncoder for JobIdEncoder {
    fn name(&self) -> &str {
        "JobIdEncoder"
    }

    fn encode(
        &self,
        mut params: QueryParams,
        filters: &Filters,
        _cursor: &PaginationCursor,
    ) -> QueryParams {
        if let Some(job_id) = filters.job_id.as_deref().filter(|id| !id.is_empty()) {
            params.push("job_id", job_id);
        }
        params
    }
}
