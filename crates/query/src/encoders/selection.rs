//! Repeated parameters for the multi-select filter categories.

use crate::params::QueryParams;
use crate::traits::ParamEncoder;
use candidate_model::{CategoryKey, Filters, PaginationCursor};

/// Emits one `<param>=<option>` pair per selected option of a category.
///
/// ## Algorithm
/// Walk the category's SelectionSet in insertion order, pushing one pair
/// per entry. An empty set contributes nothing.
pub struct SelectionEncoder {
    key: CategoryKey,
}

impl SelectionEncoder {
    pub fn new(key: CategoryKey) -> Self {
        Self { key }
    }
}

impl ParamEncoder for SelectionEncoder {
    fn name(&self) -> &str {
        self.key.as_str()
    }

    fn encode(
        &self,
        mut params: QueryParams,
        filters: &Filters,
        _cursor: &PaginationCursor,
    ) -> QueryParams {
        let param_name = self.key.param_name();
        for option in filters.selection(self.key).iter() {
            params.push(param_name, option);
        }
        params
    }
}
