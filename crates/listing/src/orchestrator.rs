//! # Filter State Orchestrator
//!
//! This module owns the (Filters, PaginationCursor) pair for a listing:
//! 1. Apply a filter update, producing a new Filters value
//! 2. Move the page cursor, clamped to the known page count
//! 3. Decide whether the change needs a reload
//! 4. Hand back a `LoadRequest` describing what to load
//!
//! The orchestrator is the only writer of filters and cursor. It never
//! performs I/O; callers feed each `LoadRequest` to the loader and report
//! the resulting page count back through `observe_total_pages`.

use std::time::Duration;

use tracing::{debug, info};

use candidate_model::{CategoryKey, FilterUpdate, Filters, PaginationCursor, clamp_page};

use crate::debounce::DEFAULT_QUIET_PERIOD;

/// Settings for a listing session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingConfig {
    /// Quiet period before typed search text is committed
    pub debounce: Duration,
    /// Jump back to page 1 whenever a filter changes. Off by default: a
    /// filter change reloads the page currently shown.
    pub reset_page_on_filter_change: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_QUIET_PERIOD,
            reset_page_on_filter_change: false,
        }
    }
}

/// What to load: one (filters, page) combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadRequest {
    pub filters: Filters,
    pub cursor: PaginationCursor,
}

/// Single owner of the listing's filters and page cursor.
#[derive(Debug, Clone)]
pub struct FilterStateOrchestrator {
    filters: Filters,
    cursor: PaginationCursor,
    total_pages: u32,
    reset_page_on_filter_change: bool,
}

impl FilterStateOrchestrator {
    /// Start with default filters on page 1 of 1
    pub fn new(config: &ListingConfig) -> Self {
        Self {
            filters: Filters::default(),
            cursor: PaginationCursor::default(),
            total_pages: 1,
            reset_page_on_filter_change: config.reset_page_on_filter_change,
        }
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn cursor(&self) -> PaginationCursor {
        self.cursor
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// The request for the current (filters, page) pair
    pub fn current_request(&self) -> LoadRequest {
        LoadRequest {
            filters: self.filters.clone(),
            cursor: self.cursor,
        }
    }

    /// Replace exactly one filter field.
    ///
    /// # Returns
    /// * `Some(LoadRequest)` - The filters changed and must be reloaded
    /// * `None` - The update produced an identical value
    pub fn update_filter(&mut self, update: FilterUpdate) -> Option<LoadRequest> {
        let next = self.filters.apply(update);
        self.replace_filters(next)
    }

    /// Flip one option of a multi-select category
    pub fn toggle_option(&mut self, key: CategoryKey, option: &str) -> Option<LoadRequest> {
        let set = self.filters.selection(key).toggled(option);
        self.update_filter(FilterUpdate::selection(key, set))
    }

    /// Flip sort field and sort direction in a single update
    pub fn toggle_sort(&mut self) -> Option<LoadRequest> {
        let next = self.filters.with_sort_toggled();
        self.replace_filters(next)
    }

    /// Back to the canonical default filters
    pub fn reset_filters(&mut self) -> Option<LoadRequest> {
        self.replace_filters(Filters::default())
    }

    /// Move to page `page`, clamped to `[1, total_pages]`.
    ///
    /// Returns `None` without touching anything when the clamped page is
    /// the current one.
    pub fn set_page(&mut self, page: u32) -> Option<LoadRequest> {
        let target = clamp_page(page, self.total_pages);
        if target == self.cursor.current_page() {
            debug!("Page {} requested, already on page {}", page, target);
            return None;
        }

        self.cursor = self.cursor.clamped_to(target, self.total_pages);
        info!("Moved to page {} of {}", target, self.total_pages);
        Some(self.current_request())
    }

    /// Record the page count reported by the latest applied load.
    ///
    /// The cursor is left where it is; clamping happens on the next page
    /// change.
    pub fn observe_total_pages(&mut self, total_pages: u32) {
        self.total_pages = total_pages.max(1);
    }

    /// Single write path for filter changes
    fn replace_filters(&mut self, next: Filters) -> Option<LoadRequest> {
        if next == self.filters {
            debug!("Filter update produced no change");
            return None;
        }

        self.filters = next;
        if self.reset_page_on_filter_change {
            self.cursor = PaginationCursor::default();
        }

        info!(
            "Filters changed, reloading page {}",
            self.cursor.current_page()
        );
        Some(self.current_request())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candidate_model::{SortBy, SortOrder};

    fn orchestrator() -> FilterStateOrchestrator {
        FilterStateOrchestrator::new(&ListingConfig::default())
    }

    // ============================================================================
    // Unit Tests: filter updates
    // ============================================================================

    #[test]
    fn test_update_filter_replaces_one_field() {
        let mut orchestrator = orchestrator();
        let before = orchestrator.filters().clone();

        let request = orchestrator
            .update_filter(FilterUpdate::JobId(Some("job-3".to_string())))
            .expect("a changed filter should request a reload");

        assert_eq!(request.filters.job_id.as_deref(), Some("job-3"));
        assert_eq!(
            Filters {
                job_id: None,
                ..request.filters.clone()
            },
            before
        );
        assert_eq!(orchestrator.filters(), &request.filters);
    }

    #[test]
    fn test_identical_update_is_a_no_op() {
        let mut orchestrator = orchestrator();
        assert!(orchestrator.update_filter(FilterUpdate::Search(String::new())).is_none());
        assert!(orchestrator.reset_filters().is_none());
    }

    #[test]
    fn test_toggle_sort_flips_both_fields_at_once() {
        let mut orchestrator = orchestrator();
        let request = orchestrator.toggle_sort().unwrap();

        assert_eq!(request.filters.sort_by, SortBy::Name);
        assert_eq!(request.filters.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_toggle_option_adds_then_removes() {
        let mut orchestrator = orchestrator();
        orchestrator.toggle_option(CategoryKey::Education, "PhD").unwrap();
        orchestrator.toggle_option(CategoryKey::Education, "Master").unwrap();
        assert_eq!(
            orchestrator.filters().education.iter().collect::<Vec<_>>(),
            vec!["PhD", "Master"]
        );

        orchestrator.toggle_option(CategoryKey::Education, "PhD").unwrap();
        assert_eq!(
            orchestrator.filters().education.iter().collect::<Vec<_>>(),
            vec!["Master"]
        );
    }

    #[test]
    fn test_reset_filters_returns_canonical_default() {
        let mut orchestrator = orchestrator();
        orchestrator.update_filter(FilterUpdate::Search("ada".to_string()));
        orchestrator.toggle_sort();

        let request = orchestrator.reset_filters().unwrap();
        assert_eq!(request.filters, Filters::default());
    }

    // ============================================================================
    // Unit Tests: paging
    // ============================================================================

    #[test]
    fn test_set_page_clamps_to_total_pages() {
        let mut orchestrator = orchestrator();
        orchestrator.observe_total_pages(4);

        let request = orchestrator.set_page(10).unwrap();
        assert_eq!(request.cursor.current_page(), 4);

        let request = orchestrator.set_page(0).unwrap();
        assert_eq!(request.cursor.current_page(), 1);
    }

    #[test]
    fn test_set_page_to_current_page_does_not_reload() {
        let mut orchestrator = orchestrator();
        orchestrator.observe_total_pages(3);
        orchestrator.set_page(2).unwrap();

        assert!(orchestrator.set_page(2).is_none());
        assert_eq!(orchestrator.cursor().current_page(), 2);
    }

    #[test]
    fn test_single_page_listing_never_moves() {
        let mut orchestrator = orchestrator();
        assert!(orchestrator.set_page(2).is_none());
    }

    #[test]
    fn test_filter_change_keeps_current_page_by_default() {
        let mut orchestrator = orchestrator();
        orchestrator.observe_total_pages(5);
        orchestrator.set_page(3).unwrap();

        let request = orchestrator
            .update_filter(FilterUpdate::Search("lead".to_string()))
            .unwrap();
        assert_eq!(request.cursor.current_page(), 3);
    }

    #[test]
    fn test_filter_change_can_reset_page() {
        let mut orchestrator = FilterStateOrchestrator::new(&ListingConfig {
            reset_page_on_filter_change: true,
            ..ListingConfig::default()
        });
        orchestrator.observe_total_pages(5);
        orchestrator.set_page(3).unwrap();

        let request = orchestrator.toggle_sort().unwrap();
        assert_eq!(request.cursor.current_page(), 1);
    }

    #[test]
    fn test_observe_total_pages_floors_at_one() {
        let mut orchestrator = orchestrator();
        orchestrator.observe_total_pages(0);
        assert_eq!(orchestrator.total_pages(), 1);
    }
}
