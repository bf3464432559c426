//! Core domain types for the candidate listing.
//!
//! This module defines the values shared by every other crate:
//! - `Filters` and its ordered `SelectionSet`s
//! - `PaginationCursor` and the page clamping rule
//! - `Candidate`, the decoded `CandidatePage` and the `ResultSnapshot`
//!
//! `Filters` is never edited in place once published: updates go through
//! `Filters::apply`, which borrows the current value and returns a new one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ModelError;

/// Fixed page size requested from the endpoint
pub const PER_PAGE: u32 = 5;

// =============================================================================
// Selection Sets
// =============================================================================

/// Insertion-ordered set of selected filter options.
///
/// The order in which options were ticked is the order they are sent to the
/// endpoint, so this is a `Vec` with a uniqueness check rather than a
/// `HashSet`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SelectionSet {
    entries: Vec<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry at the end. Returns `false` if it was already present.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.contains(&value) {
            return false;
        }
        self.entries.push(value);
        true
    }

    /// Remove an entry, keeping the order of the rest. Returns `false` if it
    /// wasn't present.
    pub fn remove(&mut self, value: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry != value);
        self.entries.len() != before
    }

    /// New set with `value` flipped: appended if absent, removed if present.
    pub fn toggled(&self, value: &str) -> Self {
        let mut next = self.clone();
        if !next.remove(value) {
            next.entries.push(value.to_string());
        }
        next
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries.iter().any(|entry| entry == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<String>> for SelectionSet {
    fn from(values: Vec<String>) -> Self {
        values.into_iter().collect()
    }
}

impl From<SelectionSet> for Vec<String> {
    fn from(set: SelectionSet) -> Self {
        set.entries
    }
}

/// Duplicates are dropped, first occurrence wins.
impl<S: Into<String>> FromIterator<S> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SelectionSet::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

// =============================================================================
// Filter Categories
// =============================================================================

/// The multi-select filter fields.
///
/// The serde name is the field name used in catalog files; `param_name` is
/// the query parameter the endpoint expects, which differs for pipeline
/// tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKey {
    ApplicationType,
    Source,
    Responsibility,
    PipelineTasks,
    Education,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 5] = [
        CategoryKey::ApplicationType,
        CategoryKey::Source,
        CategoryKey::Responsibility,
        CategoryKey::PipelineTasks,
        CategoryKey::Education,
    ];

    /// Name used in catalog files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKey::ApplicationType => "application_type",
            CategoryKey::Source => "source",
            CategoryKey::Responsibility => "responsibility",
            CategoryKey::PipelineTasks => "pipeline_tasks",
            CategoryKey::Education => "education",
        }
    }

    /// Repeated query parameter name for this category
    pub fn param_name(&self) -> &'static str {
        match self {
            CategoryKey::PipelineTasks => "pipeline_task",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `application_type`, `application-type`, `Application Type`,
/// and the singular `pipeline_task`.
impl FromStr for CategoryKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "application_type" => Ok(CategoryKey::ApplicationType),
            "source" => Ok(CategoryKey::Source),
            "responsibility" => Ok(CategoryKey::Responsibility),
            "pipeline_tasks" | "pipeline_task" => Ok(CategoryKey::PipelineTasks),
            "education" => Ok(CategoryKey::Education),
            _ => Err(ModelError::UnknownCategory(s.to_string())),
        }
    }
}

// =============================================================================
// Sorting
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    LastActivity,
    Name,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::LastActivity => "last_activity",
            SortBy::Name => "name",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortBy::LastActivity => "Last Activity",
            SortBy::Name => "Name",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortBy::LastActivity => SortBy::Name,
            SortBy::Name => SortBy::LastActivity,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Desc => "new to old",
            SortOrder::Asc => "old to new",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

// =============================================================================
// Filters
// =============================================================================

/// Snapshot of every user-chosen search and filter criterion.
///
/// `Default` is the canonical reset value: empty search, empty sets, no
/// job id, sorted by last activity, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filters {
    pub search: String,
    pub application_type: SelectionSet,
    pub source: SelectionSet,
    pub responsibility: SelectionSet,
    pub pipeline_tasks: SelectionSet,
    pub education: SelectionSet,
    pub job_id: Option<String>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

/// Replacement for exactly one `Filters` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    Search(String),
    ApplicationType(SelectionSet),
    Source(SelectionSet),
    Responsibility(SelectionSet),
    PipelineTasks(SelectionSet),
    Education(SelectionSet),
    JobId(Option<String>),
    SortBy(SortBy),
    SortOrder(SortOrder),
}

impl FilterUpdate {
    /// Update for whichever selection field `key` names
    pub fn selection(key: CategoryKey, set: SelectionSet) -> Self {
        match key {
            CategoryKey::ApplicationType => FilterUpdate::ApplicationType(set),
            CategoryKey::Source => FilterUpdate::Source(set),
            CategoryKey::Responsibility => FilterUpdate::Responsibility(set),
            CategoryKey::PipelineTasks => FilterUpdate::PipelineTasks(set),
            CategoryKey::Education => FilterUpdate::Education(set),
        }
    }
}

impl Filters {
    /// Return a new value with one field replaced; `self` is untouched.
    ///
    /// An empty job id is the same as no job id.
    pub fn apply(&self, update: FilterUpdate) -> Filters {
        let mut next = self.clone();
        match update {
            FilterUpdate::Search(search) => next.search = search,
            FilterUpdate::ApplicationType(set) => next.application_type = set,
            FilterUpdate::Source(set) => next.source = set,
            FilterUpdate::Responsibility(set) => next.responsibility = set,
            FilterUpdate::PipelineTasks(set) => next.pipeline_tasks = set,
            FilterUpdate::Education(set) => next.education = set,
            FilterUpdate::JobId(job_id) => next.job_id = job_id.filter(|id| !id.is_empty()),
            FilterUpdate::SortBy(sort_by) => next.sort_by = sort_by,
            FilterUpdate::SortOrder(sort_order) => next.sort_order = sort_order,
        }
        next
    }

    /// Both sort fields flipped together
    pub fn with_sort_toggled(&self) -> Filters {
        Filters {
            sort_by: self.sort_by.toggled(),
            sort_order: self.sort_order.toggled(),
            ..self.clone()
        }
    }

    pub fn selection(&self, key: CategoryKey) -> &SelectionSet {
        match key {
            CategoryKey::ApplicationType => &self.application_type,
            CategoryKey::Source => &self.source,
            CategoryKey::Responsibility => &self.responsibility,
            CategoryKey::PipelineTasks => &self.pipeline_tasks,
            CategoryKey::Education => &self.education,
        }
    }

    /// Text for the sort control, e.g. "Last Activity (new to old)"
    pub fn sort_label(&self) -> String {
        format!("{} ({})", self.sort_by.label(), self.sort_order.label())
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Clamp `target` into `[1, total_pages]`; a `total_pages` of 0 is treated
/// as 1.
pub fn clamp_page(target: u32, total_pages: u32) -> u32 {
    target.clamp(1, total_pages.max(1))
}

/// Current page within the result set. Always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaginationCursor {
    current_page: u32,
}

impl PaginationCursor {
    pub fn new(current_page: u32) -> Self {
        Self {
            current_page: current_page.max(1),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Cursor moved to `target`, clamped to the known page count
    pub fn clamped_to(&self, target: u32, total_pages: u32) -> Self {
        Self {
            current_page: clamp_page(target, total_pages),
        }
    }
}

impl Default for PaginationCursor {
    fn default() -> Self {
        Self::new(1)
    }
}

// =============================================================================
// Candidates and Results
// =============================================================================

/// Identifier of a candidate record; the endpoint may use either form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandidateId {
    Number(u64),
    Text(String),
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateId::Number(n) => write!(f, "{}", n),
            CandidateId::Text(s) => f.write_str(s),
        }
    }
}

/// A candidate record. Only `id` is interpreted; everything else is kept
/// as the endpoint sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Candidate {
    pub fn new(id: CandidateId) -> Self {
        Self {
            id,
            fields: Map::new(),
        }
    }

    /// Builder-style field setter, mostly for tests and fixtures
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// A field's value if it is a JSON string
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

/// Decoded body of `GET /api/candidates`.
///
/// The endpoint also echoes its request parameters; those are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CandidatePage {
    pub candidates: Vec<Candidate>,
    pub total_pages: u32,
    pub total: u64,
}

/// Most recently loaded results plus pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSnapshot {
    pub candidates: Vec<Candidate>,
    /// Always >= 1
    pub total_pages: u32,
    pub total: u64,
    pub loading: bool,
}

impl ResultSnapshot {
    /// The shape every failed load collapses to
    pub fn empty() -> Self {
        Self {
            candidates: Vec::new(),
            total_pages: 1,
            total: 0,
            loading: false,
        }
    }

    /// Snapshot replacing everything with a decoded page
    pub fn from_page(page: CandidatePage) -> Self {
        Self {
            candidates: page.candidates,
            total_pages: page.total_pages.max(1),
            total: page.total,
            loading: false,
        }
    }
}

impl Default for ResultSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_set_keeps_insertion_order_and_uniqueness() {
        let set: SelectionSet = ["Master", "PhD", "Master", "Bachelor"].into_iter().collect();
        let entries: Vec<&str> = set.iter().collect();
        assert_eq!(entries, vec!["Master", "PhD", "Bachelor"]);
    }

    #[test]
    fn test_selection_set_toggle_returns_new_value() {
        let set: SelectionSet = ["Referral"].into_iter().collect();
        let added = set.toggled("Agency");
        let removed = added.toggled("Referral");

        assert_eq!(set.len(), 1);
        assert_eq!(added.iter().collect::<Vec<_>>(), vec!["Referral", "Agency"]);
        assert_eq!(removed.iter().collect::<Vec<_>>(), vec!["Agency"]);
    }

    #[test]
    fn test_selection_set_deserializes_without_duplicates() {
        let set: SelectionSet = serde_json::from_str(r#"["a", "b", "a"]"#).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_default_filters_are_canonical_reset() {
        let filters = Filters::default();
        assert!(filters.search.is_empty());
        assert!(filters.application_type.is_empty());
        assert!(filters.education.is_empty());
        assert_eq!(filters.job_id, None);
        assert_eq!(filters.sort_by, SortBy::LastActivity);
        assert_eq!(filters.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_apply_replaces_only_one_field() {
        let original = Filters::default();
        let updated = original.apply(FilterUpdate::Search("rust".to_string()));

        assert_eq!(updated.search, "rust");
        assert_eq!(original.search, "");
        assert_eq!(
            Filters {
                search: String::new(),
                ..updated.clone()
            },
            original
        );
    }

    #[test]
    fn test_empty_job_id_is_absent() {
        let filters = Filters::default().apply(FilterUpdate::JobId(Some(String::new())));
        assert_eq!(filters.job_id, None);
    }

    #[test]
    fn test_sort_toggle_flips_both_fields() {
        let filters = Filters::default().with_sort_toggled();
        assert_eq!(filters.sort_by, SortBy::Name);
        assert_eq!(filters.sort_order, SortOrder::Asc);
        assert_eq!(filters.sort_label(), "Name (old to new)");

        let back = filters.with_sort_toggled();
        assert_eq!(back.sort_label(), "Last Activity (new to old)");
    }

    #[test]
    fn test_category_key_parsing() {
        assert_eq!("application-type".parse::<CategoryKey>().unwrap(), CategoryKey::ApplicationType);
        assert_eq!("Pipeline Tasks".parse::<CategoryKey>().unwrap(), CategoryKey::PipelineTasks);
        assert_eq!("pipeline_task".parse::<CategoryKey>().unwrap(), CategoryKey::PipelineTasks);
        assert!("colour".parse::<CategoryKey>().is_err());
        assert_eq!(CategoryKey::PipelineTasks.param_name(), "pipeline_task");
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 4), 1);
        assert_eq!(clamp_page(3, 4), 3);
        assert_eq!(clamp_page(9, 4), 4);
        assert_eq!(clamp_page(5, 0), 1);
        assert_eq!(PaginationCursor::new(0).current_page(), 1);
    }

    #[test]
    fn test_candidate_page_decoding() {
        let body = r#"{
            "candidates": [
                {"id": 7, "name": "Ada Lovelace", "position": "Engineer"},
                {"id": "c-8", "name": "Grace Hopper"}
            ],
            "total": 12,
            "page": 1,
            "per_page": 5,
            "total_pages": 3
        }"#;

        let page: CandidatePage = serde_json::from_str(body).unwrap();
        assert_eq!(page.total, 12);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.candidates[0].id, CandidateId::Number(7));
        assert_eq!(page.candidates[0].text("name"), Some("Ada Lovelace"));
        assert_eq!(page.candidates[1].id.to_string(), "c-8");
    }

    #[test]
    fn test_snapshot_from_page_floors_total_pages() {
        let snapshot = ResultSnapshot::from_page(CandidatePage {
            candidates: vec![],
            total_pages: 0,
            total: 0,
        });
        assert_eq!(snapshot.total_pages, 1);
        assert!(!snapshot.loading);
    }
}
