//! Listing crate for the candidate list client.
//!
//! This crate contains the client-side state orchestration: filter and
//! page ownership, debounced search, result loading, display state and
//! pagination labels, plus the session loop that ties them together.

pub mod debounce;
pub mod loader;
pub mod orchestrator;
pub mod pagination;
pub mod session;
pub mod view;

pub use debounce::{DEFAULT_QUIET_PERIOD, SearchDebouncer};
pub use loader::{Completion, LoadCompleted, LoadOutcome, LoadTicket, ResultLoader};
pub use orchestrator::{FilterStateOrchestrator, ListingConfig, LoadRequest};
pub use pagination::{PageToken, Paginator, page_labels};
pub use session::{ListSession, SessionStep, SessionView, UserAction};
pub use view::{ListView, ListViewState, result_summary};
