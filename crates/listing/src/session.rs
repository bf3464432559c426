//! # Listing Session
//!
//! Wires the listing components into one event loop:
//! 1. User actions update filters or page through the orchestrator
//! 2. Search keystrokes go through the debouncer; commits update filters
//! 3. Every accepted change issues a load on its own task
//! 4. Completions are applied by the loader (stale ones dropped)
//! 5. The view state is re-derived and the caller re-renders
//!
//! Everything runs on one task; the only concurrency is the spawned
//! request and timer tasks, which report back over channels.

use tokio::sync::mpsc;
use tracing::{debug, info};

use api_client::CandidateApi;
use candidate_model::{CategoryKey, FilterUpdate, Filters, PaginationCursor, ResultSnapshot};

use crate::debounce::SearchDebouncer;
use crate::loader::{Completion, LoadCompleted, LoadOutcome, ResultLoader};
use crate::orchestrator::{FilterStateOrchestrator, ListingConfig, LoadRequest};
use crate::pagination::Paginator;
use crate::view::{ListView, ListViewState};

/// Things a user can do to the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// The search box now contains this text
    SearchInput(String),
    ToggleOption { category: CategoryKey, option: String },
    SetJobId(Option<String>),
    ToggleSort,
    ResetFilters,
    GoToPage(u32),
    NextPage,
    PreviousPage,
}

/// What one turn of the event loop did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    /// An action was handled; `reloading` says whether it issued a load
    Action { reloading: bool },
    /// Debounced search text was committed and a load issued
    SearchCommitted,
    LoadApplied,
    LoadDiscarded,
    /// The action channel closed
    Closed,
}

impl SessionStep {
    /// Whether visible state may have changed
    pub fn needs_render(&self) -> bool {
        match self {
            SessionStep::Action { reloading } => *reloading,
            SessionStep::SearchCommitted | SessionStep::LoadApplied => true,
            SessionStep::LoadDiscarded | SessionStep::Closed => false,
        }
    }
}

/// Read-only view of the session for rendering
#[derive(Debug)]
pub struct SessionView<'a> {
    pub filters: &'a Filters,
    pub search_input: &'a str,
    pub cursor: PaginationCursor,
    pub snapshot: &'a ResultSnapshot,
    pub state: ListViewState,
    pub paginator: Paginator,
    pub last_outcome: Option<&'a LoadOutcome>,
}

/// A running candidate listing backed by `A`.
pub struct ListSession<A> {
    api: A,
    orchestrator: FilterStateOrchestrator,
    debouncer: SearchDebouncer,
    loader: ResultLoader,
    view: ListView,
    completions_tx: mpsc::UnboundedSender<LoadCompleted>,
    completions_rx: mpsc::UnboundedReceiver<LoadCompleted>,
}

impl<A> ListSession<A>
where
    A: CandidateApi + Clone + 'static,
{
    pub fn new(api: A, config: &ListingConfig) -> Self {
        let orchestrator = FilterStateOrchestrator::new(config);
        let debouncer = SearchDebouncer::new(orchestrator.filters().search.clone(), config.debounce);
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Self {
            api,
            orchestrator,
            debouncer,
            loader: ResultLoader::new(),
            view: ListView::new(),
            completions_tx,
            completions_rx,
        }
    }

    /// Issue the initial load for the default filters
    pub fn start(&mut self) {
        info!("Starting candidate listing");
        let request = self.orchestrator.current_request();
        self.issue_load(request);
    }

    pub fn view(&self) -> SessionView<'_> {
        let cursor = self.orchestrator.cursor();
        let snapshot = self.loader.snapshot();
        SessionView {
            filters: self.orchestrator.filters(),
            search_input: self.debouncer.local_value(),
            cursor,
            snapshot,
            state: self.view.state(),
            paginator: Paginator::new(cursor.current_page(), snapshot.total_pages),
            last_outcome: self.loader.last_outcome(),
        }
    }

    /// Apply one user action. Returns `true` if a load was issued.
    pub fn handle_action(&mut self, action: UserAction) -> bool {
        debug!("Handling {:?}", action);
        let request = match action {
            UserAction::SearchInput(text) => {
                self.debouncer.input(text);
                None
            }
            UserAction::ToggleOption { category, option } => {
                self.orchestrator.toggle_option(category, &option)
            }
            UserAction::SetJobId(job_id) => self.orchestrator.update_filter(FilterUpdate::JobId(job_id)),
            UserAction::ToggleSort => self.orchestrator.toggle_sort(),
            UserAction::ResetFilters => self.orchestrator.reset_filters(),
            UserAction::GoToPage(page) => self.orchestrator.set_page(page),
            UserAction::NextPage => self.paginator().next().and_then(|p| self.orchestrator.set_page(p)),
            UserAction::PreviousPage => self
                .paginator()
                .previous()
                .and_then(|p| self.orchestrator.set_page(p)),
        };

        match request {
            Some(request) => {
                self.issue_load(request);
                true
            }
            None => false,
        }
    }

    /// Wait for the next action, search commit or load completion and
    /// handle it.
    pub async fn next_step(&mut self, actions: &mut mpsc::Receiver<UserAction>) -> SessionStep {
        tokio::select! {
            action = actions.recv() => match action {
                Some(action) => SessionStep::Action { reloading: self.handle_action(action) },
                None => SessionStep::Closed,
            },
            value = self.debouncer.next_commit() => {
                match self.orchestrator.update_filter(FilterUpdate::Search(value)) {
                    Some(request) => {
                        self.issue_load(request);
                        SessionStep::SearchCommitted
                    }
                    None => SessionStep::Action { reloading: false },
                }
            },
            Some(completed) = self.completions_rx.recv() => self.handle_completion(completed),
        }
    }

    /// Run until `actions` closes, calling `render` whenever visible state
    /// may have changed. Pending timers are cancelled on the way out.
    pub async fn run<F>(mut self, mut actions: mpsc::Receiver<UserAction>, mut render: F)
    where
        F: FnMut(&SessionView<'_>),
    {
        self.start();
        render(&self.view());

        loop {
            let step = self.next_step(&mut actions).await;
            if step == SessionStep::Closed {
                break;
            }
            if step.needs_render() {
                render(&self.view());
            }
        }

        self.debouncer.cancel();
        info!("Candidate listing closed");
    }

    fn handle_completion(&mut self, completed: LoadCompleted) -> SessionStep {
        match self.loader.complete(completed) {
            Completion::Applied => {
                let snapshot = self.loader.snapshot();
                self.orchestrator.observe_total_pages(snapshot.total_pages);
                self.view.observe(snapshot);
                SessionStep::LoadApplied
            }
            Completion::Stale => SessionStep::LoadDiscarded,
        }
    }

    fn issue_load(&mut self, request: LoadRequest) {
        // Filters may have changed search from outside the search box
        self.debouncer.sync_committed(&request.filters.search);
        self.loader.spawn(&self.api, &request, self.completions_tx.clone());
        self.view.observe(self.loader.snapshot());
    }

    fn paginator(&self) -> Paginator {
        Paginator::new(
            self.orchestrator.cursor().current_page(),
            self.orchestrator.total_pages(),
        )
    }
}
