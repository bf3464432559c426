//! Display state of the candidate list.

use candidate_model::ResultSnapshot;

/// What the list area shows.
///
/// There is no error state: a failed load produces an empty snapshot and
/// therefore `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListViewState {
    Loading,
    HasResults,
    Empty,
}

impl ListViewState {
    /// Loading wins over everything, then the presence of candidates.
    pub fn derive(snapshot: &ResultSnapshot) -> Self {
        if snapshot.loading {
            ListViewState::Loading
        } else if !snapshot.candidates.is_empty() {
            ListViewState::HasResults
        } else {
            ListViewState::Empty
        }
    }

    /// Text shown in place of the list, if any
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            ListViewState::Loading => Some("Loading candidates..."),
            ListViewState::Empty => Some("No candidates found."),
            ListViewState::HasResults => None,
        }
    }
}

/// Holds the current display state and re-derives it on every snapshot.
#[derive(Debug, Clone)]
pub struct ListView {
    state: ListViewState,
}

impl ListView {
    /// Starts in `Loading` until the first load cycle completes
    pub fn new() -> Self {
        Self {
            state: ListViewState::Loading,
        }
    }

    pub fn state(&self) -> ListViewState {
        self.state
    }

    /// Re-derive from `snapshot`. Returns `true` if the state changed.
    pub fn observe(&mut self, snapshot: &ResultSnapshot) -> bool {
        let next = ListViewState::derive(snapshot);
        let changed = next != self.state;
        self.state = next;
        changed
    }
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary line above the list
pub fn result_summary(total: u64) -> String {
    format!("Showing {} candidate applications", total)
}
