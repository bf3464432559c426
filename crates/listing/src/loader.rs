//! Result loading lifecycle.
//!
//! Every load is stamped with a sequence number when it is issued. A
//! response is applied only if it belongs to the most recently issued load;
//! anything older is discarded, so a slow response can never overwrite a
//! fresher one.
//!
//! Failures are folded into the canonical empty snapshot
//! (`{[], total_pages: 1, total: 0}`) and logged. `last_outcome` keeps the
//! distinction between "no results" and "request failed" for callers that
//! want it.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use api_client::{CandidateApi, ClientError};
use candidate_model::{CandidatePage, ResultSnapshot};
use query::{QueryBuilder, QueryParams};

use crate::orchestrator::LoadRequest;

/// Identifies one issued load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    seq: u64,
}

impl LoadTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Response (or failure) for one issued load
#[derive(Debug)]
pub struct LoadCompleted {
    pub ticket: LoadTicket,
    pub result: Result<CandidatePage, ClientError>,
}

/// How the last applied load ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { total: u64 },
    Failed(ClientError),
}

/// Whether `ResultLoader::complete` used a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

/// Sends a completion exactly once, even if the request task is aborted or
/// panics before producing a response.
struct CompletionGuard {
    ticket: LoadTicket,
    tx: Option<mpsc::UnboundedSender<LoadCompleted>>,
}

impl CompletionGuard {
    fn new(ticket: LoadTicket, tx: mpsc::UnboundedSender<LoadCompleted>) -> Self {
        Self {
            ticket,
            tx: Some(tx),
        }
    }

    fn complete(mut self, result: Result<CandidatePage, ClientError>) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(LoadCompleted {
                ticket: self.ticket,
                result,
            });
        }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(LoadCompleted {
                ticket: self.ticket,
                result: Err(ClientError::Aborted),
            });
        }
    }
}

/// Issues loads and owns the result snapshot.
pub struct ResultLoader {
    builder: QueryBuilder,
    snapshot: ResultSnapshot,
    issued: u64,
    last_outcome: Option<LoadOutcome>,
}

impl ResultLoader {
    pub fn new() -> Self {
        Self::with_builder(QueryBuilder::standard())
    }

    /// Loader that builds request parameters with a custom chain
    pub fn with_builder(builder: QueryBuilder) -> Self {
        Self {
            builder,
            snapshot: ResultSnapshot::empty(),
            issued: 0,
            last_outcome: None,
        }
    }

    pub fn snapshot(&self) -> &ResultSnapshot {
        &self.snapshot
    }

    /// `None` until the first load has been applied
    pub fn last_outcome(&self) -> Option<&LoadOutcome> {
        self.last_outcome.as_ref()
    }

    /// Ticket of the most recently issued load
    pub fn latest_ticket(&self) -> Option<LoadTicket> {
        (self.issued > 0).then_some(LoadTicket { seq: self.issued })
    }

    /// Stamp a new load and mark the snapshot as loading.
    ///
    /// # Returns
    /// The ticket for the load and the parameters to send
    pub fn begin(&mut self, request: &LoadRequest) -> (LoadTicket, QueryParams) {
        self.issued += 1;
        let ticket = LoadTicket { seq: self.issued };
        let params = self.builder.build(&request.filters, &request.cursor);

        self.snapshot.loading = true;
        debug!("Issuing load #{}: {}", ticket.seq, params);
        (ticket, params)
    }

    /// Apply a finished load.
    ///
    /// Responses for anything but the latest ticket are dropped without
    /// touching the snapshot. For the latest ticket the snapshot is replaced
    /// wholesale and `loading` ends, whatever the result.
    pub fn complete(&mut self, completed: LoadCompleted) -> Completion {
        let LoadCompleted { ticket, result } = completed;
        if ticket.seq != self.issued {
            debug!(
                "Discarding stale response #{} (latest is #{})",
                ticket.seq, self.issued
            );
            return Completion::Stale;
        }

        match result {
            Ok(page) => {
                info!(
                    "Loaded {} of {} candidates ({} pages)",
                    page.candidates.len(),
                    page.total,
                    page.total_pages
                );
                self.last_outcome = Some(LoadOutcome::Loaded { total: page.total });
                self.snapshot = ResultSnapshot::from_page(page);
            }
            Err(e) => {
                warn!("Failed to load candidates: {}", e);
                self.last_outcome = Some(LoadOutcome::Failed(e));
                self.snapshot = ResultSnapshot::empty();
            }
        }

        Completion::Applied
    }

    /// Issue a load and wait for it in place.
    pub async fn load<A: CandidateApi>(&mut self, api: &A, request: &LoadRequest) -> &ResultSnapshot {
        let (ticket, params) = self.begin(request);
        let result = api.fetch_candidates(&params).await;
        self.complete(LoadCompleted { ticket, result });
        &self.snapshot
    }

    /// Issue a load on its own task; the completion arrives on `tx`.
    ///
    /// A completion is always sent: if the task is aborted or panics,
    /// it carries `ClientError::Aborted`.
    pub fn spawn<A>(
        &mut self,
        api: &A,
        request: &LoadRequest,
        tx: mpsc::UnboundedSender<LoadCompleted>,
    ) -> LoadTicket
    where
        A: CandidateApi + Clone + 'static,
    {
        let (ticket, params) = self.begin(request);
        let api = api.clone();

        tokio::spawn(async move {
            let guard = CompletionGuard::new(ticket, tx);
            let result = api.fetch_candidates(&params).await;
            guard.complete(result);
        });

        ticket
    }
}

impl Default for ResultLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candidate_model::{Candidate, CandidateId, Filters, PaginationCursor};

    fn request() -> LoadRequest {
        LoadRequest {
            filters: Filters::default(),
            cursor: PaginationCursor::default(),
        }
    }

    fn page(ids: &[u64], total_pages: u32) -> CandidatePage {
        CandidatePage {
            candidates: ids.iter().map(|id| Candidate::new(CandidateId::Number(*id))).collect(),
            total_pages,
            total: ids.len() as u64,
        }
    }

    #[test]
    fn test_begin_sets_loading() {
        let mut loader = ResultLoader::new();
        assert!(!loader.snapshot().loading);

        let (ticket, params) = loader.begin(&request());
        assert!(loader.snapshot().loading);
        assert_eq!(ticket.seq(), 1);
        assert_eq!(params.get("page"), Some("1"));
        assert_eq!(loader.latest_ticket(), Some(ticket));
    }

    #[test]
    fn test_success_replaces_snapshot() {
        let mut loader = ResultLoader::new();
        let (ticket, _) = loader.begin(&request());

        let completion = loader.complete(LoadCompleted {
            ticket,
            result: Ok(page(&[1, 2], 3)),
        });

        assert_eq!(completion, Completion::Applied);
        let snapshot = loader.snapshot();
        assert_eq!(snapshot.candidates.len(), 2);
        assert_eq!(snapshot.total_pages, 3);
        assert!(!snapshot.loading);
        assert_eq!(loader.last_outcome(), Some(&LoadOutcome::Loaded { total: 2 }));
    }

    #[test]
    fn test_failure_yields_empty_snapshot_for_any_cause() {
        let causes = [
            ClientError::Transport("connection reset".to_string()),
            ClientError::Status(503),
            ClientError::Decode("expected value".to_string()),
            ClientError::Aborted,
        ];

        for cause in causes {
            let mut loader = ResultLoader::new();
            let (ticket, _) = loader.begin(&request());
            loader.complete(LoadCompleted {
                ticket,
                result: Ok(page(&[1], 2)),
            });

            let (ticket, _) = loader.begin(&request());
            loader.complete(LoadCompleted {
                ticket,
                result: Err(cause.clone()),
            });

            assert_eq!(loader.snapshot(), &ResultSnapshot::empty());
            assert_eq!(loader.last_outcome(), Some(&LoadOutcome::Failed(cause)));
        }
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut loader = ResultLoader::new();
        let (first, _) = loader.begin(&request());
        let (second, _) = loader.begin(&request());

        assert_eq!(
            loader.complete(LoadCompleted {
                ticket: second,
                result: Ok(page(&[2], 1)),
            }),
            Completion::Applied
        );
        assert_eq!(
            loader.complete(LoadCompleted {
                ticket: first,
                result: Ok(page(&[1, 1, 1], 9)),
            }),
            Completion::Stale
        );

        assert_eq!(loader.snapshot().candidates[0].id, CandidateId::Number(2));
        assert_eq!(loader.snapshot().total_pages, 1);
    }

    #[test]
    fn test_stale_response_leaves_newer_load_in_flight() {
        let mut loader = ResultLoader::new();
        let (first, _) = loader.begin(&request());
        let _second = loader.begin(&request());

        loader.complete(LoadCompleted {
            ticket: first,
            result: Ok(page(&[1], 1)),
        });
        assert!(loader.snapshot().loading);
    }

    #[tokio::test]
    async fn test_guard_reports_abort_when_dropped() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let guard = CompletionGuard::new(LoadTicket { seq: 4 }, tx);
        drop(guard);

        let completed = rx.recv().await.unwrap();
        assert_eq!(completed.ticket.seq(), 4);
        assert_eq!(completed.result.unwrap_err(), ClientError::Aborted);
        assert!(rx.recv().await.is_none());
    }
}
