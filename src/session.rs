//! View state held on behalf of a UI.
//!
//! A session owns the lifecycle of the on-screen result: it is replaced on
//! every submission and dropped with the view. Only the most recent
//! submission may publish; anything that settles after a newer query was
//! submitted is discarded.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, error};

use crate::aggregate::AggregateResult;
use crate::aggregator::SearchAggregator;
use crate::query::SearchQuery;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    InFlight {
        query: SearchQuery,
    },
    Ready {
        query: SearchQuery,
        result: AggregateResult,
    },
    /// A failure replaces whatever was shown before.
    Failed {
        query: SearchQuery,
        message: String,
    },
}

impl SearchState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SearchState::InFlight { .. })
    }

    pub fn result(&self) -> Option<&AggregateResult> {
        match self {
            SearchState::Ready { result, .. } => Some(result),
            _ => None,
        }
    }
}

pub struct SearchSession {
    aggregator: Arc<SearchAggregator>,
    generation: AtomicU64,
    state: watch::Sender<SearchState>,
}

impl SearchSession {
    pub fn new(aggregator: Arc<SearchAggregator>) -> Self {
        let (state, _) = watch::channel(SearchState::Idle);
        Self {
            aggregator,
            generation: AtomicU64::new(0),
            state,
        }
    }

    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn in_progress(&self) -> bool {
        self.state.borrow().is_in_flight()
    }

    /// Run a search for `query` and publish its outcome.
    ///
    /// Returns `false` when a newer submission superseded this one and the
    /// outcome was thrown away. Dropping the returned future before it
    /// settles puts a still-current session back to `Idle`.
    pub async fn submit(&self, query: SearchQuery) -> bool {
        let mut generation = 0;
        let blank = query.is_blank();
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = if blank {
                SearchState::Idle
            } else {
                SearchState::InFlight {
                    query: query.clone(),
                }
            };
        });
        if blank {
            return true;
        }

        let mut guard = InFlightGuard {
            session: self,
            generation,
            armed: true,
        };
        let settled = match self.aggregator.search(&query).await {
            Ok(result) => SearchState::Ready {
                query: query.clone(),
                result,
            },
            Err(e) => {
                error!("Search for {:?} failed: {}", query.keyword, e);
                SearchState::Failed {
                    query: query.clone(),
                    message: e.user_message(),
                }
            }
        };

        guard.armed = false;

        let published = self.publish(generation, settled);
        if !published {
            debug!("Discarding stale result for {:?}", query.keyword);
        }
        published
    }

    /// Replace the state only if `generation` is still the latest submission.
    fn publish(&self, generation: u64, next: SearchState) -> bool {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = next;
            true
        })
    }

    /// Return to `Idle`, discarding any search still in flight.
    pub fn clear(&self) {
        self.state.send_modify(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            *state = SearchState::Idle;
        });
    }
}

/// Resets an abandoned submission so the session does not stay `InFlight`.
struct InFlightGuard<'a> {
    session: &'a SearchSession,
    generation: u64,
    armed: bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed && self.session.publish(self.generation, SearchState::Idle) {
            debug!("Search cancelled before it settled");
        }
    }
}
