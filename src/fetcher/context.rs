//! Per-run fetch cache with in-flight request coalescing
//!
//! A `FetchContext` lives for exactly one inlining run. It guarantees that a
//! given key is fetched at most once: the first caller becomes the leader and
//! performs the fetch, later callers either hit the cache or queue behind the
//! leader and are resumed, in the order they queued, with the same result.
//!
//! Both maps sit behind a single lock so the "check cache, then check pending"
//! sequence is atomic. The lock is never held across an await point.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::oneshot;

use super::types::Resource;
use crate::error::FetchError;

/// Outcome delivered to every waiter of one fetch
pub type SharedOutcome = Result<Arc<Resource>, FetchError>;

#[derive(Default)]
struct ContextState {
    /// FetchCache: key -> resolved resource, write-once
    cache: HashMap<String, Arc<Resource>>,
    /// PendingRequests: key -> waiters in registration order
    pending: HashMap<String, Vec<oneshot::Sender<SharedOutcome>>>,
}

/// Cache and pending-request table shared by every fetch in one run
#[derive(Clone, Default)]
pub struct FetchContext {
    state: Arc<Mutex<ContextState>>,
}

/// What a caller should do for a key
pub enum Claim<'a> {
    /// Already resolved
    Cached(Arc<Resource>),
    /// Another caller is fetching; await the receiver
    Waiting(oneshot::Receiver<SharedOutcome>),
    /// Caller must perform the fetch and report through the guard
    Leader(PendingGuard<'a>),
}

impl FetchContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `key`, registering the caller as leader or waiter on a miss
    pub fn claim(&self, key: &str) -> Claim<'_> {
        let mut state = self.state.lock();

        if let Some(resource) = state.cache.get(key) {
            return Claim::Cached(Arc::clone(resource));
        }

        if let Some(waiters) = state.pending.get_mut(key) {
            let (tx, rx) = oneshot::channel();
            waiters.push(tx);
            return Claim::Waiting(rx);
        }

        state.pending.insert(key.to_string(), Vec::new());
        Claim::Leader(PendingGuard {
            context: self,
            key: key.to_string(),
            finished: false,
        })
    }

    /// Number of resolved entries
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.state.lock().cache.len()
    }

    /// Whether a fetch for `key` is currently in flight
    #[must_use]
    pub fn is_pending(&self, key: &str) -> bool {
        self.state.lock().pending.contains_key(key)
    }

    fn finish(&self, key: &str, outcome: &SharedOutcome) {
        let waiters = {
            let mut state = self.state.lock();
            if let Ok(resource) = outcome {
                state.cache.insert(key.to_string(), Arc::clone(resource));
            }
            state.pending.remove(key).unwrap_or_default()
        };

        if !waiters.is_empty() {
            log::debug!("Resuming {} waiter(s) for {key}", waiters.len());
        }

        for waiter in waiters {
            // A waiter that went away no longer needs the result
            let _ = waiter.send(outcome.clone());
        }
    }
}

/// Held by the leader of a fetch; resumes waiters when completed or dropped
pub struct PendingGuard<'a> {
    context: &'a FetchContext,
    key: String,
    finished: bool,
}

impl PendingGuard<'_> {
    /// Publish the outcome: cache it on success, then resume every waiter
    pub fn complete(mut self, outcome: &SharedOutcome) {
        self.finished = true;
        self.context.finish(&self.key, outcome);
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            let outcome = Err(FetchError::Abandoned {
                url: self.key.clone(),
            });
            self.context.finish(&self.key, &outcome);
        }
    }
}
