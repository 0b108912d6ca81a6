//! Observable request state.
//!
//! Earlier revisions of this client kept a loading flag and an error string
//! in module-level globals, which raced as soon as two calls overlapped: the
//! first call to finish flipped the flag off while the second was still on
//! the wire. State now lives per client behind synchronized primitives. The
//! loading flag is an in-flight counter, so it reads `true` exactly while at
//! least one request is outstanding, and the last-error slot holds the most
//! recent failure message.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Shared, synchronized request state for one client.
#[derive(Debug, Default)]
pub struct ClientState {
    in_flight: AtomicUsize,
    last_error: RwLock<Option<String>>,
}

/// Point-in-time copy of a client's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub in_flight: usize,
    pub last_error: Option<String>,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while at least one request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Relaxed) > 0
    }

    /// Message of the most recent failure, cleared when a new request starts.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().ok().and_then(|slot| slot.clone())
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            in_flight: self.in_flight.load(Ordering::Relaxed),
            last_error: self.last_error(),
        }
    }

    pub(crate) fn record_error(&self, message: impl Into<String>) {
        if let Ok(mut slot) = self.last_error.write() {
            *slot = Some(message.into());
        }
    }

    pub(crate) fn clear_error(&self) {
        if let Ok(mut slot) = self.last_error.write() {
            *slot = None;
        }
    }
}

/// RAII guard covering one in-flight request.
///
/// Entering bumps the counter and clears the previous error; dropping
/// decrements, even when the request path exits early via `?`.
pub(crate) struct LoadingGuard {
    state: Arc<ClientState>,
}

impl LoadingGuard {
    pub(crate) fn enter(state: &Arc<ClientState>) -> Self {
        state.in_flight.fetch_add(1, Ordering::Relaxed);
        state.clear_error();
        Self {
            state: Arc::clone(state),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.state.in_flight.fetch_sub(1, Ordering::Relaxed);
    }
}
