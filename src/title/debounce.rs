//! Single-slot trailing-edge debounce.
//!
//! At most one request is pending. A new request replaces the stored value
//! and restarts the timer; the previous timer task is aborted. When a timer
//! elapses, the slot is cleared and the callback runs with the last value.
//!
//! The callback runs while the slot lock is held. [`PendingSlot::close`]
//! takes the same lock, so once it returns no callback is running and none
//! can start.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::trace;

struct Pending<T> {
    id: u64,
    value: T,
    handle: JoinHandle<()>,
}

struct SlotState<T> {
    next_id: u64,
    closed: bool,
    pending: Option<Pending<T>>,
}

/// Holds the one pending request and its timer task.
pub struct PendingSlot<T> {
    state: Mutex<SlotState<T>>,
}

impl<T: Send + 'static> PendingSlot<T> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(SlotState {
                next_id: 0,
                closed: false,
                pending: None,
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, SlotState<T>> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Store `value` and (re)start the timer. `fire` runs once `delay` passes
    /// without another request.
    ///
    /// Returns `false` if the slot has been closed.
    pub fn schedule<F>(self: &Arc<Self>, runtime: &Handle, delay: Duration, value: T, fire: F) -> bool
    where
        F: FnOnce(T) + Send + 'static,
    {
        let mut state = self.lock();
        if state.closed {
            trace!("debounce slot closed, dropping request");
            return false;
        }

        if let Some(previous) = state.pending.take() {
            trace!("superseding pending request {}", previous.id);
            previous.handle.abort();
        }

        let id = state.next_id;
        state.next_id += 1;

        let slot = Arc::clone(self);
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            slot.fire(id, fire);
        });

        state.pending = Some(Pending {
            id,
            value,
            handle,
        });
        true
    }

    fn fire<F: FnOnce(T)>(&self, id: u64, fire: F) {
        let mut state = self.lock();
        match state.pending.take_if(|pending| pending.id == id) {
            Some(pending) => {
                trace!("debounce window elapsed for request {}", id);
                fire(pending.value);
            }
            None => trace!("request {} superseded before firing", id),
        }
    }

    /// Whether a request is waiting for its timer.
    pub fn is_pending(&self) -> bool {
        self.lock().pending.is_some()
    }

    /// Drop the pending request, if any, without closing the slot.
    pub fn cancel(&self) {
        if let Some(pending) = self.lock().pending.take() {
            pending.handle.abort();
        }
    }

    /// Close the slot: no further requests are accepted and the pending one
    /// is cancelled.
    ///
    /// The aborted timer task is returned so the caller can wait for it.
    pub fn close(&self) -> Option<JoinHandle<()>> {
        let mut state = self.lock();
        state.closed = true;
        state.pending.take().map(|pending| {
            pending.handle.abort();
            pending.handle
        })
    }
}
