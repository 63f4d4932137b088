//! Handoff queue between collector threads and the writer thread.
//!
//! Unbounded FIFO guarded by one mutex/condvar pair. `push` never blocks.
//! After `stop`, pending snapshots stay drainable; `wait_and_pop` returns
//! `None` only once the queue is both stopped and empty.

use std::collections::VecDeque;

use parking_lot::{Condvar, Mutex};
use tallyline_core::MetricSnapshot;

#[derive(Default)]
struct State {
    items: VecDeque<MetricSnapshot>,
    stopped: bool,
}

#[derive(Default)]
pub struct HandoffQueue {
    state: Mutex<State>,
    ready: Condvar,
}

impl HandoffQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the tail and wake one waiting consumer. Returns the depth
    /// after the push.
    pub fn push(&self, snapshot: MetricSnapshot) -> usize {
        let mut st = self.state.lock();
        st.items.push_back(snapshot);
        let depth = st.items.len();
        drop(st);
        self.ready.notify_one();
        depth
    }

    /// Pop the head if present, never blocks.
    pub fn try_pop(&self) -> Option<MetricSnapshot> {
        self.state.lock().items.pop_front()
    }

    /// Block until an item is available or the queue is stopped and empty.
    ///
    /// `None` is the shutdown signal, not an error.
    pub fn wait_and_pop(&self) -> Option<MetricSnapshot> {
        let mut st = self.state.lock();
        loop {
            if let Some(item) = st.items.pop_front() {
                return Some(item);
            }
            if st.stopped {
                return None;
            }
            self.ready.wait(&mut st);
        }
    }

    /// Mark stopped and wake every waiter. Idempotent; keeps pending items.
    pub fn stop(&self) {
        self.state.lock().stopped = true;
        self.ready.notify_all();
    }

    pub fn is_stopped(&self) -> bool {
        self.state.lock().stopped
    }

    /// Stopped with nothing left to drain.
    pub fn is_drained(&self) -> bool {
        let st = self.state.lock();
        st.stopped && st.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().items.is_empty()
    }
}
