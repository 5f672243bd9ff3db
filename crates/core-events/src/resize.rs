//! The process-global resize counter.
//!
//! A `SIGWINCH` handler increments a single atomic counter; every `App`
//! keeps its own snapshot and compares on each tick. This avoids any shared
//! mutable flag between multiple `App` instances in the same process - the
//! counter only ever moves forward, so comparison is race-free even though
//! the handler runs on a signal-delivery thread.

use std::sync::atomic::{AtomicU64, Ordering};

static RESIZE_COUNTER: AtomicU64 = AtomicU64::new(0);
static HANDLER_INSTALLED: AtomicU64 = AtomicU64::new(0);

extern "C" fn on_sigwinch(_signum: libc::c_int) {
    RESIZE_COUNTER.fetch_add(1, Ordering::SeqCst);
}

/// Install the `SIGWINCH` handler once per process. Idempotent: later calls
/// from additional `App` instances are no-ops.
pub fn install_handler() {
    if HANDLER_INSTALLED.swap(1, Ordering::SeqCst) == 1 {
        return;
    }
    unsafe {
        libc::signal(libc::SIGWINCH, on_sigwinch as usize);
    }
}

/// Test-only hook to simulate a resize without raising a real signal.
#[cfg(test)]
pub fn simulate_resize() {
    RESIZE_COUNTER.fetch_add(1, Ordering::SeqCst);
}

/// An `App`'s local snapshot of the global counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeState {
    last_seen: u64,
}

impl ResizeState {
    /// Snapshot the counter as it currently stands (call once at startup,
    /// after installing the handler, so no resize that happened before
    /// construction is spuriously reported).
    pub fn new() -> Self {
        Self { last_seen: RESIZE_COUNTER.load(Ordering::SeqCst) }
    }

    /// If the global counter has advanced since the last observation,
    /// update the snapshot and return `true`.
    pub fn poll(&mut self) -> bool {
        let current = RESIZE_COUNTER.load(Ordering::SeqCst);
        if current != self.last_seen {
            self.last_seen = current;
            true
        } else {
            false
        }
    }
}

impl Default for ResizeState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_reports_advance_exactly_once() {
        let mut state = ResizeState::new();
        assert!(!state.poll());
        simulate_resize();
        assert!(state.poll());
        assert!(!state.poll());
    }
}
