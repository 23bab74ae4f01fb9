//! Process-wide shutdown coordination.
//! A flag set by the ctrlc handler; the executor checks it before each
//! rename so an interrupt stops between pairs rather than mid-rename.
//!
//! Notes:
//! - Relaxed atomics are sufficient for a one-way "stop" flag.
//! - `request()` is safe to call from signal handlers.
use std::sync::atomic::{AtomicBool, Ordering};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Request a cooperative shutdown (idempotent).
#[inline]
pub fn request() {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

/// Check whether a shutdown has been requested.
#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Test-only: clear the shutdown flag.
#[cfg(test)]
#[inline]
pub fn reset() {
    SHUTDOWN.store(false, Ordering::Relaxed);
}
