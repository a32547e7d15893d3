use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::Lazy;

static STOP: Lazy<AtomicBool> = Lazy::new(|| AtomicBool::new(false));

/// Clears the stop flag. Call before starting a new evaluation.
pub fn reset_stop() {
    STOP.store(false, Ordering::SeqCst);
}

/// Requests that any running evaluation stop at its next check. Safe to call from a signal
/// handler thread.
pub fn send_stop() {
    STOP.store(true, Ordering::SeqCst);
}

pub fn should_stop() -> bool {
    STOP.load(Ordering::SeqCst)
}
