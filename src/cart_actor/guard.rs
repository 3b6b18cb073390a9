use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::view::CartView;

/// Tracks whether an order submission is in flight.
#[derive(Debug, Clone, Default)]
pub struct SubmitGate {
    in_flight: Arc<AtomicBool>,
}

impl SubmitGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Closes the gate and disables the submit control. Returns `None` while
    /// another guard is alive.
    pub fn try_acquire(&self, view: Arc<dyn CartView>) -> Option<SubmitGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        view.set_submit_enabled(false);
        debug!("Submit control disabled");
        Some(SubmitGuard {
            in_flight: Arc::clone(&self.in_flight),
            view,
        })
    }
}

/// Held for the lifetime of one submission. Dropping it, on any path,
/// reopens the gate and re-enables the submit control.
pub struct SubmitGuard {
    in_flight: Arc<AtomicBool>,
    view: Arc<dyn CartView>,
}

impl fmt::Debug for SubmitGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmitGuard").finish_non_exhaustive()
    }
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
        self.view.set_submit_enabled(true);
        debug!("Submit control re-enabled");
    }
}
