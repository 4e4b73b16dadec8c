//! Single in-flight turn discipline shared by the check-in and companion
//! controllers.
//!
//! A conversation owns one [`TurnGate`]. Before calling the analysis service
//! the controller takes a [`TurnPermit`]; while the permit is alive every
//! other attempt to start a turn on that gate is refused. Dropping the permit
//! reopens the gate, including when the owning future is cancelled.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct TurnGate {
    busy: AtomicBool,
}

impl TurnGate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Claims the gate, or returns `None` if a turn is already in flight.
    pub fn try_begin(self: &Arc<Self>) -> Option<TurnPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| TurnPermit {
                gate: Arc::clone(self),
            })
    }

    /// The "awaiting response" flag.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof that the holder owns the current turn.
#[derive(Debug)]
pub struct TurnPermit {
    gate: Arc<TurnGate>,
}

impl Drop for TurnPermit {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}
