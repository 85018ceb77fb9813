//! Worker-to-coordinator messages and lock-free shared state.

use crate::oracle::Outcome;
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

/// Message sent from a worker to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Worker started an oracle for `step`.
    Started { worker_id: usize, step: i64 },
    /// The oracle for `step` finished (or failed to start).
    Finished {
        worker_id: usize,
        step: i64,
        outcome: Outcome,
    },
    /// The oracle for `step` was killed because the step went stale.
    Cancelled { worker_id: usize, step: i64 },
    /// Worker found no more work and exited.
    Exited { worker_id: usize },
}

/// Snapshot of the controller bounds for cancellation checks.
///
/// Written under the controller lock after every applied report; read
/// without it. A stale read only delays a cancellation.
#[derive(Debug)]
pub struct SharedBounds {
    lo: AtomicI64,
    hi: AtomicI64,
}

impl SharedBounds {
    pub fn new(lo: i64, hi: i64) -> Self {
        Self {
            lo: AtomicI64::new(lo),
            hi: AtomicI64::new(hi),
        }
    }

    pub fn store(&self, lo: i64, hi: i64) {
        self.lo.store(lo, Ordering::SeqCst);
        self.hi.store(hi, Ordering::SeqCst);
    }

    pub fn load(&self) -> (i64, i64) {
        (self.lo.load(Ordering::SeqCst), self.hi.load(Ordering::SeqCst))
    }

    /// Whether `step` is within the last published bounds.
    pub fn contains(&self, step: i64) -> bool {
        let (lo, hi) = self.load();
        lo <= step && step <= hi
    }
}

/// Flag telling workers to stop claiming new steps.
#[derive(Debug, Default)]
pub struct StopSignal {
    should_stop: AtomicBool,
}

impl StopSignal {
    pub fn should_stop(&self) -> bool {
        self.should_stop.load(Ordering::SeqCst)
    }

    pub fn signal_stop(&self) {
        self.should_stop.store(true, Ordering::SeqCst);
    }
}

/// Create the shared worker-to-coordinator channel.
///
/// Unbounded so that workers never block on the coordinator.
pub fn create_channel() -> (Sender<WorkerMessage>, Receiver<WorkerMessage>) {
    unbounded()
}
