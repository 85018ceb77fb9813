//! The external decision oracle.
//!
//! An oracle answers, for one integer step, whether the verifier finds a
//! counterexample. [`ProcessOracle`] runs the verifier as a subprocess and
//! abandons the run as soon as the step is no longer needed.

pub mod invocation;
pub mod outcome;

pub use invocation::{DEFAULT_EXECUTABLE, DEFAULT_PARAM_NAME, OracleCommand, OracleInvocation};
pub use outcome::{Outcome, classify_output};

use crate::process::{PollStatus, ProcessSupervisor};
use std::time::Duration;
use tracing::warn;

/// Default interval between cancellation checks while an oracle runs.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// What came of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// The oracle ran to completion (or failed to start).
    Completed(Outcome),
    /// The step became stale and the run was killed; no evidence.
    Cancelled,
}

/// Something that can decide a step.
pub trait Oracle: Sync {
    /// Probe `step`. `is_needed` is consulted between output polls; once it
    /// returns false the probe is abandoned and [`Probe::Cancelled`] returned.
    fn probe(&self, step: i64, is_needed: &dyn Fn() -> bool) -> Probe;
}

/// Oracle backed by a verifier subprocess.
#[derive(Debug, Clone)]
pub struct ProcessOracle {
    invocation: OracleInvocation,
    supervisor: ProcessSupervisor,
    poll_interval: Duration,
}

impl ProcessOracle {
    pub fn new(invocation: OracleInvocation) -> Self {
        Self {
            invocation,
            supervisor: ProcessSupervisor::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

impl Oracle for ProcessOracle {
    fn probe(&self, step: i64, is_needed: &dyn Fn() -> bool) -> Probe {
        let command = self.invocation.command_for(step);
        let mut process = match self.supervisor.spawn(&command) {
            Ok(process) => process,
            Err(e) => {
                warn!(step, kind = e.as_label(), error = %e, "failed to start oracle");
                return Probe::Completed(Outcome::Inconclusive);
            }
        };

        let mut output = Vec::new();
        loop {
            match process.poll_output(self.poll_interval) {
                PollStatus::Output(chunk) => output.extend_from_slice(&chunk),
                PollStatus::Idle => {}
                PollStatus::Eof => break,
            }

            if !is_needed() {
                process.terminate();
                return Probe::Cancelled;
            }
        }

        if let Err(e) = process.wait() {
            warn!(step, error = %e, "failed to reap oracle");
        }

        Probe::Completed(classify_output(&output))
    }
}
