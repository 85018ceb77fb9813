//! Worker pool and the coordinator loop that aggregates its results.

use crate::oracle::{Oracle, Outcome, Probe};
use crate::search::parallel::channel::{WorkerMessage, create_channel};
use crate::search::parallel::config::ParallelConfig;
use crate::search::result::SearchStatistics;
use crossbeam_channel::{Receiver, Sender};
use std::thread;
use tracing::{debug, info, warn};

/// Where workers get their steps from and report their outcomes to.
///
/// Implementations are shared by every worker and do their own locking.
pub trait StepSource: Sync {
    /// Claim the next step, or `None` when this worker should exit.
    fn next_step(&self) -> Option<i64>;

    /// Whether an in-flight probe of `step` is still worth finishing.
    fn is_step_needed(&self, _step: i64) -> bool {
        true
    }

    /// Record the verdict for `step`. Only called for conclusive outcomes.
    fn report(&self, step: i64, outcome: Outcome);
}

/// What a pool run observed.
#[derive(Debug, Default)]
pub struct PoolReport {
    /// Steps reported as violations.
    pub founds: Vec<i64>,
    /// Steps reported as verified.
    pub passes: Vec<i64>,
    /// Probe counters for this pool run.
    pub statistics: SearchStatistics,
}

/// Run `config.num_workers` workers against `source` until all of them exit.
pub fn run_workers(
    source: &dyn StepSource,
    oracle: &dyn Oracle,
    config: &ParallelConfig,
) -> PoolReport {
    let (tx, rx) = create_channel();

    thread::scope(|scope| {
        for worker_id in 0..config.num_workers {
            let tx = tx.clone();
            scope.spawn(move || run_worker(worker_id, source, oracle, tx));
        }
        // Only worker senders remain, so the coordinator sees a disconnect
        // once every worker has exited.
        drop(tx);

        run_coordinator(rx)
    })
}

/// Worker loop: claim, probe, report, until the source runs dry.
fn run_worker(
    worker_id: usize,
    source: &dyn StepSource,
    oracle: &dyn Oracle,
    tx: Sender<WorkerMessage>,
) {
    while let Some(step) = source.next_step() {
        let _ = tx.send(WorkerMessage::Started { worker_id, step });

        match oracle.probe(step, &|| source.is_step_needed(step)) {
            Probe::Completed(outcome) => {
                if outcome != Outcome::Inconclusive {
                    source.report(step, outcome);
                }
                let _ = tx.send(WorkerMessage::Finished {
                    worker_id,
                    step,
                    outcome,
                });
            }
            Probe::Cancelled => {
                let _ = tx.send(WorkerMessage::Cancelled { worker_id, step });
            }
        }
    }

    let _ = tx.send(WorkerMessage::Exited { worker_id });
}

/// Coordinator loop: the single owner of the observed steps.
fn run_coordinator(rx: Receiver<WorkerMessage>) -> PoolReport {
    let mut report = PoolReport::default();
    let stats = &mut report.statistics;

    while let Ok(message) = rx.recv() {
        match message {
            WorkerMessage::Started { worker_id, step } => {
                stats.probes_started += 1;
                info!(worker = worker_id, step, "started step");
            }
            WorkerMessage::Finished {
                worker_id,
                step,
                outcome,
            } => match outcome {
                Outcome::PredicateTrue => {
                    stats.probes_completed += 1;
                    report.passes.push(step);
                    info!(worker = worker_id, step, result = %outcome, "finished step");
                }
                Outcome::PredicateFalse => {
                    stats.probes_completed += 1;
                    stats.violations_found += 1;
                    report.founds.push(step);
                    info!(worker = worker_id, step, result = %outcome, "finished step");
                }
                Outcome::Inconclusive => {
                    stats.probes_inconclusive += 1;
                    warn!(worker = worker_id, step, "no verdict for step");
                }
            },
            WorkerMessage::Cancelled { worker_id, step } => {
                stats.probes_cancelled += 1;
                info!(worker = worker_id, step, "aborted step");
            }
            WorkerMessage::Exited { worker_id } => {
                debug!(worker = worker_id, "worker exited");
            }
        }
    }

    report
}
