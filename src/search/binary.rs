//! Parallel bisection over the interval controller.
//!
//! Workers take midpoints of the widest unexplored chunk. Every verdict
//! narrows the controller bounds, and any in-flight probe whose step falls
//! outside them is killed at its next poll.

use crate::oracle::{Oracle, Outcome};
use crate::search::SearchStrategy;
use crate::search::config::{Method, Order, SearchConfig};
use crate::search::controller::IntervalController;
use crate::search::parallel::{ParallelConfig, SharedBounds, StepSource, run_workers};
use crate::search::result::{SearchResult, SearchStatistics};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Controller behind a lock, plus a lock-free copy of its bounds.
pub struct BisectionSource {
    controller: Mutex<IntervalController>,
    bounds: SharedBounds,
}

impl BisectionSource {
    pub fn new(hmin: i64, hmax: i64) -> Self {
        Self {
            controller: Mutex::new(IntervalController::new(hmin, hmax)),
            bounds: SharedBounds::new(hmin, hmax),
        }
    }

    fn controller(&self) -> MutexGuard<'_, IntervalController> {
        self.controller
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Current controller bounds.
    pub fn bounds(&self) -> (i64, i64) {
        self.controller().bounds()
    }
}

impl StepSource for BisectionSource {
    fn next_step(&self) -> Option<i64> {
        self.controller().request_step()
    }

    fn is_step_needed(&self, step: i64) -> bool {
        self.bounds.contains(step)
    }

    fn report(&self, step: i64, outcome: Outcome) {
        let Some(predicate) = outcome.predicate() else {
            return;
        };
        let mut controller = self.controller();
        if controller.report_result(step, predicate) {
            let (lo, hi) = controller.bounds();
            self.bounds.store(lo, hi);
        }
    }
}

/// Binary search strategy
#[derive(Debug, Default)]
pub struct BinarySearch;

impl BinarySearch {
    pub fn new() -> Self {
        Self
    }
}

impl SearchStrategy for BinarySearch {
    fn method(&self) -> Method {
        Method::Binary
    }

    fn search(
        &mut self,
        oracle: &dyn Oracle,
        config: &SearchConfig,
        parallel: &ParallelConfig,
    ) -> SearchResult {
        let source = BisectionSource::new(config.hmin, config.hmax);
        let report = run_workers(&source, oracle, parallel);

        let mut statistics = SearchStatistics::new(Method::Binary);
        statistics.merge(&report.statistics);
        statistics.elapsed_time = config.started_at.elapsed();

        SearchResult::from_observations(
            report.founds,
            report.passes,
            Order::Ascending,
            statistics,
        )
    }
}
