//! Cursor scan in one direction, stopping at the first boundary crossing.
//!
//! Workers claim consecutive values from a shared cursor. Ascending scans
//! stop on the first violation; descending scans stop on the first verified
//! step. Probes already in flight when the stop is signalled run to
//! completion; nothing new is claimed afterwards.

use crate::oracle::{Oracle, Outcome};
use crate::search::SearchStrategy;
use crate::search::config::{Method, Order, SearchConfig};
use crate::search::parallel::{ParallelConfig, StepSource, StopSignal, run_workers};
use crate::search::result::{SearchResult, SearchStatistics};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Shared cursor over `[hmin, hmax]`.
///
/// The cursor counts claims; the n-th claim is `hmin + n` ascending or
/// `hmax - n` descending, so a range ending at either end of `i64` is
/// scanned without overflow.
pub struct CursorSource {
    claimed: AtomicU64,
    hmin: i64,
    hmax: i64,
    order: Order,
    stop: StopSignal,
}

impl CursorSource {
    pub fn new(hmin: i64, hmax: i64, order: Order) -> Self {
        Self {
            claimed: AtomicU64::new(0),
            hmin,
            hmax,
            order,
            stop: StopSignal::default(),
        }
    }

    pub fn stopped(&self) -> bool {
        self.stop.should_stop()
    }

    /// Whether `outcome` is the one that ends a scan in this direction.
    fn is_stop_outcome(&self, outcome: Outcome) -> bool {
        match self.order {
            Order::Ascending => outcome.is_violation(),
            Order::Descending => outcome == Outcome::PredicateTrue,
        }
    }
}

impl StepSource for CursorSource {
    fn next_step(&self) -> Option<i64> {
        if self.stopped() {
            return None;
        }

        let claim = self.claimed.fetch_add(1, Ordering::SeqCst);
        let step = match self.order {
            Order::Ascending => self.hmin.checked_add_unsigned(claim)?,
            Order::Descending => self.hmax.checked_sub_unsigned(claim)?,
        };

        (self.hmin..=self.hmax).contains(&step).then_some(step)
    }

    fn report(&self, step: i64, outcome: Outcome) {
        if self.is_stop_outcome(outcome) && !self.stopped() {
            debug!(step, %outcome, "boundary crossed; stopping scan");
            self.stop.signal_stop();
        }
    }
}

/// Sequential cursor strategy (`sequential_opt`)
#[derive(Debug, Default)]
pub struct SequentialScan;

impl SequentialScan {
    pub fn new() -> Self {
        Self
    }
}

impl SearchStrategy for SequentialScan {
    fn method(&self) -> Method {
        Method::SequentialOpt
    }

    fn search(
        &mut self,
        oracle: &dyn Oracle,
        config: &SearchConfig,
        parallel: &ParallelConfig,
    ) -> SearchResult {
        let source = CursorSource::new(config.hmin, config.hmax, config.order);
        let report = run_workers(&source, oracle, parallel);

        let mut statistics = SearchStatistics::new(Method::SequentialOpt);
        statistics.merge(&report.statistics);
        statistics.elapsed_time = config.started_at.elapsed();

        SearchResult::from_observations(report.founds, report.passes, config.order, statistics)
    }
}
