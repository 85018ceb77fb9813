//! Batch scan: probe a pool-wide batch of consecutive values at a time.
//!
//! Every value in a batch is probed, with no cancellation inside the batch.
//! The scan stops after the first batch that contains the boundary
//! crossing (a violation when ascending, a verified step when descending).

use crate::oracle::{Oracle, Outcome};
use crate::search::SearchStrategy;
use crate::search::config::{Method, Order, SearchConfig};
use crate::search::parallel::{ParallelConfig, StepSource, run_workers};
use crate::search::result::{SearchResult, SearchStatistics};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

/// Inclusive ranges of at most `width` values covering `[hmin, hmax]`,
/// in scan order.
pub fn batches(hmin: i64, hmax: i64, width: usize, order: Order) -> Vec<(i64, i64)> {
    let width = i64::try_from(width.max(1)).unwrap_or(i64::MAX);
    let mut batches = Vec::new();
    if hmin > hmax {
        return batches;
    }

    match order {
        Order::Ascending => {
            let mut start = hmin;
            loop {
                let end = start.saturating_add(width - 1).min(hmax);
                batches.push((start, end));
                if end >= hmax {
                    break;
                }
                start = end + 1;
            }
        }
        Order::Descending => {
            let mut end = hmax;
            loop {
                let start = end.saturating_sub(width - 1).max(hmin);
                batches.push((start, end));
                if start <= hmin {
                    break;
                }
                end = start - 1;
            }
        }
    }

    batches
}

/// Fixed list of steps handed out once each.
struct BatchSource {
    steps: Vec<i64>,
    next: AtomicUsize,
}

impl BatchSource {
    fn new(start: i64, end: i64, order: Order) -> Self {
        let steps = match order {
            Order::Ascending => (start..=end).collect(),
            Order::Descending => (start..=end).rev().collect(),
        };
        Self {
            steps,
            next: AtomicUsize::new(0),
        }
    }
}

impl StepSource for BatchSource {
    fn next_step(&self) -> Option<i64> {
        let index = self.next.fetch_add(1, Ordering::SeqCst);
        self.steps.get(index).copied()
    }

    fn report(&self, _step: i64, _outcome: Outcome) {}
}

/// Batch strategy (`sequential`)
#[derive(Debug, Default)]
pub struct BatchScan;

impl BatchScan {
    pub fn new() -> Self {
        Self
    }
}

impl SearchStrategy for BatchScan {
    fn method(&self) -> Method {
        Method::Sequential
    }

    fn search(
        &mut self,
        oracle: &dyn Oracle,
        config: &SearchConfig,
        parallel: &ParallelConfig,
    ) -> SearchResult {
        let mut statistics = SearchStatistics::new(Method::Sequential);
        let mut founds = Vec::new();
        let mut passes = Vec::new();

        let plan = batches(config.hmin, config.hmax, parallel.num_workers, config.order);
        for (index, &(start, end)) in plan.iter().enumerate() {
            info!(batch = index, start, end, "probing batch");

            let source = BatchSource::new(start, end, config.order);
            let report = run_workers(&source, oracle, parallel);
            statistics.merge(&report.statistics);
            statistics.batches += 1;

            let crossed = match config.order {
                Order::Ascending => !report.founds.is_empty(),
                Order::Descending => !report.passes.is_empty(),
            };
            founds.extend(report.founds);
            passes.extend(report.passes);

            if crossed {
                break;
            }
        }

        statistics.elapsed_time = config.started_at.elapsed();
        SearchResult::from_observations(founds, passes, config.order, statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::testing::{FnOracle, never_fails, threshold};

    fn config(hmin: i64, hmax: i64, order: Order) -> SearchConfig {
        SearchConfig::default()
            .with_range(hmin, hmax)
            .with_method(Method::Sequential)
            .with_order(order)
    }

    #[test]
    fn test_batches_ascending() {
        assert_eq!(
            batches(1, 10, 4, Order::Ascending),
            vec![(1, 4), (5, 8), (9, 10)]
        );
        assert_eq!(batches(5, 5, 3, Order::Ascending), vec![(5, 5)]);
    }

    #[test]
    fn test_batches_descending() {
        assert_eq!(
            batches(1, 10, 4, Order::Descending),
            vec![(7, 10), (3, 6), (1, 2)]
        );
    }

    #[test]
    fn test_batches_zero_width_is_one() {
        assert_eq!(
            batches(1, 3, 0, Order::Ascending),
            vec![(1, 1), (2, 2), (3, 3)]
        );
    }

    #[test]
    fn test_batches_at_i64_limits() {
        assert_eq!(
            batches(i64::MAX - 4, i64::MAX, 3, Order::Ascending),
            vec![(i64::MAX - 4, i64::MAX - 2), (i64::MAX - 1, i64::MAX)]
        );
        assert_eq!(
            batches(i64::MIN, i64::MIN + 4, 3, Order::Descending),
            vec![(i64::MIN + 2, i64::MIN + 4), (i64::MIN, i64::MIN + 1)]
        );
    }

    #[test]
    fn test_batches_empty_range() {
        assert!(batches(5, 4, 2, Order::Ascending).is_empty());
    }

    #[test]
    fn test_ascending_stops_after_crossing_batch() {
        let oracle = FnOracle::new(threshold(7));
        let parallel = ParallelConfig::default().with_workers(3);

        let result =
            BatchScan::new().search(&oracle, &config(1, 100, Order::Ascending), &parallel);

        assert_eq!(result.boundary, Some(7));
        // Batches (1,3), (4,6), (7,9); the whole crossing batch is probed.
        assert_eq!(oracle.probed(), (1..=9).collect::<Vec<_>>());
        assert_eq!(result.statistics.batches, 3);
    }

    #[test]
    fn test_descending_stops_after_crossing_batch() {
        let oracle = FnOracle::new(threshold(42));
        let parallel = ParallelConfig::default().with_workers(4);

        let result =
            BatchScan::new().search(&oracle, &config(0, 50, Order::Descending), &parallel);

        assert_eq!(result.boundary, Some(42));
        // Batches (47,50), (43,46), (39,42).
        assert_eq!(oracle.probed(), (39..=50).collect::<Vec<_>>());
    }

    #[test]
    fn test_no_solution_in_either_direction() {
        for order in [Order::Ascending, Order::Descending] {
            let oracle = FnOracle::new(never_fails);
            let parallel = ParallelConfig::default().with_workers(2);

            let result = BatchScan::new().search(&oracle, &config(1, 9, order), &parallel);

            assert_eq!(result.boundary, None, "order {:?}", order);
        }
    }

    #[test]
    fn test_inconclusive_batch_does_not_stop_scan() {
        let oracle = FnOracle::new(|step| match step {
            1..=2 => Outcome::Inconclusive,
            s if s >= 5 => Outcome::PredicateFalse,
            _ => Outcome::PredicateTrue,
        });
        let parallel = ParallelConfig::default().with_workers(2);

        let result =
            BatchScan::new().search(&oracle, &config(1, 10, Order::Ascending), &parallel);

        assert_eq!(result.boundary, Some(5));
        assert_eq!(result.statistics.probes_inconclusive, 2);
    }
}
