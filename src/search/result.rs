//! Search result types and statistics

use crate::search::config::{Method, Order};
use std::time::Duration;

/// Result of a search run
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// The boundary value, if any violation was observed
    pub boundary: Option<i64>,
    /// Steps where the oracle reported a violation, in arrival order
    pub founds: Vec<i64>,
    /// Steps where the oracle verified successfully, in arrival order
    pub passes: Vec<i64>,
    /// Statistics from the run
    pub statistics: SearchStatistics,
}

impl SearchResult {
    /// Build a result, deriving the boundary from the observed steps.
    pub fn from_observations(
        founds: Vec<i64>,
        passes: Vec<i64>,
        order: Order,
        statistics: SearchStatistics,
    ) -> Self {
        let boundary = derive_boundary(&founds, &passes, order);
        Self {
            boundary,
            founds,
            passes,
            statistics,
        }
    }
}

/// Boundary implied by the observed violations and passes.
///
/// No violation means no solution. Ascending searches take the smallest
/// violation; descending searches take one above the largest pass, falling
/// back to the smallest violation when every probed step violated.
pub fn derive_boundary(founds: &[i64], passes: &[i64], order: Order) -> Option<i64> {
    let lowest_violation = founds.iter().copied().min()?;
    match order {
        Order::Ascending => Some(lowest_violation),
        Order::Descending => Some(
            passes
                .iter()
                .copied()
                .max()
                .and_then(|pass| pass.checked_add(1))
                .unwrap_or(lowest_violation),
        ),
    }
}

/// Statistics from a search run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Strategy that produced the result
    pub method: Method,
    /// Wall-clock time since the run started
    pub elapsed_time: Duration,
    /// Oracle invocations started
    pub probes_started: u64,
    /// Oracle invocations that ran to completion
    pub probes_completed: u64,
    /// Oracle invocations killed because their step went stale
    pub probes_cancelled: u64,
    /// Oracle invocations that could not be started
    pub probes_inconclusive: u64,
    /// Completed probes that reported a violation
    pub violations_found: u64,
    /// Batches probed (batch strategy only)
    pub batches: u64,
}

impl SearchStatistics {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    /// Add the probe counters of `other` to these.
    pub fn merge(&mut self, other: &SearchStatistics) {
        self.probes_started += other.probes_started;
        self.probes_completed += other.probes_completed;
        self.probes_cancelled += other.probes_cancelled;
        self.probes_inconclusive += other.probes_inconclusive;
        self.violations_found += other.violations_found;
        self.batches += other.batches;
    }

    /// Fraction of started probes that were cancelled (0.0 to 1.0)
    pub fn cancellation_rate(&self) -> f64 {
        if self.probes_started == 0 {
            0.0
        } else {
            self.probes_cancelled as f64 / self.probes_started as f64
        }
    }

    /// Format statistics as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Method: {}\n", self.method));
        s.push_str(&format!("Time: {:.2?}\n", self.elapsed_time));
        s.push_str(&format!("Probes started: {}\n", self.probes_started));
        s.push_str(&format!("Probes completed: {}\n", self.probes_completed));
        s.push_str(&format!(
            "Probes cancelled: {} ({:.1}%)\n",
            self.probes_cancelled,
            self.cancellation_rate() * 100.0
        ));
        if self.probes_inconclusive > 0 {
            s.push_str(&format!(
                "Probes inconclusive: {}\n",
                self.probes_inconclusive
            ));
        }
        s.push_str(&format!("Violations found: {}\n", self.violations_found));
        if self.batches > 0 {
            s.push_str(&format!("Batches: {}\n", self.batches));
        }
        s
    }
}
