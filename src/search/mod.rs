//! Boundary search strategies
//!
//! Every strategy looks for the smallest parameter value in `[hmin, hmax]`
//! for which the oracle reports a violation:
//! - Binary: parallel bisection over an interval controller
//! - Sequential: batch scan, one pool-wide batch of consecutive values at a time
//! - SequentialOpt: cursor scan that stops claiming at the first boundary crossing

pub mod batch;
pub mod binary;
pub mod config;
pub mod controller;
pub mod parallel;
pub mod result;
pub mod sequential;

pub use batch::BatchScan;
pub use binary::BinarySearch;
pub use config::{Method, Order, SearchConfig};
pub use parallel::ParallelConfig;
pub use result::SearchResult;
pub use sequential::SequentialScan;

use crate::oracle::Oracle;
use tracing::info;

/// Trait for strategies that locate the violation boundary
pub trait SearchStrategy {
    /// Method this strategy implements
    fn method(&self) -> Method;

    /// Search `[config.hmin, config.hmax]` for the boundary
    ///
    /// # Arguments
    /// * `oracle` - Decides each probed step
    /// * `config` - Range, order and start time of the run
    /// * `parallel` - Worker pool width
    ///
    /// # Returns
    /// A SearchResult with the boundary (if any), observed steps and statistics
    fn search(
        &mut self,
        oracle: &dyn Oracle,
        config: &SearchConfig,
        parallel: &ParallelConfig,
    ) -> SearchResult;
}

/// Strategy implementing `method`.
pub fn strategy_for(method: Method) -> Box<dyn SearchStrategy> {
    match method {
        Method::Binary => Box::new(BinarySearch::new()),
        Method::Sequential => Box::new(BatchScan::new()),
        Method::SequentialOpt => Box::new(SequentialScan::new()),
    }
}

/// Run the strategy selected by `config.method`.
pub fn run_search(
    oracle: &dyn Oracle,
    config: &SearchConfig,
    parallel: &ParallelConfig,
) -> SearchResult {
    let mut strategy = strategy_for(config.method);
    info!(
        method = %strategy.method(),
        order = %config.order,
        hmin = config.hmin,
        hmax = config.hmax,
        workers = parallel.num_workers,
        "starting search"
    );

    let result = strategy.search(oracle, config, parallel);

    let elapsed = result.statistics.elapsed_time;
    match result.boundary {
        Some(boundary) => info!(boundary, ?elapsed, "search finished"),
        None => info!(?elapsed, "search finished without a violation"),
    }
    result
}
