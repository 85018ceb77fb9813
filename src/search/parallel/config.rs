//! Configuration for the worker pool.

/// Configuration for parallel probe execution.
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of worker threads, each running at most one oracle at a time.
    pub num_workers: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: default_pool_width(num_cpus::get()),
        }
    }
}

impl ParallelConfig {
    /// Set the number of workers (at least one).
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers.max(1);
        self
    }

    /// Set the number of workers from an Option, keeping the default on `None`.
    pub fn with_workers_option(self, num_workers: Option<usize>) -> Self {
        match num_workers {
            Some(n) => self.with_workers(n),
            None => self,
        }
    }
}

/// One core is left to the runner itself.
pub fn default_pool_width(cores: usize) -> usize {
    cores.saturating_sub(1).max(1)
}
