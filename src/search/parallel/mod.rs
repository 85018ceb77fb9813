//! Parallel probe execution.
//!
//! # Architecture
//!
//! - A fixed pool of **workers**, each looping: claim a step from a shared
//!   [`StepSource`], run the oracle, report the verdict back to the source
//! - A **coordinator** (the calling thread) that receives worker messages,
//!   logs them, and is the single owner of the observed violations and passes
//! - **Shared state** ([`SharedBounds`], [`StopSignal`]) for cheap checks
//!   without taking locks or going through the channel
//!
//! ```ignore
//! let config = ParallelConfig::default().with_workers(4);
//! let report = run_workers(&source, &oracle, &config);
//! ```

pub mod channel;
pub mod config;
pub mod coordinator;

pub use channel::{SharedBounds, StopSignal};
pub use config::ParallelConfig;
pub use coordinator::{StepSource, run_workers};
