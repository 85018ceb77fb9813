//! Process supervision for oracle invocations.

pub mod supervisor;

pub use supervisor::{PollStatus, ProcessSupervisor};
