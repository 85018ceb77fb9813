//! Error types for the parallel runner.
//!
//! - [`SpawnError`] is local to a single probe and turns into an
//!   inconclusive outcome; it never aborts a run.
//! - [`ConfigError`] is fatal and is raised before any oracle is started.

use std::io;
use thiserror::Error;

/// Failure to start an oracle process.
#[derive(Error, Debug)]
pub enum SpawnError {
    /// The output pipe could not be created.
    #[error("failed to create output pipe: {0}")]
    Pipe(#[source] io::Error),
    /// The executable could not be started.
    #[error("failed to execute `{program}`: {source}")]
    Exec {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl SpawnError {
    /// Short stable label for log fields.
    pub fn as_label(&self) -> &'static str {
        match self {
            SpawnError::Pipe(_) => "spawn_pipe",
            SpawnError::Exec { .. } => "spawn_exec",
        }
    }
}

/// Invalid run configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid method: '{0}'. Valid options: sequential, sequential_opt, binary")]
    InvalidMethod(String),
    #[error("invalid order: '{0}'. Valid options: asc, desc")]
    InvalidOrder(String),
    #[error("invalid range: hmin ({hmin}) is greater than hmax ({hmax})")]
    InvalidRange { hmin: i64, hmax: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_error_labels() {
        let pipe = SpawnError::Pipe(io::Error::other("boom"));
        assert_eq!(pipe.as_label(), "spawn_pipe");

        let exec = SpawnError::Exec {
            program: "./esbmc".to_string(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(exec.as_label(), "spawn_exec");
        assert!(exec.to_string().contains("./esbmc"));
    }

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::InvalidRange { hmin: 10, hmax: 2 };
        assert_eq!(
            err.to_string(),
            "invalid range: hmin (10) is greater than hmax (2)"
        );
        assert!(
            ConfigError::InvalidMethod("fast".into())
                .to_string()
                .contains("sequential_opt")
        );
    }
}
