//! Configuration types for the boundary search

use crate::error::ConfigError;
use crate::oracle::OracleInvocation;
use std::time::Instant;

/// Search strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// Parallel bisection over the interval controller
    #[default]
    Binary,
    /// Batch scan: probe a pool-wide batch at a time, stop after the first
    /// batch containing the boundary
    Sequential,
    /// Cursor scan: workers claim the next value and stop on the first
    /// boundary-crossing outcome
    SequentialOpt,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Binary => write!(f, "binary"),
            Method::Sequential => write!(f, "sequential"),
            Method::SequentialOpt => write!(f, "sequential_opt"),
        }
    }
}

impl std::str::FromStr for Method {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary" => Ok(Method::Binary),
            "sequential" => Ok(Method::Sequential),
            "sequential_opt" => Ok(Method::SequentialOpt),
            _ => Err(ConfigError::InvalidMethod(s.to_string())),
        }
    }
}

/// Scan direction for the sequential strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// From hmin upwards; stop on the first violation
    #[default]
    Ascending,
    /// From hmax downwards; stop on the first verified step
    Descending,
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Order::Ascending => write!(f, "Asc"),
            Order::Descending => write!(f, "Desc"),
        }
    }
}

impl std::str::FromStr for Order {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Order::Ascending),
            "desc" => Ok(Order::Descending),
            _ => Err(ConfigError::InvalidOrder(s.to_string())),
        }
    }
}

/// Immutable configuration of one search run
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Lower end of the parameter range (inclusive)
    pub hmin: i64,
    /// Upper end of the parameter range (inclusive)
    pub hmax: i64,
    /// Strategy to run
    pub method: Method,
    /// Scan direction (sequential strategies only)
    pub order: Order,
    /// How the oracle is invoked
    pub invocation: OracleInvocation,
    /// When the run started; elapsed times are measured from here
    pub started_at: Instant,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            hmin: 0,
            hmax: 0,
            method: Method::default(),
            order: Order::default(),
            invocation: OracleInvocation::default(),
            started_at: Instant::now(),
        }
    }
}

impl SearchConfig {
    pub fn with_range(mut self, hmin: i64, hmax: i64) -> Self {
        self.hmin = hmin;
        self.hmax = hmax;
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    pub fn with_invocation(mut self, invocation: OracleInvocation) -> Self {
        self.invocation = invocation;
        self
    }

    pub fn with_start(mut self, started_at: Instant) -> Self {
        self.started_at = started_at;
        self
    }

    /// Reject ranges no strategy can search.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hmin > self.hmax {
            return Err(ConfigError::InvalidRange {
                hmin: self.hmin,
                hmax: self.hmax,
            });
        }
        Ok(())
    }
}
