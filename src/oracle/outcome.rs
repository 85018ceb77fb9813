//! Classification of oracle output.

use std::fmt;

/// Marker the verifier prints when it finds a counterexample.
pub const VIOLATION_MARKER: &str = "VERIFICATION FAILED";

/// Verdict of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The oracle verified the program for this step.
    PredicateTrue,
    /// The oracle reported a violation for this step.
    PredicateFalse,
    /// No verdict; the oracle could not be started.
    Inconclusive,
}

impl Outcome {
    /// Whether this outcome is a violation (a "found").
    pub fn is_violation(self) -> bool {
        self == Outcome::PredicateFalse
    }

    /// Predicate value, if the probe produced evidence.
    pub fn predicate(self) -> Option<bool> {
        match self {
            Outcome::PredicateTrue => Some(true),
            Outcome::PredicateFalse => Some(false),
            Outcome::Inconclusive => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::PredicateTrue => write!(f, "True"),
            Outcome::PredicateFalse => write!(f, "False"),
            Outcome::Inconclusive => write!(f, "Inconclusive"),
        }
    }
}

/// Classify the combined output of a finished oracle run.
pub fn classify_output(output: &[u8]) -> Outcome {
    let marker = VIOLATION_MARKER.as_bytes();
    if output.windows(marker.len()).any(|window| window == marker) {
        Outcome::PredicateFalse
    } else {
        Outcome::PredicateTrue
    }
}
