//! Error type for a full run.

use std::error::Error;
use std::fmt;

use calor_core::{FieldError, ProblemError};

use crate::config::ConfigError;

/// Errors that abort [`Driver::full_solve`](crate::Driver::full_solve).
///
/// The loop stops at the first error. Log entries recorded before
/// the failure stay in the driver's logger.
#[derive(Clone, Debug, PartialEq)]
pub enum SolveError {
    /// The run configuration was rejected before any step ran.
    Config(ConfigError),
    /// Boundary application or right-hand-side evaluation failed.
    Problem(ProblemError),
    /// The time stepper was handed mismatched fields.
    Field(FieldError),
    /// A step produced NaN or infinity (only with
    /// [`SolveConfig::check_finite`](crate::SolveConfig::check_finite)).
    NonFinite {
        /// Time at the end of the offending step.
        time: f64,
        /// Flat index of the first non-finite cell.
        cell_index: usize,
    },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Problem(e) => write!(f, "problem: {e}"),
            Self::Field(e) => write!(f, "stepper: {e}"),
            Self::NonFinite { time, cell_index } => {
                write!(f, "non-finite value at cell {cell_index} at t={time}")
            }
        }
    }
}

impl Error for SolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Problem(e) => Some(e),
            Self::Field(e) => Some(e),
            Self::NonFinite { .. } => None,
        }
    }
}

impl From<ConfigError> for SolveError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ProblemError> for SolveError {
    fn from(e: ProblemError) -> Self {
        Self::Problem(e)
    }
}

impl From<FieldError> for SolveError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}
