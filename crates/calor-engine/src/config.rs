//! Run configuration and validation.
//!
//! [`SolveConfig`] carries the time interval and step for one call to
//! [`Driver::full_solve`](crate::Driver::full_solve).
//! [`validate()`](SolveConfig::validate) rejects intervals the loop
//! cannot run before any work is done.

use std::error::Error;
use std::fmt;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`SolveConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `dt` is NaN, infinite, zero, or negative.
    InvalidDt {
        /// The rejected value.
        value: f64,
    },
    /// The interval is not finite or `t_start >= t_end`.
    InvalidInterval {
        /// Requested start time.
        t_start: f64,
        /// Requested end time.
        t_end: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDt { value } => {
                write!(f, "dt must be finite and positive, got {value}")
            }
            Self::InvalidInterval { t_start, t_end } => {
                write!(f, "invalid time interval [{t_start}, {t_end})")
            }
        }
    }
}

impl Error for ConfigError {}

// ── SolveConfig ────────────────────────────────────────────────────

/// Time interval and step for a run.
///
/// # Examples
///
/// ```
/// use calor_engine::SolveConfig;
///
/// let config = SolveConfig::new(0.0, 1.0, 0.25);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.planned_steps(), 4);
///
/// assert!(SolveConfig::new(1.0, 0.0, 0.25).validate().is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SolveConfig {
    /// Time of the initial condition.
    pub t_start: f64,
    /// The loop runs while the current time is below `t_end`. The last
    /// step may overshoot it.
    pub t_end: f64,
    /// Fixed time step.
    pub dt: f64,
    /// Abort with [`SolveError::NonFinite`](crate::SolveError::NonFinite)
    /// as soon as a step produces NaN or infinity. Default: `false`.
    pub check_finite: bool,
}

impl SolveConfig {
    /// A configuration with finite-value checking off.
    pub fn new(t_start: f64, t_end: f64, dt: f64) -> Self {
        Self {
            t_start,
            t_end,
            dt,
            check_finite: false,
        }
    }

    /// Enable or disable the per-step NaN/infinity check.
    pub fn with_check_finite(mut self, check: bool) -> Self {
        self.check_finite = check;
        self
    }

    /// Check that the interval and step can drive the loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidDt { value: self.dt });
        }
        if !self.t_start.is_finite() || !self.t_end.is_finite() || self.t_start >= self.t_end {
            return Err(ConfigError::InvalidInterval {
                t_start: self.t_start,
                t_end: self.t_end,
            });
        }
        Ok(())
    }

    /// Time at the start of step `n` (0-based).
    ///
    /// Computed from `t_start` directly so rounding does not accumulate
    /// over long runs.
    pub fn time_at(&self, n: u64) -> f64 {
        self.t_start + n as f64 * self.dt
    }

    /// Number of steps the loop will take: the smallest `n` with
    /// `time_at(n) >= t_end`. Zero for an invalid configuration.
    pub fn planned_steps(&self) -> u64 {
        if self.validate().is_err() {
            return 0;
        }
        let estimate = ((self.t_end - self.t_start) / self.dt).ceil().max(0.0) as u64;
        // The estimate can be off by one either way after rounding.
        let mut n = estimate.saturating_sub(1);
        while self.time_at(n) < self.t_end {
            n += 1;
        }
        n
    }
}
