//! Time-stepping drivers for Calor problems.
//!
//! The [`Driver`] owns the solution field and runs the time loop. Each
//! iteration hands the field to the [`SpatialDriver`] (apply boundaries,
//! log a snapshot, evaluate the right-hand side) and then to a
//! [`TimeStepper`] that advances it by `dt`.
//!
//! Everything is single-threaded and synchronous: step `n + 1` starts
//! only after step `n` has fully updated the field.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod driver;
pub mod error;
pub mod logger;
pub mod metrics;
pub mod spatial;
pub mod stepper;

pub use config::{ConfigError, SolveConfig};
pub use driver::{Driver, SolveOutcome};
pub use error::SolveError;
pub use logger::{LogEntry, Logger};
pub use metrics::RunMetrics;
pub use spatial::SpatialDriver;
pub use stepper::{ForwardEuler, TimeStepper};
