//! The [`Problem`] trait.

use crate::boundary::Bounded;
use calor_core::ProblemError;
use calor_grid::ScalarField;

/// The spatial part of a semi-discretised PDE.
///
/// # Contract
///
/// - [`set_bcs`](Self::set_bcs) overwrites boundary values in place and
///   returns the proof that it did.
/// - [`rhs`](Self::rhs) is a pure function of the bounded field: it
///   never mutates its input and returns a field of the same shape.
/// - Operators and boundaries are fixed at construction; nothing
///   changes between calls.
///
/// # Object safety
///
/// The spatial driver stores problems as `Box<dyn Problem>`.
pub trait Problem: Send + 'static {
    /// Human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// Write the boundary values for time `t` into `field`.
    fn set_bcs<'a>(&self, t: f64, field: &'a mut ScalarField)
        -> Result<Bounded<'a>, ProblemError>;

    /// Evaluate `du/dt` on a field whose boundaries are current.
    fn rhs(&self, field: &Bounded<'_>) -> Result<ScalarField, ProblemError>;

    /// Largest time step for which forward Euler stays stable, if known.
    ///
    /// Advisory only: drivers report a larger `dt` but do not refuse it.
    fn max_stable_dt(&self) -> Option<f64> {
        None
    }
}
