//! Reusable problem fixtures.
//!
//! - [`ConstantRhs`] has `du/dt = c` everywhere and no boundaries.
//! - [`FailingProblem`] fails deterministically after N evaluations.

use std::sync::atomic::{AtomicUsize, Ordering};

use calor_core::ProblemError;
use calor_grid::{GridSpec, ScalarField};
use calor_problem::{BoundaryHandler, Bounded, Problem};

/// `du/dt = rate` at every point, with no boundary conditions.
///
/// Forward Euler integrates this exactly: after `n` steps every value
/// has grown by `n * dt * rate`.
pub struct ConstantRhs {
    pub rate: f64,
    boundaries: BoundaryHandler,
}

impl ConstantRhs {
    pub fn new(spec: &GridSpec, rate: f64) -> Self {
        Self {
            rate,
            boundaries: BoundaryHandler::new(spec, Vec::new()).expect("no conditions"),
        }
    }
}

impl Problem for ConstantRhs {
    fn name(&self) -> &str {
        "constant_rhs"
    }

    fn set_bcs<'a>(
        &self,
        t: f64,
        field: &'a mut ScalarField,
    ) -> Result<Bounded<'a>, ProblemError> {
        Ok(self.boundaries.apply(t, field)?)
    }

    fn rhs(&self, field: &Bounded<'_>) -> Result<ScalarField, ProblemError> {
        let mut out = field.scaled(0.0);
        out.as_mut_slice().fill(self.rate);
        Ok(out)
    }
}

/// Returns a zero right-hand side for the first `fail_after` calls to
/// `rhs`, then fails every call after that.
pub struct FailingProblem {
    fail_after: usize,
    calls: AtomicUsize,
    boundaries: BoundaryHandler,
}

impl FailingProblem {
    pub fn new(spec: &GridSpec, fail_after: usize) -> Self {
        Self {
            fail_after,
            calls: AtomicUsize::new(0),
            boundaries: BoundaryHandler::new(spec, Vec::new()).expect("no conditions"),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Problem for FailingProblem {
    fn name(&self) -> &str {
        "failing"
    }

    fn set_bcs<'a>(
        &self,
        t: f64,
        field: &'a mut ScalarField,
    ) -> Result<Bounded<'a>, ProblemError> {
        Ok(self.boundaries.apply(t, field)?)
    }

    fn rhs(&self, field: &Bounded<'_>) -> Result<ScalarField, ProblemError> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed);
        if n >= self.fail_after {
            return Err(ProblemError::InvalidParameter {
                name: "calls",
                value: n as f64,
            });
        }
        Ok(field.scaled(0.0))
    }
}
