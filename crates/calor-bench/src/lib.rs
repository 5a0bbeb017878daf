//! Benchmark profiles for the Calor time-stepping framework.
//!
//! - [`reference_profile`]: 101x101 grid (~10K cells), zero Dirichlet edges
//! - [`stress_profile`]: 317x317 grid (~100K cells) for stress testing
//! - [`gaussian`]: a smooth initial condition centred in the domain

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::error::Error;
use std::fmt;

use calor_core::ProblemError;
use calor_engine::{Driver, ForwardEuler, Logger, SpatialDriver};
use calor_grid::{GridError, GridOperator, GridSpec, OperatorSet, ScalarField, Stencil};
use calor_problem::{BoundaryHandler, HeatEquation, Problem};

/// Diffusivity shared by all profiles.
pub const ALPHA: f64 = 0.1;

/// A ready-to-run heat problem: its grid, a driver, and a stable `dt`.
#[derive(Debug)]
pub struct Profile {
    /// The grid.
    pub spec: GridSpec,
    /// Forward-Euler driver over the heat equation.
    pub driver: Driver,
    /// Half the stability limit.
    pub dt: f64,
}

/// Errors building a profile.
#[derive(Debug)]
pub enum ProfileError {
    /// The grid was rejected.
    Grid(GridError),
    /// The problem was rejected.
    Problem(ProblemError),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "profile grid: {e}"),
            Self::Problem(e) => write!(f, "profile problem: {e}"),
        }
    }
}

impl Error for ProfileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Problem(e) => Some(e),
        }
    }
}

impl From<GridError> for ProfileError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<ProblemError> for ProfileError {
    fn from(e: ProblemError) -> Self {
        Self::Problem(e)
    }
}

/// Build an `n` by `n` profile on the unit square.
pub fn square_profile(n: usize, stencil: Stencil) -> Result<Profile, ProfileError> {
    let spec = GridSpec::uniform(&[(0.0, 1.0, n), (0.0, 1.0, n)])?;
    let ops: OperatorSet = [GridOperator::laplacian(&spec, stencil)].into_iter().collect();
    let heat = HeatEquation::new(BoundaryHandler::dirichlet_zero(&spec), ALPHA, ops)?;
    let dt = 0.5 * heat.max_stable_dt().unwrap_or(f64::INFINITY);
    let driver = Driver::new(
        SpatialDriver::new(Box::new(heat), Logger::new()),
        Box::new(ForwardEuler),
    );
    Ok(Profile { spec, driver, dt })
}

/// 101x101 grid (~10K cells), second-order stencil.
pub fn reference_profile() -> Result<Profile, ProfileError> {
    square_profile(101, Stencil::Central2)
}

/// 317x317 grid (~100K cells), second-order stencil.
pub fn stress_profile() -> Result<Profile, ProfileError> {
    square_profile(317, Stencil::Central2)
}

/// A Gaussian bump of width `0.1` at the centre of the domain.
pub fn gaussian(spec: &GridSpec) -> ScalarField {
    ScalarField::from_fn(spec, |x| {
        let r2: f64 = x.iter().map(|xi| (xi - 0.5).powi(2)).sum();
        (-r2 / 0.01).exp()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_error_reports_its_cause() {
        let err = square_profile(1, Stencil::Central2).unwrap_err();
        assert!(matches!(err, ProfileError::Grid(GridError::TooFewPoints { .. })));
        assert!(err.to_string().starts_with("profile grid: "));
        assert!(err.source().is_some());
    }

    #[test]
    fn reference_profile_is_stable() {
        let mut p = reference_profile().unwrap();
        let u0 = gaussian(&p.spec);
        let peak = u0.as_slice().iter().cloned().fold(0.0, f64::max);
        let out = p.driver.full_solve_range(0.0, 10.0 * p.dt, p.dt, u0).unwrap();
        assert_eq!(out.metrics.steps, 10);
        let after = out.field.as_slice().iter().cloned().fold(0.0, f64::max);
        assert!(after <= peak);
    }
}
