//! Test fixtures and reference solutions for Calor development.
//!
//! Grid and problem builders that would otherwise be repeated across
//! every integration test, plus the closed-form decay rates of sine
//! modes used to check the solver against known answers.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::f64::consts::PI;

use calor_engine::{Driver, ForwardEuler, Logger, SpatialDriver};
use calor_grid::{GridOperator, GridSpec, OperatorSet, ScalarField, Stencil};
use calor_problem::{BoundaryHandler, HeatEquation};

/// `n` evenly spaced points on `[0, 1]`.
pub fn unit_interval(n: usize) -> GridSpec {
    GridSpec::uniform(&[(0.0, 1.0, n)]).expect("valid unit interval")
}

/// `nx` by `ny` points on `[0, 1]^2`.
pub fn unit_square(nx: usize, ny: usize) -> GridSpec {
    GridSpec::uniform(&[(0.0, 1.0, nx), (0.0, 1.0, ny)]).expect("valid unit square")
}

/// An operator set holding only a Laplacian.
pub fn laplacian_set(spec: &GridSpec, stencil: Stencil) -> OperatorSet {
    [GridOperator::laplacian(spec, stencil)].into_iter().collect()
}

/// Heat equation with zero Dirichlet edges and a second-order Laplacian.
pub fn heat_problem(spec: &GridSpec, alpha: f64) -> HeatEquation {
    heat_problem_with(spec, alpha, Stencil::Central2)
}

/// Heat equation with zero Dirichlet edges and the given stencil.
pub fn heat_problem_with(spec: &GridSpec, alpha: f64, stencil: Stencil) -> HeatEquation {
    HeatEquation::new(
        BoundaryHandler::dirichlet_zero(spec),
        alpha,
        laplacian_set(spec, stencil),
    )
    .expect("valid heat problem")
}

/// Forward-Euler driver over [`heat_problem`].
pub fn heat_driver(spec: &GridSpec, alpha: f64) -> Driver {
    heat_driver_with(spec, alpha, Stencil::Central2)
}

/// Forward-Euler driver over [`heat_problem_with`].
pub fn heat_driver_with(spec: &GridSpec, alpha: f64, stencil: Stencil) -> Driver {
    Driver::new(
        SpatialDriver::new(
            Box::new(heat_problem_with(spec, alpha, stencil)),
            Logger::new(),
        ),
        Box::new(ForwardEuler),
    )
}

/// Product of `sin(k_i * pi * s_i)` where `s_i` is the point's position
/// along axis `i` rescaled to `[0, 1]`. Vanishes on every edge.
pub fn sine_mode(spec: &GridSpec, modes: &[usize]) -> ScalarField {
    assert_eq!(modes.len(), spec.ndim(), "one mode number per axis");
    let bounds: Vec<(f64, f64)> = (0..spec.ndim())
        .map(|axis| {
            let c = spec.coords(axis).expect("axis in range");
            (c[0], c[c.len() - 1])
        })
        .collect();
    ScalarField::from_fn(spec, |x| {
        x.iter()
            .zip(&bounds)
            .zip(modes)
            .map(|((&xi, &(lo, hi)), &k)| (k as f64 * PI * (xi - lo) / (hi - lo)).sin())
            .product()
    })
}

/// Continuous decay rate of [`sine_mode`] under `u_t = alpha * lap(u)`:
/// the mode scales by `exp(-rate * t)`.
pub fn continuous_decay_rate(spec: &GridSpec, alpha: f64, modes: &[usize]) -> f64 {
    let sum: f64 = modes
        .iter()
        .enumerate()
        .map(|(axis, &k)| {
            let c = spec.coords(axis).expect("axis in range");
            let len = c[c.len() - 1] - c[0];
            (k as f64 * PI / len).powi(2)
        })
        .sum();
    alpha * sum
}

/// Decay rate of [`sine_mode`] under the semi-discrete system built
/// with the second-order central Laplacian. One forward Euler step
/// scales the mode by exactly `1 - dt * rate`.
pub fn discrete_decay_rate(spec: &GridSpec, alpha: f64, modes: &[usize]) -> f64 {
    let sum: f64 = modes
        .iter()
        .zip(spec.spacing())
        .enumerate()
        .map(|(axis, (&k, &h))| {
            let c = spec.coords(axis).expect("axis in range");
            let len = c[c.len() - 1] - c[0];
            let s = (k as f64 * PI * h / (2.0 * len)).sin();
            4.0 * s * s / (h * h)
        })
        .sum();
    alpha * sum
}

/// Largest absolute difference, panicking on shape mismatch.
pub fn max_error(a: &ScalarField, b: &ScalarField) -> f64 {
    a.max_abs_diff(b).expect("fields share a shape")
}
