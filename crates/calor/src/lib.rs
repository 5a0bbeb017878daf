//! Calor: explicit finite-difference time stepping for the heat equation.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Calor sub-crates. For most users, adding `calor` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use calor::prelude::*;
//!
//! // A 21×21 grid on the unit square.
//! let spec = GridSpec::uniform(&[(0.0, 1.0, 21), (0.0, 1.0, 21)]).unwrap();
//!
//! // u_t = 0.1 ∇²u with every edge held at zero.
//! let ops: OperatorSet = [GridOperator::laplacian(&spec, Stencil::Central2)]
//!     .into_iter()
//!     .collect();
//! let heat = HeatEquation::new(BoundaryHandler::dirichlet_zero(&spec), 0.1, ops).unwrap();
//! let dt = 0.5 * heat.max_stable_dt().unwrap();
//!
//! let spatial = SpatialDriver::new(Box::new(heat), Logger::new());
//! let mut driver = Driver::new(spatial, Box::new(ForwardEuler));
//!
//! let u0 = ScalarField::from_fn(&spec, |x| (x[0] * (1.0 - x[0])) * (x[1] * (1.0 - x[1])));
//! let out = driver.full_solve(&SolveConfig::new(0.0, 0.05, dt), u0).unwrap();
//!
//! assert!(out.final_time >= 0.05);
//! assert_eq!(driver.logger().len() as u64, out.metrics.steps);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `calor-core` | Axis sides, operator kinds, shape helpers, errors |
//! | [`grid`] | `calor-grid` | Grids, scalar fields, stencils, operators |
//! | [`problem`] | `calor-problem` | Boundary conditions, the `Problem` trait, heat equation |
//! | [`engine`] | `calor-engine` | Spatial driver, time steppers, time loop, logger |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Shared identifiers, shape arithmetic, and error types (`calor-core`).
pub use calor_core as types;

/// Structured grids, scalar fields, and stencil operators (`calor-grid`).
///
/// [`grid::GridSpec`] describes the grid; [`grid::GridOperator`] binds a
/// [`grid::Stencil`] to it.
pub use calor_grid as grid;

/// Boundary conditions and problem definitions (`calor-problem`).
///
/// The [`problem::Problem`] trait is the extension point for new PDEs;
/// [`problem::HeatEquation`] is the reference implementation.
pub use calor_problem as problem;

/// Time loop, time steppers, and snapshot logging (`calor-engine`).
pub use calor_engine as engine;

/// Common imports for typical Calor usage.
///
/// ```rust
/// use calor::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use calor_core::{BoundaryError, FieldError, OperatorKind, ProblemError, Side};

    // Grid
    pub use calor_grid::{
        EdgeBehavior, GridError, GridOperator, GridSpec, OperatorSet, ScalarField, Stencil,
    };

    // Problem
    pub use calor_problem::{BoundaryCondition, BoundaryHandler, Bounded, HeatEquation, Problem};

    // Engine
    pub use calor_engine::{
        Driver, ForwardEuler, LogEntry, Logger, RunMetrics, SolveConfig, SolveError,
        SolveOutcome, SpatialDriver, TimeStepper,
    };
}
