//! The time loop.
//!
//! [`Driver::full_solve`] owns the solution field for the duration of
//! a run. Each iteration:
//!
//! 1. the [`SpatialDriver`] applies boundaries for `t`, logs a
//!    snapshot, and evaluates the right-hand side;
//! 2. the [`TimeStepper`] consumes the field and returns it advanced
//!    by `dt`;
//! 3. time moves to `t_start + n * dt`.
//!
//! The loop runs while `t < t_end`, so the final step may overshoot
//! `t_end` when the interval is not a whole number of steps. The
//! returned field has not had boundaries re-applied after the last
//! step.

use std::time::Instant;

use calor_grid::ScalarField;

use crate::config::SolveConfig;
use crate::error::SolveError;
use crate::logger::Logger;
use crate::metrics::RunMetrics;
use crate::spatial::SpatialDriver;
use crate::stepper::TimeStepper;

/// Result of a completed run.
#[derive(Clone, Debug)]
pub struct SolveOutcome {
    /// The field after the last step.
    pub field: ScalarField,
    /// Time the field corresponds to. At least `t_end`.
    pub final_time: f64,
    /// Timing and counters for the run.
    pub metrics: RunMetrics,
}

/// Runs a [`SpatialDriver`] and a [`TimeStepper`] over a time interval.
///
/// # Examples
///
/// ```
/// use calor_engine::{Driver, ForwardEuler, Logger, SpatialDriver};
/// use calor_grid::{GridOperator, GridSpec, OperatorSet, ScalarField, Stencil};
/// use calor_problem::{BoundaryHandler, HeatEquation};
///
/// let spec = GridSpec::uniform(&[(0.0, 1.0, 11), (0.0, 1.0, 11)]).unwrap();
/// let ops: OperatorSet = [GridOperator::laplacian(&spec, Stencil::Central2)]
///     .into_iter()
///     .collect();
/// let heat = HeatEquation::new(BoundaryHandler::dirichlet_zero(&spec), 1.0, ops).unwrap();
///
/// let spatial = SpatialDriver::new(Box::new(heat), Logger::new());
/// let mut driver = Driver::new(spatial, Box::new(ForwardEuler));
///
/// let u0 = ScalarField::zeros(&spec);
/// let out = driver.full_solve_range(0.0, 0.0078125, 0.0009765625, u0).unwrap();
/// assert_eq!(out.metrics.steps, 8);
/// assert_eq!(driver.logger().len(), 8);
/// assert!(out.field.as_slice().iter().all(|&v| v == 0.0));
/// ```
pub struct Driver {
    spatial: SpatialDriver,
    stepper: Box<dyn TimeStepper>,
}

impl Driver {
    /// Pair a spatial driver with a time stepper.
    pub fn new(spatial: SpatialDriver, stepper: Box<dyn TimeStepper>) -> Self {
        Self { spatial, stepper }
    }

    /// The spatial driver.
    pub fn spatial(&self) -> &SpatialDriver {
        &self.spatial
    }

    /// The time stepper.
    pub fn stepper(&self) -> &dyn TimeStepper {
        self.stepper.as_ref()
    }

    /// Snapshots recorded so far.
    pub fn logger(&self) -> &Logger {
        self.spatial.logger()
    }

    /// Consume the driver, returning the snapshot log.
    pub fn into_logger(self) -> Logger {
        self.spatial.into_logger()
    }

    /// Shorthand for [`full_solve`](Self::full_solve) with finite-value
    /// checking off.
    pub fn full_solve_range(
        &mut self,
        t_start: f64,
        t_end: f64,
        dt: f64,
        field: ScalarField,
    ) -> Result<SolveOutcome, SolveError> {
        self.full_solve(&SolveConfig::new(t_start, t_end, dt), field)
    }

    /// Advance `field` from `config.t_start` until time reaches
    /// `config.t_end`.
    ///
    /// A `dt` above the problem's
    /// [`max_stable_dt`](calor_problem::Problem::max_stable_dt) is
    /// reported with a warning but still run.
    ///
    /// # Errors
    ///
    /// Stops at the first failing sub-step. Snapshots logged before the
    /// failure are kept.
    pub fn full_solve(
        &mut self,
        config: &SolveConfig,
        field: ScalarField,
    ) -> Result<SolveOutcome, SolveError> {
        config.validate()?;

        let problem = self.spatial.problem();
        if let Some(limit) = problem.max_stable_dt() {
            if config.dt > limit {
                log::warn!(
                    "dt={} exceeds the stability limit {limit:.3e} for '{}'; expect blow-up",
                    config.dt,
                    problem.name()
                );
            }
        }
        log::info!(
            "solving '{}' with {} on [{}, {}) dt={} ({} steps)",
            problem.name(),
            self.stepper.name(),
            config.t_start,
            config.t_end,
            config.dt,
            config.planned_steps()
        );

        let run_start = Instant::now();
        let mut metrics = RunMetrics::default();
        let mut field = field;
        let mut n: u64 = 0;
        let mut t = config.t_start;

        while t < config.t_end {
            let spatial_start = Instant::now();
            let (_, rhs) = self.spatial.solve(t, &mut field)?;
            metrics.spatial_us += spatial_start.elapsed().as_micros() as u64;

            let step_start = Instant::now();
            field = self.stepper.step(config.dt, field, &rhs)?;
            metrics.step_us += step_start.elapsed().as_micros() as u64;

            n += 1;
            let next = config.time_at(n);
            if config.check_finite {
                if let Some(cell_index) = field.first_non_finite() {
                    log::error!("non-finite value at cell {cell_index} after step {n}");
                    return Err(SolveError::NonFinite {
                        time: next,
                        cell_index,
                    });
                }
            }
            log::debug!("step {n}: t={t} -> {next}");
            t = next;
        }

        metrics.steps = n;
        metrics.total_us = run_start.elapsed().as_micros() as u64;
        metrics.log_entries = self.spatial.logger().len();
        log::info!(
            "finished at t={t} after {n} steps in {}us",
            metrics.total_us
        );

        Ok(SolveOutcome {
            field,
            final_time: t,
            metrics,
        })
    }
}

impl std::fmt::Debug for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("spatial", &self.spatial)
            .field("stepper", &self.stepper.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::stepper::ForwardEuler;
    use calor_core::ProblemError;
    use calor_grid::{GridOperator, GridSpec, OperatorSet, Stencil};
    use calor_problem::{BoundaryHandler, Bounded, HeatEquation, Problem};

    fn heat_driver(spec: &GridSpec, alpha: f64) -> Driver {
        let ops: OperatorSet = [GridOperator::laplacian(spec, Stencil::Central2)]
            .into_iter()
            .collect();
        let problem =
            HeatEquation::new(BoundaryHandler::dirichlet_zero(spec), alpha, ops).unwrap();
        Driver::new(
            SpatialDriver::new(Box::new(problem), Logger::new()),
            Box::new(ForwardEuler),
        )
    }

    /// A problem whose right-hand side is NaN everywhere.
    struct Poisoned {
        boundaries: BoundaryHandler,
    }

    impl Problem for Poisoned {
        fn name(&self) -> &str {
            "poisoned"
        }

        fn set_bcs<'a>(
            &self,
            t: f64,
            field: &'a mut ScalarField,
        ) -> Result<Bounded<'a>, ProblemError> {
            Ok(self.boundaries.apply(t, field)?)
        }

        fn rhs(&self, field: &Bounded<'_>) -> Result<ScalarField, ProblemError> {
            Ok(field.scaled(f64::NAN))
        }
    }

    #[test]
    fn log_times_are_step_starts() {
        let spec = GridSpec::uniform(&[(0.0, 1.0, 5), (0.0, 1.0, 5)]).unwrap();
        let mut driver = heat_driver(&spec, 0.01);
        let out = driver
            .full_solve_range(0.0, 1.0, 0.25, ScalarField::zeros(&spec))
            .unwrap();
        assert_eq!(driver.logger().times(), vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(out.final_time, 1.0);
        assert_eq!(out.metrics.steps, 4);
        assert_eq!(out.metrics.log_entries, 4);
    }

    #[test]
    fn last_step_overshoots() {
        let spec = GridSpec::uniform(&[(0.0, 1.0, 4)]).unwrap();
        let mut driver = heat_driver(&spec, 0.01);
        let out = driver
            .full_solve_range(0.0, 1.0, 0.3, ScalarField::zeros(&spec))
            .unwrap();
        assert_eq!(out.metrics.steps, 4);
        assert!(out.final_time > 1.0);
        assert_eq!(driver.logger().len(), 4);
    }

    #[test]
    fn zero_field_is_a_fixed_point_of_cold_square() {
        let spec = GridSpec::uniform(&[(0.0, 1.0, 11), (0.0, 1.0, 11)]).unwrap();
        let mut driver = heat_driver(&spec, 0.05);
        let out = driver
            .full_solve_range(0.0, 1.0, 0.01, ScalarField::zeros(&spec))
            .unwrap();
        assert_eq!(driver.logger().len() as u64, out.metrics.steps);
        assert!(!driver.logger().is_empty());
        for entry in driver.logger() {
            assert!(
                entry.field().as_slice().iter().all(|&v| v == 0.0),
                "t={}",
                entry.time()
            );
        }
        assert!(out.field.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn zero_field_stays_zero() {
        let spec = GridSpec::uniform(&[(0.0, 1.0, 6), (0.0, 2.0, 7)]).unwrap();
        let mut driver = heat_driver(&spec, 0.1);
        let out = driver
            .full_solve_range(0.0, 0.5, 0.01, ScalarField::zeros(&spec))
            .unwrap();
        assert!(out.field.as_slice().iter().all(|&v| v == 0.0));
        for entry in driver.logger() {
            assert!(entry.field().as_slice().iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn snapshots_precede_their_step() {
        let spec = GridSpec::uniform(&[(0.0, 1.0, 5), (0.0, 1.0, 5)]).unwrap();
        let mut driver = heat_driver(&spec, 0.1);
        let u0 = ScalarField::filled(&spec, 1.0);
        driver.full_solve_range(0.0, 0.1, 0.05, u0).unwrap();

        let first = driver.logger().get(0).unwrap().field();
        let second = driver.logger().get(1).unwrap().field();
        // The first snapshot is the bounded initial condition.
        assert_eq!(first.get(&[2, 2]), Some(1.0));
        assert_eq!(first.get(&[0, 2]), Some(0.0));
        // Diffusion has pulled the cell next to the edge down since.
        assert!(second.get(&[1, 2]).unwrap() < 1.0);
        assert_eq!(first.get(&[1, 2]), Some(1.0));
    }

    #[test]
    fn invalid_config_runs_nothing() {
        let spec = GridSpec::uniform(&[(0.0, 1.0, 4)]).unwrap();
        let mut driver = heat_driver(&spec, 1.0);
        let err = driver
            .full_solve_range(0.0, 1.0, 0.0, ScalarField::zeros(&spec))
            .unwrap_err();
        assert_eq!(err, SolveError::Config(ConfigError::InvalidDt { value: 0.0 }));
        assert!(driver.logger().is_empty());
    }

    #[test]
    fn wrong_shape_field_is_a_problem_error() {
        let spec = GridSpec::uniform(&[(0.0, 1.0, 4)]).unwrap();
        let other = GridSpec::uniform(&[(0.0, 1.0, 7)]).unwrap();
        let mut driver = heat_driver(&spec, 1.0);
        let err = driver
            .full_solve_range(0.0, 1.0, 0.1, ScalarField::zeros(&other))
            .unwrap_err();
        assert!(matches!(err, SolveError::Problem(_)));
    }

    #[test]
    fn non_finite_detected_when_enabled() {
        let spec = GridSpec::uniform(&[(0.0, 1.0, 4)]).unwrap();
        let problem = Poisoned {
            boundaries: BoundaryHandler::new(&spec, Vec::new()).unwrap(),
        };
        let mut driver = Driver::new(
            SpatialDriver::new(Box::new(problem), Logger::new()),
            Box::new(ForwardEuler),
        );
        let config = SolveConfig::new(0.0, 1.0, 0.5).with_check_finite(true);
        let err = driver
            .full_solve(&config, ScalarField::zeros(&spec))
            .unwrap_err();
        assert_eq!(
            err,
            SolveError::NonFinite {
                time: 0.5,
                cell_index: 0
            }
        );
        assert_eq!(driver.logger().len(), 1);
    }

    #[test]
    fn non_finite_ignored_when_disabled() {
        let spec = GridSpec::uniform(&[(0.0, 1.0, 4)]).unwrap();
        let problem = Poisoned {
            boundaries: BoundaryHandler::new(&spec, Vec::new()).unwrap(),
        };
        let mut driver = Driver::new(
            SpatialDriver::new(Box::new(problem), Logger::new()),
            Box::new(ForwardEuler),
        );
        let out = driver
            .full_solve_range(0.0, 1.0, 0.5, ScalarField::zeros(&spec))
            .unwrap();
        assert!(out.field.as_slice().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn unstable_dt_still_runs() {
        let spec = GridSpec::uniform(&[(0.0, 1.0, 11)]).unwrap();
        let mut driver = heat_driver(&spec, 1.0);
        let limit = driver.spatial().problem().max_stable_dt().unwrap();
        let out = driver
            .full_solve_range(0.0, 4.0 * limit, 2.0 * limit, ScalarField::zeros(&spec))
            .unwrap();
        assert_eq!(out.metrics.steps, 2);
    }

    #[test]
    fn reused_driver_keeps_appending() {
        let spec = GridSpec::uniform(&[(0.0, 1.0, 4)]).unwrap();
        let mut driver = heat_driver(&spec, 0.1);
        driver
            .full_solve_range(0.0, 1.0, 0.5, ScalarField::zeros(&spec))
            .unwrap();
        driver
            .full_solve_range(1.0, 2.0, 0.5, ScalarField::zeros(&spec))
            .unwrap();
        assert_eq!(driver.into_logger().times(), vec![0.0, 0.5, 1.0, 1.5]);
    }

    #[test]
    fn debug_names_parts() {
        let spec = GridSpec::uniform(&[(0.0, 1.0, 4)]).unwrap();
        let driver = heat_driver(&spec, 0.1);
        let s = format!("{driver:?}");
        assert!(s.contains("heat") && s.contains("forward_euler"));
    }
}
