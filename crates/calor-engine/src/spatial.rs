//! The spatial half of a step: boundaries, logging, right-hand side.

use calor_core::ProblemError;
use calor_grid::ScalarField;
use calor_problem::{Bounded, Problem};

use crate::logger::Logger;

/// Couples a [`Problem`] with a [`Logger`].
///
/// [`solve`](Self::solve) runs the three spatial sub-steps in their
/// fixed order for one time level:
///
/// 1. write boundary values into the field,
/// 2. record a snapshot of the bounded field,
/// 3. evaluate the right-hand side on it.
///
/// Each sub-step is also exposed on its own.
pub struct SpatialDriver {
    problem: Box<dyn Problem>,
    logger: Logger,
}

impl SpatialDriver {
    /// Pair a problem with the logger that will record its snapshots.
    pub fn new(problem: Box<dyn Problem>, logger: Logger) -> Self {
        Self { problem, logger }
    }

    /// The driven problem.
    pub fn problem(&self) -> &dyn Problem {
        self.problem.as_ref()
    }

    /// The snapshot log.
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Mutable access to the snapshot log.
    pub fn logger_mut(&mut self) -> &mut Logger {
        &mut self.logger
    }

    /// Consume the driver, returning the snapshot log.
    pub fn into_logger(self) -> Logger {
        self.logger
    }

    /// Apply the problem's boundary conditions for time `t`.
    pub fn set_bcs<'a>(
        &self,
        t: f64,
        field: &'a mut ScalarField,
    ) -> Result<Bounded<'a>, ProblemError> {
        self.problem.set_bcs(t, field)
    }

    /// Record a snapshot of `field` at the time its boundaries were
    /// applied for.
    pub fn log_data(&mut self, field: &Bounded<'_>) {
        self.logger.log(field.time(), field.snapshot());
    }

    /// Evaluate the problem's right-hand side.
    pub fn eval_rhs(&self, field: &Bounded<'_>) -> Result<ScalarField, ProblemError> {
        self.problem.rhs(field)
    }

    /// Run boundaries, logging, and right-hand side for time `t`.
    ///
    /// Returns the bounded field alongside `du/dt`. The bounded view
    /// keeps `field` borrowed; drop it before handing the field to a
    /// time stepper.
    pub fn solve<'a>(
        &mut self,
        t: f64,
        field: &'a mut ScalarField,
    ) -> Result<(Bounded<'a>, ScalarField), ProblemError> {
        let bounded = self.set_bcs(t, field)?;
        self.log_data(&bounded);
        let rhs = self.eval_rhs(&bounded)?;
        Ok((bounded, rhs))
    }
}

impl std::fmt::Debug for SpatialDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialDriver")
            .field("problem", &self.problem.name())
            .field("log_entries", &self.logger.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calor_grid::{GridOperator, GridSpec, OperatorSet, Stencil};
    use calor_problem::{BoundaryHandler, HeatEquation};

    fn heat(spec: &GridSpec, alpha: f64) -> SpatialDriver {
        let ops: OperatorSet = [GridOperator::laplacian(spec, Stencil::Central2)]
            .into_iter()
            .collect();
        let problem =
            HeatEquation::new(BoundaryHandler::dirichlet_zero(spec), alpha, ops).unwrap();
        SpatialDriver::new(Box::new(problem), Logger::new())
    }

    #[test]
    fn solve_logs_bounded_field() {
        let spec = GridSpec::uniform(&[(0.0, 1.0, 4), (0.0, 1.0, 4)]).unwrap();
        let mut spatial = heat(&spec, 1.0);
        let mut u = ScalarField::filled(&spec, 1.0);

        let (bounded, rhs) = spatial.solve(0.5, &mut u).unwrap();
        assert_eq!(bounded.time(), 0.5);
        assert_eq!(rhs.shape(), spec.shape());

        let entry = spatial.logger().last().unwrap();
        assert_eq!(entry.time(), 0.5);
        // Edges were zeroed before the snapshot was taken.
        assert_eq!(entry.field().get(&[0, 1]), Some(0.0));
        assert_eq!(entry.field().get(&[1, 1]), Some(1.0));
    }

    #[test]
    fn sub_steps_match_solve() {
        let spec = GridSpec::uniform(&[(0.0, 1.0, 5)]).unwrap();
        let mut spatial = heat(&spec, 0.5);
        let mut u = ScalarField::from_fn(&spec, |x| x[0] * (1.0 - x[0]));
        let mut v = u.clone();

        let (_, combined) = spatial.solve(0.0, &mut u).unwrap();

        let bounded = spatial.set_bcs(0.0, &mut v).unwrap();
        spatial.log_data(&bounded);
        let separate = spatial.eval_rhs(&bounded).unwrap();

        assert_eq!(combined, separate);
        assert_eq!(spatial.logger().len(), 2);
    }

    #[test]
    fn rhs_error_propagates() {
        let spec = GridSpec::uniform(&[(0.0, 1.0, 5)]).unwrap();
        let other = GridSpec::uniform(&[(0.0, 1.0, 6)]).unwrap();
        let mut spatial = heat(&spec, 1.0);
        let mut u = ScalarField::zeros(&other);
        let err = spatial.solve(0.0, &mut u).unwrap_err();
        assert!(matches!(err, ProblemError::Boundary(_) | ProblemError::Field(_)));
        assert!(spatial.logger().is_empty());
    }

    #[test]
    fn debug_names_problem() {
        let spec = GridSpec::uniform(&[(0.0, 1.0, 3)]).unwrap();
        let spatial = heat(&spec, 1.0);
        assert!(format!("{spatial:?}").contains("heat"));
    }
}
