//! The heat (diffusion) equation `du/dt = α ∇²u`.

use crate::boundary::{BoundaryHandler, Bounded};
use crate::problem::Problem;
use calor_core::{OperatorKind, ProblemError};
use calor_grid::{OperatorSet, ScalarField};

/// Heat conduction with constant diffusivity `alpha`.
///
/// The right-hand side is `alpha * L(u)` where `L` is the bound
/// [`OperatorKind::Laplacian`] operator. Composition fails immediately
/// if the Laplacian is missing or bound to a different grid than the
/// boundary handler, so the time loop never meets either error.
///
/// # Examples
///
/// ```
/// use calor_grid::{GridOperator, GridSpec, OperatorSet, ScalarField, Stencil};
/// use calor_problem::{BoundaryHandler, HeatEquation, Problem};
///
/// let spec = GridSpec::uniform(&[(0.0, 1.0, 5), (0.0, 1.0, 5)]).unwrap();
/// let ops: OperatorSet = [GridOperator::laplacian(&spec, Stencil::Central2)]
///     .into_iter()
///     .collect();
/// let heat = HeatEquation::new(BoundaryHandler::dirichlet_zero(&spec), 0.05, ops).unwrap();
///
/// let mut u = ScalarField::filled(&spec, 1.0);
/// let bounded = heat.set_bcs(0.0, &mut u).unwrap();
/// let rhs = heat.rhs(&bounded).unwrap();
/// // The centre cell sees four hot neighbours: no flux.
/// assert_eq!(rhs.get(&[2, 2]), Some(0.0));
/// // Next to the cold edge, heat flows out.
/// assert!(rhs.get(&[1, 2]).unwrap() < 0.0);
/// ```
#[derive(Debug)]
pub struct HeatEquation {
    boundaries: BoundaryHandler,
    alpha: f64,
    ops: OperatorSet,
}

impl HeatEquation {
    /// Compose a heat equation from its boundary handler, diffusivity
    /// and operator set.
    ///
    /// # Errors
    ///
    /// - [`ProblemError::MissingOperator`] if `ops` has no Laplacian.
    /// - [`ProblemError::InvalidParameter`] if `alpha` is negative or
    ///   not finite.
    /// - [`ProblemError::Field`] if the Laplacian and the boundary
    ///   handler are bound to grids of different shapes.
    pub fn new(
        boundaries: BoundaryHandler,
        alpha: f64,
        ops: OperatorSet,
    ) -> Result<Self, ProblemError> {
        let laplacian = ops.require(OperatorKind::Laplacian)?;
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(ProblemError::InvalidParameter {
                name: "alpha",
                value: alpha,
            });
        }
        if laplacian.shape() != boundaries.shape() {
            return Err(ProblemError::Field(calor_core::FieldError::ShapeMismatch {
                expected: boundaries.shape().into(),
                actual: laplacian.shape().into(),
            }));
        }
        log::debug!(
            "composed heat equation: alpha={alpha}, {:?} Laplacian, {} boundary conditions",
            laplacian.stencil(),
            boundaries.len()
        );
        Ok(Self {
            boundaries,
            alpha,
            ops,
        })
    }

    /// Return a copy with a different diffusivity.
    pub fn with_alpha(self, alpha: f64) -> Result<Self, ProblemError> {
        Self::new(self.boundaries, alpha, self.ops)
    }

    /// The diffusivity.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// The boundary handler.
    pub fn boundaries(&self) -> &BoundaryHandler {
        &self.boundaries
    }

    /// The bound operators.
    pub fn operators(&self) -> &OperatorSet {
        &self.ops
    }
}

impl Problem for HeatEquation {
    fn name(&self) -> &str {
        "heat"
    }

    fn set_bcs<'a>(
        &self,
        t: f64,
        field: &'a mut ScalarField,
    ) -> Result<Bounded<'a>, ProblemError> {
        Ok(self.boundaries.apply(t, field)?)
    }

    fn rhs(&self, field: &Bounded<'_>) -> Result<ScalarField, ProblemError> {
        let laplacian = self.ops.require(OperatorKind::Laplacian)?;
        let mut out = laplacian.apply(field)?;
        for v in out.as_mut_slice() {
            *v *= self.alpha;
        }
        Ok(out)
    }

    /// `2 / (alpha * ρ(L))`, the forward-Euler stability limit for the
    /// bound Laplacian. `None` when `alpha` is zero.
    fn max_stable_dt(&self) -> Option<f64> {
        if self.alpha == 0.0 {
            return None;
        }
        let laplacian = self.ops.get(OperatorKind::Laplacian)?;
        Some(2.0 / (self.alpha * laplacian.spectral_radius()))
    }
}
