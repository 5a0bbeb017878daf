//! Stencil operators bound to a grid, and the per-problem operator set.

use crate::edge::EdgeBehavior;
use crate::field::ScalarField;
use crate::spec::GridSpec;
use crate::stencil::Stencil;
use calor_core::shape::{self, Index, Shape};
use calor_core::{FieldError, OperatorKind, ProblemError};
use indexmap::IndexMap;
use smallvec::{smallvec, SmallVec};

/// A discrete linear differential operator bound to one grid.
///
/// Coefficients are precomputed from the grid spacing at construction,
/// so [`apply`](Self::apply) is a pure function of its input field.
///
/// Neighbours past the edge are read through the operator's
/// [`EdgeBehavior`]; the result at and next to the edge is only
/// meaningful once boundary values have been written into the input.
///
/// Unless the edge behaviour is [`EdgeBehavior::Wrap`], a point whose
/// full stencil would reach past the edge along an axis uses the
/// three-point [`Stencil::Central2`] weights on that axis instead.
///
/// # Examples
///
/// ```
/// use calor_grid::{GridOperator, GridSpec, ScalarField, Stencil};
///
/// let spec = GridSpec::uniform(&[(0.0, 1.0, 11), (0.0, 1.0, 11)]).unwrap();
/// let lap = GridOperator::laplacian(&spec, Stencil::Central2);
///
/// // ∇²(x² + y²) = 4 at every interior point.
/// let u = ScalarField::from_fn(&spec, |p| p[0] * p[0] + p[1] * p[1]);
/// let lu = lap.apply(&u).unwrap();
/// assert_eq!(lu.shape(), u.shape());
/// assert!((lu.get(&[5, 5]).unwrap() - 4.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct GridOperator {
    kind: OperatorKind,
    stencil: Stencil,
    edge: EdgeBehavior,
    shape: Shape,
    spacing: SmallVec<[f64; 4]>,
    /// `coefficients[axis]` holds the stencil weights scaled for that
    /// axis' spacing, for offsets `-radius..=radius`.
    coefficients: Vec<Vec<f64>>,
    /// `Central2` weights per axis, used where `coefficients` would
    /// read past a non-periodic edge.
    near_edge: Vec<Vec<f64>>,
}

impl GridOperator {
    /// The Laplacian `Σ ∂²/∂x_i²` on `spec`, using `stencil` on every
    /// axis and clamped halo reads.
    pub fn laplacian(spec: &GridSpec, stencil: Stencil) -> Self {
        let coefficients = spec
            .spacing()
            .iter()
            .map(|&h| stencil.coefficients(h))
            .collect();
        let near_edge = spec
            .spacing()
            .iter()
            .map(|&h| Stencil::Central2.coefficients(h))
            .collect();
        Self {
            kind: OperatorKind::Laplacian,
            stencil,
            edge: EdgeBehavior::default(),
            shape: spec.shape().into(),
            spacing: spec.spacing().into(),
            coefficients,
            near_edge,
        }
    }

    /// Replace the halo policy used for out-of-range neighbours.
    pub fn with_edge_behavior(mut self, edge: EdgeBehavior) -> Self {
        self.edge = edge;
        self
    }

    /// Which operator this is.
    pub fn kind(&self) -> OperatorKind {
        self.kind
    }

    /// The finite-difference scheme in use.
    pub fn stencil(&self) -> Stencil {
        self.stencil
    }

    /// The halo policy in use.
    pub fn edge_behavior(&self) -> EdgeBehavior {
        self.edge
    }

    /// Shape of the grid this operator is bound to.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Spacing of the grid this operator is bound to.
    pub fn spacing(&self) -> &[f64] {
        &self.spacing
    }

    /// Upper bound on the magnitude of the operator's eigenvalues,
    /// `Σ_i ρ / h_i²` with `ρ` the stencil's unit spectral radius.
    pub fn spectral_radius(&self) -> f64 {
        let rho = self.stencil.unit_spectral_radius();
        self.spacing.iter().map(|h| rho / (h * h)).sum()
    }

    /// Apply the operator, returning a new field of the same shape.
    ///
    /// Fails with [`FieldError::ShapeMismatch`] if `field` is not on
    /// the bound grid's shape.
    pub fn apply(&self, field: &ScalarField) -> Result<ScalarField, FieldError> {
        field.check_shape(&self.shape)?;
        let u = field.as_slice();
        let strides = shape::strides(&self.shape);
        let radius = self.stencil.radius();
        let narrow = Stencil::Central2.radius();
        let periodic = self.edge == EdgeBehavior::Wrap;

        let mut out = vec![0.0; u.len()];
        let mut index: Index = smallvec![0; self.shape.len()];
        for (flat, slot) in out.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (axis, coeffs) in self.coefficients.iter().enumerate() {
                let len = self.shape[axis];
                let stride = strides[axis];
                let i = index[axis];
                // Flat offset of this point's line along `axis`, position 0.
                let line = flat - i * stride;
                let (coeffs, r) = if !periodic && (i < radius || i + radius >= len) {
                    (&self.near_edge[axis], narrow as isize)
                } else {
                    (coeffs, radius as isize)
                };
                for (c, k) in coeffs.iter().zip(-r..=r) {
                    if let Some(p) = self.edge.resolve(i as isize + k, len) {
                        acc += c * u[line + p * stride];
                    }
                }
            }
            *slot = acc;
            shape::advance(&mut index, &self.shape);
        }
        Ok(ScalarField::from_raw(self.shape.clone(), out))
    }
}

/// The operators bound to a problem, keyed by kind.
///
/// Insertion order is preserved so iteration is deterministic. Each
/// kind appears at most once; inserting a second operator of the same
/// kind replaces the first.
#[derive(Clone, Debug, Default)]
pub struct OperatorSet {
    ops: IndexMap<OperatorKind, GridOperator>,
}

impl OperatorSet {
    /// An empty operator set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `op` under its own kind, returning any operator it replaced.
    pub fn insert(&mut self, op: GridOperator) -> Option<GridOperator> {
        self.ops.insert(op.kind(), op)
    }

    /// The operator of `kind`, if bound.
    pub fn get(&self, kind: OperatorKind) -> Option<&GridOperator> {
        self.ops.get(&kind)
    }

    /// The operator of `kind`, or [`ProblemError::MissingOperator`].
    pub fn require(&self, kind: OperatorKind) -> Result<&GridOperator, ProblemError> {
        self.get(kind)
            .ok_or(ProblemError::MissingOperator { kind })
    }

    /// Whether an operator of `kind` is bound.
    pub fn contains(&self, kind: OperatorKind) -> bool {
        self.ops.contains_key(&kind)
    }

    /// Number of bound operators.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if no operators are bound.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over bound operators in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &GridOperator> {
        self.ops.values()
    }
}

impl FromIterator<GridOperator> for OperatorSet {
    fn from_iter<I: IntoIterator<Item = GridOperator>>(iter: I) -> Self {
        let mut set = Self::new();
        for op in iter {
            set.insert(op);
        }
        set
    }
}
