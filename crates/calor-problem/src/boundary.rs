//! Dirichlet boundary conditions and the handler that applies them.

use calor_core::shape::{self, Shape};
use calor_core::{BoundaryError, Side};
use calor_grid::{GridSpec, ScalarField};
use std::ops::Deref;

/// What a boundary condition prescribes on its edge slice.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum BoundaryKind {
    /// Fix the field's value. The array holds one value per cell of the
    /// edge slice in row-major order over the remaining axes, or a single
    /// value broadcast to the whole slice.
    ///
    /// Values are static: the time passed to the handler is not used.
    Dirichlet(Vec<f64>),
}

/// One boundary condition on the edge slice `(axis, side)`.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryCondition {
    /// Axis whose end the condition sits on.
    pub axis: usize,
    /// Which end of the axis.
    pub side: Side,
    /// The prescribed condition.
    pub kind: BoundaryKind,
}

impl BoundaryCondition {
    /// A Dirichlet condition fixing `(axis, side)` to `values`.
    pub fn dirichlet(axis: usize, side: Side, values: Vec<f64>) -> Self {
        Self {
            axis,
            side,
            kind: BoundaryKind::Dirichlet(values),
        }
    }
}

/// An ordered list of boundary conditions bound to one grid.
///
/// Conditions are applied in list order. Where two edge slices meet
/// (the corner cells of a 2D grid, for instance), the condition later
/// in the list wins.
///
/// # Examples
///
/// ```
/// use calor_core::Side;
/// use calor_grid::{GridSpec, ScalarField};
/// use calor_problem::{BoundaryCondition, BoundaryHandler};
///
/// let spec = GridSpec::uniform(&[(0.0, 1.0, 3), (0.0, 1.0, 3)]).unwrap();
/// let handler = BoundaryHandler::new(&spec, vec![
///     BoundaryCondition::dirichlet(0, Side::Low, vec![5.0, 5.0, 5.0]),
///     BoundaryCondition::dirichlet(1, Side::Low, vec![9.0, 9.0, 9.0]),
/// ]).unwrap();
///
/// let mut u = ScalarField::zeros(&spec);
/// let bounded = handler.apply(0.0, &mut u).unwrap();
/// assert_eq!(bounded.get(&[0, 0]), Some(9.0)); // later condition wins
/// assert_eq!(bounded.get(&[0, 2]), Some(5.0));
/// ```
#[derive(Clone, Debug)]
pub struct BoundaryHandler {
    shape: Shape,
    conditions: Vec<BoundaryCondition>,
    /// Flat indices of each condition's edge slice, parallel to
    /// `conditions`.
    targets: Vec<Vec<usize>>,
}

impl BoundaryHandler {
    /// Bind `conditions` to `spec`, checking each one against the grid.
    ///
    /// # Errors
    ///
    /// - [`BoundaryError::AxisOutOfRange`] if a condition names an axis
    ///   the grid does not have.
    /// - [`BoundaryError::BoundaryLengthMismatch`] if a value array has
    ///   neither one element nor one per edge-slice cell.
    pub fn new(spec: &GridSpec, conditions: Vec<BoundaryCondition>) -> Result<Self, BoundaryError> {
        let shape: Shape = spec.shape().into();
        let mut targets = Vec::with_capacity(conditions.len());
        for bc in &conditions {
            if bc.axis >= shape.len() {
                return Err(BoundaryError::AxisOutOfRange {
                    axis: bc.axis,
                    ndim: shape.len(),
                });
            }
            let expected = shape::edge_len(&shape, bc.axis);
            match &bc.kind {
                BoundaryKind::Dirichlet(values) => {
                    if values.len() != expected && values.len() != 1 {
                        return Err(BoundaryError::BoundaryLengthMismatch {
                            axis: bc.axis,
                            side: bc.side,
                            expected,
                            found: values.len(),
                        });
                    }
                }
            }
            targets.push(shape::edge_indices(&shape, bc.axis, bc.side));
        }
        Ok(Self {
            shape,
            conditions,
            targets,
        })
    }

    /// Fix every edge of `spec` to zero, axis by axis, low side first.
    pub fn dirichlet_zero(spec: &GridSpec) -> Self {
        let conditions = (0..spec.ndim())
            .flat_map(|axis| {
                Side::BOTH
                    .into_iter()
                    .map(move |side| BoundaryCondition::dirichlet(axis, side, vec![0.0]))
            })
            .collect::<Vec<_>>();
        let shape: Shape = spec.shape().into();
        let targets = conditions
            .iter()
            .map(|bc| shape::edge_indices(&shape, bc.axis, bc.side))
            .collect();
        Self {
            shape,
            conditions,
            targets,
        }
    }

    /// The conditions in application order.
    pub fn conditions(&self) -> &[BoundaryCondition] {
        &self.conditions
    }

    /// Number of conditions.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Returns `true` if the handler has no conditions.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Shape of the grid the handler is bound to.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Overwrite the boundary values of `field` for time `t`, in place.
    ///
    /// Returns a [`Bounded`] view of the updated field. Applying the same
    /// handler twice leaves the field as applying it once does.
    ///
    /// Fails with [`BoundaryError::Field`] if `field` is not on the
    /// handler's grid.
    pub fn apply<'a>(
        &self,
        t: f64,
        field: &'a mut ScalarField,
    ) -> Result<Bounded<'a>, BoundaryError> {
        field.check_shape(&self.shape)?;
        let values = field.as_mut_slice();
        for (bc, cells) in self.conditions.iter().zip(&self.targets) {
            match &bc.kind {
                BoundaryKind::Dirichlet(prescribed) => {
                    if let [v] = prescribed.as_slice() {
                        for &i in cells {
                            values[i] = *v;
                        }
                    } else {
                        for (&i, &v) in cells.iter().zip(prescribed) {
                            values[i] = v;
                        }
                    }
                }
            }
        }
        log::trace!("applied {} boundary conditions at t={t}", self.conditions.len());
        Ok(Bounded { field, time: t })
    }
}

/// A field whose boundary values have been written for a given time.
///
/// Only [`BoundaryHandler::apply`] creates one, so holding a `Bounded`
/// proves the edges are current. It borrows the field immutably; the
/// field cannot change while the proof is alive.
#[derive(Debug)]
pub struct Bounded<'a> {
    field: &'a ScalarField,
    time: f64,
}

impl<'a> Bounded<'a> {
    /// The time the boundary values were applied for.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// The underlying field.
    pub fn field(&self) -> &'a ScalarField {
        self.field
    }

    /// An owned copy of the field, detached from later mutation.
    pub fn snapshot(&self) -> ScalarField {
        self.field.clone()
    }
}

impl Deref for Bounded<'_> {
    type Target = ScalarField;

    fn deref(&self) -> &ScalarField {
        self.field
    }
}
