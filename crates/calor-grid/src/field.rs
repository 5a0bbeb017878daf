//! Scalar fields over a grid.

use crate::spec::GridSpec;
use calor_core::shape::{self, Shape};
use calor_core::FieldError;
use smallvec::smallvec;

/// One `f64` value per grid point, stored flat in row-major order
/// (last axis fastest).
///
/// A field remembers only its shape, not the grid it was built on.
/// Every combining operation checks shapes and fails with
/// [`FieldError::ShapeMismatch`] rather than silently broadcasting.
///
/// # Examples
///
/// ```
/// use calor_grid::{GridSpec, ScalarField};
///
/// let spec = GridSpec::uniform(&[(0.0, 1.0, 3), (0.0, 1.0, 3)]).unwrap();
/// let u = ScalarField::from_fn(&spec, |x| x[0] + 10.0 * x[1]);
/// assert_eq!(u.get(&[2, 1]), Some(1.0 + 10.0 * 0.5));
///
/// // A buffer of the wrong size is refused.
/// assert!(ScalarField::new(&spec, vec![0.0; 8]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    shape: Shape,
    values: Vec<f64>,
}

impl ScalarField {
    /// Wrap a flat row-major buffer as a field on `spec`.
    ///
    /// Fails with [`FieldError::ShapeMismatch`] if the buffer does not
    /// hold exactly one value per grid point.
    pub fn new(spec: &GridSpec, values: Vec<f64>) -> Result<Self, FieldError> {
        if values.len() != spec.len() {
            return Err(FieldError::ShapeMismatch {
                expected: spec.shape().into(),
                actual: smallvec![values.len()],
            });
        }
        Ok(Self {
            shape: spec.shape().into(),
            values,
        })
    }

    /// Assemble a field from parts already known to agree.
    pub(crate) fn from_raw(shape: Shape, values: Vec<f64>) -> Self {
        debug_assert_eq!(shape::cell_count(&shape), values.len());
        Self { shape, values }
    }

    /// Wrap a buffer that carries its own shape, checking the shape
    /// against `spec`.
    pub fn from_shape_vec(
        spec: &GridSpec,
        shape: &[usize],
        values: Vec<f64>,
    ) -> Result<Self, FieldError> {
        if shape != spec.shape() {
            return Err(FieldError::ShapeMismatch {
                expected: spec.shape().into(),
                actual: shape.into(),
            });
        }
        let expected = shape::cell_count(shape);
        if values.len() != expected {
            return Err(FieldError::LengthMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            shape: shape.into(),
            values,
        })
    }

    /// A field of zeros on `spec`.
    pub fn zeros(spec: &GridSpec) -> Self {
        Self::filled(spec, 0.0)
    }

    /// A field with every point set to `value`.
    pub fn filled(spec: &GridSpec, value: f64) -> Self {
        Self {
            shape: spec.shape().into(),
            values: vec![value; spec.len()],
        }
    }

    /// Evaluate `f` at the physical coordinates of every grid point.
    pub fn from_fn<F>(spec: &GridSpec, mut f: F) -> Self
    where
        F: FnMut(&[f64]) -> f64,
    {
        let values = (0..spec.len())
            .map(|flat| {
                let index = shape::unravel(spec.shape(), flat);
                f(&spec.point(&index))
            })
            .collect();
        Self {
            shape: spec.shape().into(),
            values,
        }
    }

    /// Number of points per axis.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the field holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flat row-major view of the values.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Mutable flat row-major view of the values.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Consume the field, returning its flat buffer.
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// Value at a per-axis index, or `None` if out of range.
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        shape::flat_index(&self.shape, index).map(|i| self.values[i])
    }

    /// Mutable reference to the value at a per-axis index.
    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut f64> {
        shape::flat_index(&self.shape, index).map(|i| &mut self.values[i])
    }

    /// Fail with [`FieldError::ShapeMismatch`] unless this field has
    /// exactly `shape`.
    pub fn check_shape(&self, shape: &[usize]) -> Result<(), FieldError> {
        if self.shape.as_slice() != shape {
            return Err(FieldError::ShapeMismatch {
                expected: shape.into(),
                actual: self.shape.clone(),
            });
        }
        Ok(())
    }

    /// A copy of this field with every value multiplied by `a`.
    pub fn scaled(&self, a: f64) -> Self {
        Self {
            shape: self.shape.clone(),
            values: self.values.iter().map(|v| a * v).collect(),
        }
    }

    /// `self += a * x`, in place.
    pub fn axpy(&mut self, a: f64, x: &ScalarField) -> Result<(), FieldError> {
        x.check_shape(&self.shape)?;
        for (v, xv) in self.values.iter_mut().zip(&x.values) {
            *v += a * xv;
        }
        Ok(())
    }

    /// `a * x + b * y` as a new field.
    pub fn linear_combination(
        a: f64,
        x: &ScalarField,
        b: f64,
        y: &ScalarField,
    ) -> Result<Self, FieldError> {
        let mut out = x.scaled(a);
        out.axpy(b, y)?;
        Ok(out)
    }

    /// Largest absolute pointwise difference from `other`.
    pub fn max_abs_diff(&self, other: &ScalarField) -> Result<f64, FieldError> {
        other.check_shape(&self.shape)?;
        Ok(self
            .values
            .iter()
            .zip(&other.values)
            .fold(0.0f64, |m, (a, b)| m.max((a - b).abs())))
    }

    /// Flat index of the first NaN or infinite value, if any.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.values.iter().position(|v| !v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_3x3() -> GridSpec {
        GridSpec::uniform(&[(0.0, 2.0, 3), (0.0, 2.0, 3)]).unwrap()
    }

    #[test]
    fn new_rejects_wrong_length() {
        let spec = grid_3x3();
        let err = ScalarField::new(&spec, vec![0.0; 6]).unwrap_err();
        assert_eq!(
            err,
            FieldError::ShapeMismatch {
                expected: smallvec![3, 3],
                actual: smallvec![6],
            }
        );
    }

    #[test]
    fn from_shape_vec_checks_shape_then_length() {
        let spec = grid_3x3();
        assert!(matches!(
            ScalarField::from_shape_vec(&spec, &[3, 2], vec![0.0; 6]),
            Err(FieldError::ShapeMismatch { .. })
        ));
        assert_eq!(
            ScalarField::from_shape_vec(&spec, &[3, 3], vec![0.0; 8]),
            Err(FieldError::LengthMismatch {
                expected: 9,
                actual: 8
            })
        );
        assert!(ScalarField::from_shape_vec(&spec, &[3, 3], vec![0.0; 9]).is_ok());
    }

    #[test]
    fn get_and_get_mut_use_row_major_layout() {
        let spec = grid_3x3();
        let mut u = ScalarField::new(&spec, (0..9).map(f64::from).collect()).unwrap();
        assert_eq!(u.get(&[1, 2]), Some(5.0));
        *u.get_mut(&[2, 0]).unwrap() = -1.0;
        assert_eq!(u.as_slice()[6], -1.0);
        assert_eq!(u.get(&[3, 0]), None);
    }

    #[test]
    fn axpy_rejects_other_shapes() {
        let spec = grid_3x3();
        let other = GridSpec::uniform(&[(0.0, 1.0, 2), (0.0, 1.0, 2)]).unwrap();
        let mut u = ScalarField::zeros(&spec);
        assert!(u.axpy(1.0, &ScalarField::zeros(&other)).is_err());
    }

    #[test]
    fn linear_combination_is_pointwise() {
        let spec = grid_3x3();
        let x = ScalarField::filled(&spec, 2.0);
        let y = ScalarField::from_fn(&spec, |p| p[0]);
        let z = ScalarField::linear_combination(3.0, &x, -1.0, &y).unwrap();
        assert_eq!(z.get(&[0, 0]), Some(6.0));
        assert_eq!(z.get(&[2, 1]), Some(4.0));
    }

    #[test]
    fn max_abs_diff_and_non_finite() {
        let spec = grid_3x3();
        let a = ScalarField::zeros(&spec);
        let mut b = ScalarField::zeros(&spec);
        b.as_mut_slice()[4] = -0.5;
        assert_eq!(a.max_abs_diff(&b).unwrap(), 0.5);
        assert_eq!(b.first_non_finite(), None);
        b.as_mut_slice()[7] = f64::NAN;
        assert_eq!(b.first_non_finite(), Some(7));
    }
}
