//! Time-stepping schemes.
//!
//! A [`TimeStepper`] advances the solution by one step given the
//! right-hand side evaluated at the start of that step. It takes the
//! field by value and hands it back, so the driver is always the single
//! owner of the live state.

use calor_core::FieldError;
use calor_grid::ScalarField;

/// An explicit one-step time integration scheme.
pub trait TimeStepper: Send + 'static {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Order of accuracy in `dt`.
    fn order(&self) -> u32;

    /// Advance `field` by `dt` using `rhs = du/dt` at the current time.
    ///
    /// Returns [`FieldError::ShapeMismatch`] if `rhs` does not match
    /// `field`; the output always has the input's shape.
    fn step(&self, dt: f64, field: ScalarField, rhs: &ScalarField)
        -> Result<ScalarField, FieldError>;
}

/// First-order explicit Euler: `u_new = u + dt * rhs`.
///
/// # Examples
///
/// ```
/// use calor_engine::{ForwardEuler, TimeStepper};
/// use calor_grid::{GridSpec, ScalarField};
///
/// let spec = GridSpec::uniform(&[(0.0, 1.0, 3)]).unwrap();
/// let u = ScalarField::filled(&spec, 1.0);
/// let rhs = ScalarField::filled(&spec, -2.0);
/// let next = ForwardEuler.step(0.25, u, &rhs).unwrap();
/// assert_eq!(next.as_slice(), &[0.5; 3]);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardEuler;

impl TimeStepper for ForwardEuler {
    fn name(&self) -> &str {
        "forward_euler"
    }

    fn order(&self) -> u32 {
        1
    }

    fn step(
        &self,
        dt: f64,
        mut field: ScalarField,
        rhs: &ScalarField,
    ) -> Result<ScalarField, FieldError> {
        field.axpy(dt, rhs)?;
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calor_grid::GridSpec;
    use proptest::prelude::*;

    #[test]
    fn zero_rhs_is_identity() {
        let spec = GridSpec::uniform(&[(0.0, 1.0, 4), (0.0, 1.0, 3)]).unwrap();
        let u = ScalarField::from_fn(&spec, |p| p[0] + 2.0 * p[1]);
        let expected = u.clone();
        let next = ForwardEuler.step(0.1, u, &ScalarField::zeros(&spec)).unwrap();
        assert_eq!(next, expected);
    }

    #[test]
    fn mismatched_rhs_is_rejected() {
        let a = GridSpec::uniform(&[(0.0, 1.0, 4)]).unwrap();
        let b = GridSpec::uniform(&[(0.0, 1.0, 5)]).unwrap();
        let err = ForwardEuler
            .step(0.1, ScalarField::zeros(&a), &ScalarField::zeros(&b))
            .unwrap_err();
        assert!(matches!(err, FieldError::ShapeMismatch { .. }));
    }

    #[test]
    fn metadata() {
        assert_eq!(ForwardEuler.name(), "forward_euler");
        assert_eq!(ForwardEuler.order(), 1);
    }

    proptest! {
        #[test]
        fn step_preserves_shape_and_matches_formula(
            nx in 2usize..8,
            ny in 2usize..8,
            dt in 0.0f64..1.0,
            u0 in -10.0f64..10.0,
            r in -10.0f64..10.0,
        ) {
            let spec = GridSpec::uniform(&[(0.0, 1.0, nx), (0.0, 1.0, ny)]).unwrap();
            let u = ScalarField::filled(&spec, u0);
            let rhs = ScalarField::filled(&spec, r);
            let next = ForwardEuler.step(dt, u, &rhs).unwrap();
            prop_assert_eq!(next.shape(), spec.shape());
            for &v in next.as_slice() {
                prop_assert_eq!(v, u0 + dt * r);
            }
        }
    }
}
