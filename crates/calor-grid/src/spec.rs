//! Cartesian grid descriptions.

use crate::error::GridError;
use calor_core::shape::{self, Shape};
use smallvec::SmallVec;

/// Relative tolerance on the deviation of any interval from the first
/// spacing on its axis.
const UNIFORM_RTOL: f64 = 1e-9;

/// An immutable structured coordinate mesh.
///
/// Built from one coordinate array per axis. The shape is the number of
/// points per axis and the spacing is the constant difference between
/// consecutive coordinates. Finite-difference stencils assume that
/// spacing is uniform, so construction rejects axes that are not.
///
/// # Examples
///
/// ```
/// use calor_grid::GridSpec;
///
/// let spec = GridSpec::new(vec![vec![0.0, 0.5, 1.0], vec![0.0, 0.25, 0.5, 0.75]]).unwrap();
/// assert_eq!(spec.shape(), &[3, 4]);
/// assert_eq!(spec.spacing(), &[0.5, 0.25]);
/// assert_eq!(spec.len(), 12);
///
/// // Unevenly spaced coordinates are refused.
/// assert!(GridSpec::new(vec![vec![0.0, 1.0, 3.0]]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GridSpec {
    coords: Vec<Vec<f64>>,
    shape: Shape,
    spacing: SmallVec<[f64; 4]>,
}

impl GridSpec {
    /// Build a grid from per-axis coordinate arrays.
    ///
    /// # Errors
    ///
    /// - [`GridError::NoAxes`] if `coords` is empty.
    /// - [`GridError::TooFewPoints`] if any axis has fewer than 2 points.
    /// - [`GridError::DegenerateSpacing`] if an axis' first spacing is zero
    ///   or not finite.
    /// - [`GridError::NonUniformSpacing`] if any later interval differs
    ///   from the first.
    pub fn new(coords: Vec<Vec<f64>>) -> Result<Self, GridError> {
        if coords.is_empty() {
            return Err(GridError::NoAxes);
        }
        let mut shape = Shape::new();
        let mut spacing = SmallVec::new();
        for (axis, c) in coords.iter().enumerate() {
            if c.len() < 2 {
                return Err(GridError::TooFewPoints {
                    axis,
                    len: c.len(),
                });
            }
            let h = c[1] - c[0];
            if !h.is_finite() || h == 0.0 {
                return Err(GridError::DegenerateSpacing { axis, spacing: h });
            }
            let scale = c.iter().fold(0.0f64, |m, x| m.max(x.abs()));
            let tol = UNIFORM_RTOL * h.abs() + 16.0 * f64::EPSILON * scale;
            for (index, pair) in c.windows(2).enumerate().skip(1) {
                let d = pair[1] - pair[0];
                // Negated comparison so NaN coordinates are rejected too.
                if !((d - h).abs() <= tol) {
                    return Err(GridError::NonUniformSpacing {
                        axis,
                        index,
                        expected: h,
                        found: d,
                    });
                }
            }
            shape.push(c.len());
            spacing.push(h);
        }
        Ok(Self {
            coords,
            shape,
            spacing,
        })
    }

    /// Build a grid of evenly spaced points, one `(start, stop, n)`
    /// triple per axis. Both endpoints are included.
    pub fn uniform(axes: &[(f64, f64, usize)]) -> Result<Self, GridError> {
        let coords = axes
            .iter()
            .map(|&(start, stop, n)| linspace(start, stop, n))
            .collect();
        Self::new(coords)
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Number of points per axis.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Coordinate spacing per axis (may be negative for descending axes).
    pub fn spacing(&self) -> &[f64] {
        &self.spacing
    }

    /// Coordinates along `axis`, or `None` if the axis does not exist.
    pub fn coords(&self, axis: usize) -> Option<&[f64]> {
        self.coords.get(axis).map(Vec::as_slice)
    }

    /// Total number of grid points.
    pub fn len(&self) -> usize {
        shape::cell_count(&self.shape)
    }

    /// Always `false`: every axis has at least two points.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Smallest absolute spacing over all axes.
    pub fn min_spacing(&self) -> f64 {
        self.spacing
            .iter()
            .fold(f64::INFINITY, |m, h| m.min(h.abs()))
    }

    /// Physical coordinates of the point at `index`.
    ///
    /// `index` must be in range for [`shape`](Self::shape).
    pub fn point(&self, index: &[usize]) -> SmallVec<[f64; 4]> {
        index
            .iter()
            .zip(&self.coords)
            .map(|(&i, c)| c[i])
            .collect()
    }
}

/// `n` evenly spaced values from `start` to `stop` inclusive.
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}
