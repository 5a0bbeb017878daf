//! Error types for grid construction.

use calor_core::FieldError;
use std::fmt;

/// Errors arising from [`GridSpec`](crate::GridSpec) construction.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// No coordinate axes were supplied.
    NoAxes,
    /// An axis has fewer than two points, so it has no spacing.
    TooFewPoints {
        /// The offending axis.
        axis: usize,
        /// Number of points supplied.
        len: usize,
    },
    /// The first spacing on an axis is zero or not finite.
    DegenerateSpacing {
        /// The offending axis.
        axis: usize,
        /// The spacing that was computed.
        spacing: f64,
    },
    /// Consecutive coordinates on an axis are not evenly spaced.
    NonUniformSpacing {
        /// The offending axis.
        axis: usize,
        /// Index `i` of the first interval `coords[i + 1] - coords[i]`
        /// that differs from the first spacing.
        index: usize,
        /// The first spacing on the axis.
        expected: f64,
        /// The spacing found at `index`.
        found: f64,
    },
    /// A field could not be built on the grid.
    Field(FieldError),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAxes => write!(f, "grid must have at least one axis"),
            Self::TooFewPoints { axis, len } => {
                write!(f, "axis {axis} has {len} points, need at least 2")
            }
            Self::DegenerateSpacing { axis, spacing } => {
                write!(f, "axis {axis} has degenerate spacing {spacing}")
            }
            Self::NonUniformSpacing {
                axis,
                index,
                expected,
                found,
            } => write!(
                f,
                "axis {axis} is not uniformly spaced: interval {index} is {found}, expected {expected}"
            ),
            Self::Field(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Field(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FieldError> for GridError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}
