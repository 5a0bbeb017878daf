//! Error types shared across the Calor workspace.
//!
//! Every error here describes a static configuration problem: a field
//! built for the wrong grid, a boundary array of the wrong length, a
//! problem composed without the operator it needs. None of them is
//! retried; they propagate straight out of the solve.

use crate::id::{OperatorKind, Side};
use crate::shape::Shape;
use std::error::Error;
use std::fmt;

/// Errors from constructing or combining scalar fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// A field's shape does not match the grid (or other field) it is
    /// used with.
    ShapeMismatch {
        /// The shape that was required.
        expected: Shape,
        /// The shape that was supplied.
        actual: Shape,
    },
    /// A flat value buffer has the wrong number of elements.
    LengthMismatch {
        /// Number of cells the shape requires.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { expected, actual } => write!(
                f,
                "shape mismatch: expected {:?}, got {:?}",
                expected.as_slice(),
                actual.as_slice()
            ),
            Self::LengthMismatch { expected, actual } => {
                write!(f, "expected {expected} values, got {actual}")
            }
        }
    }
}

impl Error for FieldError {}

/// Errors from building or applying boundary conditions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoundaryError {
    /// A condition names an axis the grid does not have.
    AxisOutOfRange {
        /// The offending axis.
        axis: usize,
        /// Number of axes on the grid.
        ndim: usize,
    },
    /// A boundary value array does not match the size of the edge
    /// slice it overwrites (and is not a single broadcast value).
    BoundaryLengthMismatch {
        /// Axis of the condition.
        axis: usize,
        /// Side of the condition.
        side: Side,
        /// Number of cells in the edge slice.
        expected: usize,
        /// Length of the supplied value array.
        found: usize,
    },
    /// The field passed to the handler is not on the handler's grid.
    Field(FieldError),
}

impl fmt::Display for BoundaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AxisOutOfRange { axis, ndim } => {
                write!(f, "boundary axis {axis} out of range for {ndim}-D grid")
            }
            Self::BoundaryLengthMismatch {
                axis,
                side,
                expected,
                found,
            } => write!(
                f,
                "boundary ({axis}, {side}) has {found} values, edge slice has {expected} cells"
            ),
            Self::Field(e) => write!(f, "boundary: {e}"),
        }
    }
}

impl Error for BoundaryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FieldError> for BoundaryError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}

/// Errors from composing a problem or evaluating its right-hand side.
#[derive(Clone, Debug, PartialEq)]
pub enum ProblemError {
    /// The problem requires an operator that was not bound.
    MissingOperator {
        /// The operator that was required.
        kind: OperatorKind,
    },
    /// A physical parameter is out of its valid range.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Boundary application failed.
    Boundary(BoundaryError),
    /// An operator was applied to a field on the wrong grid.
    Field(FieldError),
}

impl fmt::Display for ProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingOperator { kind } => write!(f, "missing operator '{kind}'"),
            Self::InvalidParameter { name, value } => {
                write!(f, "invalid parameter {name} = {value}")
            }
            Self::Boundary(e) => write!(f, "{e}"),
            Self::Field(e) => write!(f, "{e}"),
        }
    }
}

impl Error for ProblemError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Boundary(e) => Some(e),
            Self::Field(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BoundaryError> for ProblemError {
    fn from(e: BoundaryError) -> Self {
        Self::Boundary(e)
    }
}

impl From<FieldError> for ProblemError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}
