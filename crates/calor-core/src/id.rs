//! Small identifier types: boundary sides and operator kinds.

use std::fmt;

/// Which end of an axis a boundary slice sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// Index 0 along the axis.
    Low,
    /// Index `len - 1` along the axis.
    High,
}

impl Side {
    /// Both sides, low first.
    pub const BOTH: [Side; 2] = [Side::Low, Side::High];

    /// The position along an axis of length `len` that this side refers to.
    pub fn position(self, len: usize) -> usize {
        match self {
            Self::Low => 0,
            Self::High => len.saturating_sub(1),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::High => write!(f, "high"),
        }
    }
}

/// The closed set of differential operators a problem can bind.
///
/// Operators are selected by kind when a problem is composed, so a
/// missing operator is reported before the time loop starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum OperatorKind {
    /// Sum of second derivatives over every axis.
    Laplacian,
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Laplacian => write!(f, "laplacian"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_position() {
        assert_eq!(Side::Low.position(5), 0);
        assert_eq!(Side::High.position(5), 4);
        assert_eq!(Side::High.position(1), 0);
    }

    #[test]
    fn display_names() {
        assert_eq!(Side::Low.to_string(), "low");
        assert_eq!(Side::High.to_string(), "high");
        assert_eq!(OperatorKind::Laplacian.to_string(), "laplacian");
    }
}
