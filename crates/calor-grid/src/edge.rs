//! How stencils read past the edge of the grid.

/// Where an operator reads a stencil neighbour that falls outside the
/// grid.
///
/// This controls the halo only. Physical boundary conditions are
/// applied separately by overwriting edge cells before the operator
/// runs; with the edge already fixed, the halo choice affects only the
/// edge cells' own (discarded) derivative values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeBehavior {
    /// Out-of-range neighbour reads the nearest edge value.
    #[default]
    Clamp,
    /// Out-of-range neighbour wraps to the opposite side (periodic).
    Wrap,
    /// Out-of-range neighbour reads zero.
    Absorb,
}

impl EdgeBehavior {
    /// Resolve position `pos` on an axis of length `len`.
    ///
    /// Returns `Some(index)` for in-range positions, or for out-of-range
    /// ones under `Clamp`/`Wrap`, and `None` under `Absorb`.
    pub fn resolve(self, pos: isize, len: usize) -> Option<usize> {
        let n = len as isize;
        if pos >= 0 && pos < n {
            return Some(pos as usize);
        }
        match self {
            Self::Absorb => None,
            Self::Clamp => Some(pos.clamp(0, n - 1) as usize),
            Self::Wrap => Some(pos.rem_euclid(n) as usize),
        }
    }
}
