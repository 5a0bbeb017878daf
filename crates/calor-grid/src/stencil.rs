//! Central finite-difference stencils for second derivatives.

/// A symmetric stencil approximating `d²u/dx²` on a uniform axis.
///
/// Weights are listed for offsets `-radius..=radius` and divided by
/// `denominator * h²` when bound to an axis with spacing `h`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Stencil {
    /// Second-order accurate, three points: `[1, -2, 1] / h²`.
    #[default]
    Central2,
    /// Fourth-order accurate in the interior, five points:
    /// `[-1, 16, -30, 16, -1] / (12 h²)`. Operators fall back to
    /// [`Central2`](Self::Central2) on the two rows nearest a
    /// non-periodic edge.
    Central4,
}

impl Stencil {
    /// Integer weights for offsets `-radius..=radius`.
    pub fn weights(self) -> &'static [f64] {
        match self {
            Self::Central2 => &[1.0, -2.0, 1.0],
            Self::Central4 => &[-1.0, 16.0, -30.0, 16.0, -1.0],
        }
    }

    /// Common divisor of [`weights`](Self::weights), before `h²`.
    pub fn denominator(self) -> f64 {
        match self {
            Self::Central2 => 1.0,
            Self::Central4 => 12.0,
        }
    }

    /// Number of neighbours read on each side of a point.
    pub fn radius(self) -> usize {
        self.weights().len() / 2
    }

    /// Formal order of accuracy in `h`.
    pub fn order(self) -> u32 {
        match self {
            Self::Central2 => 2,
            Self::Central4 => 4,
        }
    }

    /// Coefficients for an axis with spacing `h`: weights divided by
    /// `denominator * h²`.
    pub fn coefficients(self, h: f64) -> Vec<f64> {
        let scale = 1.0 / (self.denominator() * h * h);
        self.weights().iter().map(|w| w * scale).collect()
    }

    /// Spectral radius of the stencil on a unit-spacing axis.
    ///
    /// Both stencils alternate in sign, so the largest eigenvalue
    /// magnitude (at the Nyquist mode) is the sum of absolute weights.
    pub fn unit_spectral_radius(self) -> f64 {
        self.weights().iter().map(|w| w.abs()).sum::<f64>() / self.denominator()
    }
}
