//! Structured grids, scalar fields and stencil operators.
//!
//! A [`GridSpec`] describes a Cartesian mesh by its per-axis coordinate
//! arrays. A [`ScalarField`] holds one value per grid point. A
//! [`GridOperator`] binds a finite-difference [`Stencil`] to a grid and
//! maps fields to fields of the same shape.
//!
//! # Edges
//!
//! Operators never special-case the grid edge. Out-of-range stencil
//! neighbours are resolved through an [`EdgeBehavior`]; correctness at
//! the edge is the caller's responsibility, normally by overwriting the
//! edge with boundary values before the operator runs.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod edge;
pub mod error;
pub mod field;
pub mod operator;
pub mod spec;
pub mod stencil;

pub use edge::EdgeBehavior;
pub use error::GridError;
pub use field::ScalarField;
pub use operator::{GridOperator, OperatorSet};
pub use spec::GridSpec;
pub use stencil::Stencil;
