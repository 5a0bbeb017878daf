//! Boundary conditions and PDE right-hand sides.
//!
//! A [`Problem`] is the spatial half of a semi-discretised PDE
//! `du/dt = f(u)`: it knows how to write boundary values into a field
//! and how to evaluate `f` on the result.
//!
//! Evaluation order is enforced by type. [`BoundaryHandler::apply`] is
//! the only way to obtain a [`Bounded`] view of a field, and
//! [`Problem::rhs`] accepts nothing else, so a right-hand side can never
//! be computed from a field whose edges are stale.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod heat;
pub mod problem;

pub use boundary::{BoundaryCondition, BoundaryHandler, BoundaryKind, Bounded};
pub use heat::HeatEquation;
pub use problem::Problem;
