//! Core types for the Calor PDE framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every layer of the workspace: grid shapes and
//! row-major index arithmetic, boundary sides, operator kinds, and the
//! error types raised while composing a problem.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod shape;

pub use error::{BoundaryError, FieldError, ProblemError};
pub use id::{OperatorKind, Side};
pub use shape::{Index, Shape};
