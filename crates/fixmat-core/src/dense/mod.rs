//! Dense fixed-shape matrices and their operations
//!
//! The [`Mat`] type is defined in [`types`]; every other sub-module adds a
//! group of inherent methods.

// Core type definition
pub mod types;

// Operation modules (organized by functionality)
pub(crate) mod arith;
pub(crate) mod creation;
mod display;
mod extract;
mod inverse;
mod io;
mod multiply;
mod transpose;

pub use creation::InitMode;
pub use inverse::DEFAULT_NSA_ITERATIONS;
pub use types::{Mat, MatRead, RowVector, Vector};

pub(crate) use display::fmt_logical;
