//! # fixmat-core
//!
//! Fixed-shape structured matrices for hardware-style numeric kernels.
//!
//! This crate provides the building blocks of the fixmat stack:
//!
//! - **Structured matrices** ([`Mat`]) whose shape and structural type are
//!   type parameters, stored inline in compact form
//! - **Type algebra** ([`MatType`], [`kind`], [`SumWith`], [`MulWith`]) so that
//!   the structural type of `a + b` or `a * b` is known at compile time
//! - **Views** ([`view`]) that negate, transpose or restrict a matrix without
//!   copying
//! - **Fixed-point elements** ([`Fixed`], [`FxP`]) next to the native integer,
//!   float and boolean types
//! - **Newton-Schulz inversion** ([`Mat::inv_nsa`]) for diagonally dominant
//!   systems
//!
//! ## Core Principles
//!
//! ### SciRS2 Integration
//!
//! Numeric traits (`Zero`, `One`, `NumCast`, `ToPrimitive`) and random number
//! generation come from `scirs2-core`. Direct use of `num-traits` or `rand` is
//! not allowed.
//!
//! ### Compact Storage
//!
//! A matrix stores only its independent cells. An upper-triangular `4 x 4`
//! matrix keeps 10 values, a scalar matrix keeps 1. Every kernel iterates the
//! compact domain of its destination, never the full `R x C` grid.
//!
//! ### Static Shapes
//!
//! Shapes are const generics. Multiplying matrices with mismatched inner
//! dimensions, asking for the diagonal of a rectangular matrix or declaring a
//! non-square triangular matrix does not compile. Runtime checks exist only
//! for what the types cannot see: indices, writes to implied cells, text
//! input and iteration counts.
//!
//! ## Quick Start
//!
//! ```
//! use fixmat_core::{kind, Mat};
//!
//! let a = Mat::<i32, 2, 1>::from_slice(&[2, 3]).unwrap();
//! let b = Mat::<i32, 2, 1>::from_slice(&[5, 6]).unwrap();
//! assert_eq!((a + b).as_slice(), &[7, 9]);
//!
//! // The product of two upper-triangular matrices is upper triangular
//! let u = Mat::<i32, 3, 3, kind::Upper>::from_slice(&[1, 2, 3, 4, 5, 6]).unwrap();
//! let p: Mat<i32, 3, 3, kind::Upper> = &u * &u;
//! assert_eq!(p.get(0, 2), 1 * 3 + 2 * 5 + 3 * 6);
//! assert_eq!(p.get(2, 0), 0);
//! ```
//!
//! ## Writing Into a Destination
//!
//! The operators allocate nothing but still return a new value. The inherent
//! methods write into an existing matrix and accept operands of any kind,
//! restricting the result to the destination's structural type:
//!
//! ```
//! use fixmat_core::{kind, Mat};
//!
//! let a = Mat::<f64, 3, 3>::filled(1.0);
//! let mut lower = Mat::<f64, 3, 3, kind::Lower>::zeros();
//! lower.mul(&a, &a);
//! assert_eq!(lower.as_slice(), &[3.0; 6]);
//! assert_eq!(lower.get(0, 2), 0.0);
//! ```
//!
//! ## Views
//!
//! Methods with a trailing underscore return views:
//!
//! ```
//! use fixmat_core::{kind, Mat};
//!
//! let s = Mat::<i32, 3, 3, kind::Sym>::from_slice(&[1, 2, 3, 4, 5, 6]).unwrap();
//! let t = s.t_();
//! let d = s.diag_vec_();
//! assert_eq!(t.get(2, 0), 3);
//! assert_eq!(d.as_mat().as_slice(), &[1, 4, 6]);
//! ```
//!
//! ## Error Handling
//!
//! Panicking accessors behave like slice indexing; each has a checked twin
//! returning [`MatResult`]:
//!
//! ```
//! use fixmat_core::{kind, Mat, MatError};
//!
//! let mut a = Mat::<i32, 2, 2, kind::ASym>::zeros();
//! assert!(matches!(a.try_set(1, 1, 5), Err(MatError::ReadOnlyCell { .. })));
//! assert!(a.try_get(2, 0).is_err());
//! ```
//!
//! ## Logging
//!
//! The crate logs through the `log` facade and installs no logger:
//! multiplication strategy selection at `trace`, Newton-Schulz iterations and
//! file loads at `debug`, rejected input and unimplemented routines at
//! `warn`.
//!
//! ## Features
//!
//! - `serde`: Serialization of [`MatType`], [`SynthHints`] and [`Partition`]

pub mod dense;
pub mod element;
pub mod error;
pub mod fixed;
pub mod hints;
pub mod layout;
pub mod ops;
pub mod schedule;
pub mod structure;
pub mod tensor;
pub mod view;


pub use dense::{InitMode, Mat, MatRead, RowVector, Vector, DEFAULT_NSA_ITERATIONS};
pub use element::{Element, FieldElement};
pub use error::{MatError, MatResult};
pub use fixed::{Fixed, FxP, UFxP};
pub use hints::{HintOp, Partition, SynthHints};
pub use layout::Cell;
pub use schedule::{Schedule, MAX_SCHEDULE_DIM};
pub use structure::{kind, Buffer, Compact, MatType, MulWith, Structure, SumWith, MAX_TRIANGULAR_DIM};
pub use tensor::Tensor;
pub use view::{
    ColView, ColsIdxView, ColsView, DiagMatView, DiagRowVecView, DiagVecView, MatView, MatViewMut, OffDiagView,
    OppView, RowView, RowsIdxView, RowsView, TransView, View,
};
