//! # fixmat - Fixed-Shape Structured Matrix Algebra
//!
//! Matrices whose shape and structural type are known at compile time, stored
//! compactly and combined by kernels specialized for every pair of structural
//! types.
//!
//! This is the **meta crate** that re-exports all fixmat components for
//! convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use fixmat::prelude::*;
//!
//! let a = Vector::<i32, 2>::from_slice(&[2, 3])?;
//! let b = Vector::<i32, 2>::from_slice(&[5, 6])?;
//! assert_eq!((a + b).as_slice(), &[7, 9]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Core Matrix Types ([`core`])
//!
//! Structural types and their algebra, compact storage, views, operators,
//! fixed-point elements, Newton-Schulz inversion, text I/O and tensors.
//!
//! ```
//! use fixmat::core::{kind, Mat};
//!
//! let d = Mat::<f64, 3, 3, kind::Diagonal>::from_slice(&[2.0, 4.0, 8.0]).unwrap();
//! let inv = d.inv_diag().unwrap();
//! assert_eq!(inv.as_slice(), &[0.5, 0.25, 0.125]);
//! ```
//!
//! ### Kernels ([`kernels`])
//!
//! Merge sort, top-2 selection and systolic multiplication.
//!
//! ```
//! use fixmat::core::Vector;
//! use fixmat::kernels::merge_sort;
//!
//! let mut v = Vector::<i32, 3>::from_slice(&[3, 1, 2]).unwrap();
//! merge_sort(&mut v);
//! assert_eq!(v.as_slice(), &[1, 2, 3]);
//! ```
//!
//! ## Features
//!
//! - `serde`: Serialization of matrix types and synthesis hints
//!
//! ## Examples
//!
//! See the `examples/` directory of this crate:
//! `hello_world`, `mat_vec_multiplication`, `mat_inv_nsa`, `mat_write_col` and
//! `task_level_pipelining`.

#![deny(warnings)]

// Re-export all components
pub use fixmat_core as core;
pub use fixmat_kernels as kernels;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! The operator traits are not re-exported: `Mat` has inherent `add`,
    //! `sub` and `mul` methods that write into `self`, and bringing
    //! `std::ops::{Add, Sub, Mul}` into scope would shadow them in method
    //! calls.
    //!
    //! # Example
    //!
    //! ```
    //! use fixmat::prelude::*;
    //!
    //! let m = Mat::<f64, 4, 4, kind::Upper>::zeros();
    //! assert_eq!(m.size(), 10);
    //! ```

    // Matrix types
    pub use crate::core::{kind, Mat, MatRead, MatType, RowVector, Tensor, Vector};

    // Views
    pub use crate::core::{MatView, MatViewMut, View};

    // Elements
    pub use crate::core::{Element, FieldElement, Fixed, FxP, UFxP};

    // Construction, configuration and errors
    pub use crate::core::{InitMode, MatError, MatResult, Partition, SynthHints};

    // Kernels
    pub use crate::kernels::{argmax_4_2, merge_sort, merge_sort_into, systolic_mul, Top2};
}
