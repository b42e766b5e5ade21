//! # fixmat-kernels
//!
//! Self-contained kernels built on the fixmat matrix types.
//!
//! **Kernels:**
//! - **Merge sort** ([`merge_sort`], [`merge_sort_into`]) - bottom-up sort of
//!   a matrix's compact buffer with a stack scratch buffer
//! - **Top-2 selection** ([`argmax_4_2`]) - comparator network choosing the
//!   two largest of four values and their indices
//! - **Systolic multiplication** ([`systolic_mul`]) - cycle-accurate
//!   output-stationary array, bit-identical to `Mat::mul` for finite operands
//!
//! ## Quick Start
//!
//! ```rust
//! use fixmat_core::{Mat, Vector};
//! use fixmat_kernels::{argmax_4_2, merge_sort, systolic_mul};
//!
//! let mut v = Vector::<i32, 4>::from_slice(&[3, 1, 4, 1]).unwrap();
//! merge_sort(&mut v);
//! assert_eq!(v.as_slice(), &[1, 1, 3, 4]);
//!
//! let top = argmax_4_2([0.2, 0.9, 0.4, 0.1], [0, 1, 2, 3], false);
//! assert_eq!(top.first_index, 1);
//! assert_eq!(top.second_index, 2);
//!
//! let a = Mat::<i32, 2, 2>::from_slice(&[1, 2, 3, 4]).unwrap();
//! let p = systolic_mul(&a, &a);
//! assert_eq!(p, a * a);
//! ```
//!
//! ## Logging
//!
//! Kernels report pass and cycle counts at `trace` level through the `log`
//! facade.

pub mod select;
pub mod sort;
pub mod systolic;


pub use select::{argmax_4_2, Top2};
pub use sort::{merge_sort, merge_sort_into, sort, sort_into};
pub use systolic::{systolic_cycles, systolic_mul};
