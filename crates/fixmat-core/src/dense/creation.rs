//! Matrix creation and conversion
//!
//! This module provides constructors from scalars, compact sequences, full
//! logical arrays and other matrices, including conversions between
//! structural types.

use super::types::{Mat, MatRead};
use crate::element::Element;
use crate::error::{MatError, MatResult};
use crate::hints::{HintOp, SynthHints};
use crate::layout::{self, Cells};
use crate::structure::{Compact, Structure};

/// Post-processing applied to a compact initializer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitMode {
    /// Store the values as given
    #[default]
    AsIs,
    /// Store the additive inverse of each value
    Negated,
    /// The values are the compact buffer of the transposed matrix
    Transposed,
}

impl<T: Element, const R: usize, const C: usize, S: Compact<R, C>> Mat<T, R, C, S> {
    /// Matrix whose stored elements all equal `value`
    ///
    /// Structural zeros stay zero and mirrored cells follow their slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixmat_core::{kind, Mat};
    ///
    /// let m = Mat::<i32, 2, 2, kind::ASym>::filled(3);
    /// assert_eq!(m.get(0, 1), 3);
    /// assert_eq!(m.get(1, 0), -3);
    /// assert_eq!(m.get(1, 1), 0);
    /// ```
    pub fn filled(value: T) -> Self {
        Self::from_compact_fn(|_| value)
    }

    /// Build from exactly `size()` values in canonical compact order
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` ("dimension does not match") when the
    /// slice length differs from the compact size.
    pub fn from_slice(values: &[T]) -> MatResult<Self> {
        Self::from_slice_with(values, InitMode::AsIs)
    }

    /// Build from a compact sequence with post-processing
    ///
    /// With [`InitMode::Transposed`] the values are read as the compact
    /// buffer of a `C x R` matrix of the transposed structural type.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixmat_core::{kind, InitMode, Mat};
    ///
    /// // compact buffer of a lower-triangular matrix
    /// let lower = [1, 2, 3];
    /// let upper = Mat::<i32, 2, 2, kind::Upper>::from_slice_with(&lower, InitMode::Transposed).unwrap();
    /// assert_eq!(upper.get(0, 1), 2);
    /// ```
    pub fn from_slice_with(values: &[T], mode: InitMode) -> MatResult<Self> {
        if values.len() != Self::SIZE {
            return Err(MatError::dimension_mismatch(
                "compact initializer",
                Self::SIZE,
                values.len(),
            ));
        }
        let out = match mode {
            InitMode::AsIs => Self::from_compact_fn(|i| values[i]),
            InitMode::Negated => Self::from_compact_fn(|i| values[i].negate()),
            InitMode::Transposed => {
                let source = S::KIND.transpose_type();
                let mut out = Self::zeros();
                let buf = out.as_mut_slice();
                for (i, r, c) in Cells::new(S::KIND, R, C) {
                    buf[i] = layout::read(source, C, R, values, c, r);
                }
                out
            }
        };
        Ok(out)
    }

    /// Owned variant of [`Mat::from_slice`]
    pub fn from_vec(values: Vec<T>) -> MatResult<Self> {
        Self::from_slice(&values)
    }

    /// Build from a full logical array
    ///
    /// Only the cells the structural type stores are taken; for `Sym` and
    /// `ASym` the upper triangle wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixmat_core::{kind, Mat};
    ///
    /// let d = Mat::<i32, 2, 2, kind::Diagonal>::from_array([[1, 2], [3, 4]]);
    /// assert_eq!(d.as_slice(), &[1, 4]);
    /// ```
    pub fn from_array(rows: [[T; C]; R]) -> Self {
        let mut out = Self::zeros();
        let buf = out.as_mut_slice();
        for (i, r, c) in Cells::new(S::KIND, R, C) {
            buf[i] = rows[r][c];
        }
        out
    }

    /// Convert from any matrix or view of the same shape
    ///
    /// Same-kind sources are copied buffer to buffer; otherwise the
    /// destination domain is walked and every stored cell reads the source.
    pub fn from_read<A: MatRead<T, R, C>>(src: &A) -> Self {
        let mut out = Self::zeros();
        out.copy_from(src);
        out
    }

    /// Overwrite with the contents of `src`, see [`Mat::from_read`]
    pub fn copy_from<A: MatRead<T, R, C>>(&mut self, src: &A) -> &mut Self {
        self.copy_from_with(src, &SynthHints::default())
    }

    /// [`Mat::copy_from`] with explicit synthesis hints
    pub fn copy_from_with<A: MatRead<T, R, C>>(&mut self, src: &A, hints: &SynthHints) -> &mut Self {
        copy_into::<T, R, C, S, A>(self.as_mut_slice(), src, hints.unroll(HintOp::Copy));
        self
    }

    /// Random matrix with stored elements uniform in `[low, high)`
    ///
    /// Values that the element type cannot represent become zero.
    pub fn random_uniform(low: f64, high: f64) -> Self {
        use scirs2_core::random::quick::random_f64;
        let range = high - low;
        Self::from_compact_fn(|_| T::from_f64(low + random_f64() * range).unwrap_or_else(T::zero))
    }
}

impl<T: Element, const N: usize, S: Compact<N, N>> Mat<T, N, N, S> {
    /// Identity matrix
    ///
    /// Kinds with a structurally zero diagonal (`SUpper`, `SLower`, `ASym`)
    /// yield the zero matrix.
    pub fn identity() -> Self {
        let mut out = Self::zeros();
        for i in 0..N {
            out.assign_cell(i, i, T::one());
        }
        out
    }
}

/// Copy `src` into a compact buffer of kind `S`
pub(crate) fn copy_into<T, const R: usize, const C: usize, S, A>(out: &mut [T], src: &A, unroll: usize)
where
    T: Element,
    S: Structure,
    A: MatRead<T, R, C>,
{
    if <A::Kind as Structure>::KIND == S::KIND {
        for (chunk_index, chunk) in out.chunks_mut(unroll).enumerate() {
            let base = chunk_index * unroll;
            for (j, slot) in chunk.iter_mut().enumerate() {
                *slot = src.at(base + j);
            }
        }
    } else {
        for (i, r, c) in Cells::new(S::KIND, R, C) {
            out[i] = src.get(r, c);
        }
    }
}
