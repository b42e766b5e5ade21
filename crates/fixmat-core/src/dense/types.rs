//! Matrix type definition and element access
//!
//! This module defines [`Mat`], the owning fixed-shape matrix, together with
//! the [`MatRead`] trait shared by matrices and views. Creation, arithmetic
//! and the remaining operations live in sibling modules.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use crate::element::Element;
use crate::error::{MatError, MatResult};
use crate::layout;
use crate::structure::{kind, Buffer, Compact, MatType, Structure};
use crate::view::{MatView, MatViewMut, Negated, OppView, Plain, View};

/// Fixed-shape matrix with structural storage
///
/// A `Mat<T, R, C, S>` is an `R x C` matrix whose structural type `S` (one of
/// the [`kind`](crate::kind) markers) decides which cells are stored. Only
/// `S::KIND.compact_size(R, C)` elements are stored; they form the compact
/// buffer returned by [`Mat::as_slice`], in the canonical order of
/// [`crate::layout`].
///
/// The value lives inline without heap allocation and is `Copy`. Its size is
/// that of the compact buffer:
///
/// ```
/// use fixmat_core::{kind, Mat};
/// use std::mem::size_of;
///
/// assert_eq!(size_of::<Mat<f64, 8, 8, kind::Diagonal>>(), 8 * size_of::<f64>());
/// assert_eq!(size_of::<Mat<f64, 8, 8, kind::Upper>>(), 36 * size_of::<f64>());
/// ```
///
/// # Type Parameters
///
/// * `T` - The element type
/// * `R`, `C` - Number of rows and columns
/// * `S` - The structural type, `kind::Normal` by default; every other kind
///   requires `R == C` (see [`Compact`])
///
/// # Examples
///
/// ```
/// use fixmat_core::{kind, Mat};
///
/// let upper = Mat::<i32, 3, 3, kind::Upper>::from_slice(&[1, 2, 3, 4, 5, 6]).unwrap();
/// assert_eq!(upper.size(), 6);
/// assert_eq!(upper.get(1, 2), 5);
/// assert_eq!(upper.get(2, 0), 0);
/// ```
pub struct Mat<T: Copy, const R: usize, const C: usize, S: Compact<R, C> = kind::Normal> {
    data: S::Buf<T>,
    _kind: PhantomData<S>,
}

impl<T: Copy, const R: usize, const C: usize, S: Compact<R, C>> Clone for Mat<T, R, C, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Copy, const R: usize, const C: usize, S: Compact<R, C>> Copy for Mat<T, R, C, S> {}

/// Column vector
pub type Vector<T, const N: usize> = Mat<T, N, 1>;

/// Row vector
pub type RowVector<T, const N: usize> = Mat<T, 1, N>;

/// Read access shared by matrices and views
///
/// `get` addresses logical cells; `at` addresses the compact buffer of
/// `Self::Kind`. All binary operations accept any `MatRead` operand.
pub trait MatRead<T: Element, const R: usize, const C: usize> {
    /// Structural type of the values this reader exposes
    type Kind: Compact<R, C>;

    /// Logical value of `(r, c)`
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the `R x C` shape.
    fn get(&self, r: usize, c: usize) -> T;

    /// Value at compact index `index` of `Self::Kind`
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.size()`.
    fn at(&self, index: usize) -> T;

    /// Number of compact elements
    fn size(&self) -> usize {
        <Self::Kind as Structure>::KIND.compact_size(R, C)
    }

    /// Materialize into an owning matrix
    fn to_mat(&self) -> Mat<T, R, C, Self::Kind> {
        Mat::from_compact_fn(|i| self.at(i))
    }
}

impl<'r, T, const R: usize, const C: usize, X> MatRead<T, R, C> for &'r X
where
    T: Element,
    X: MatRead<T, R, C> + ?Sized,
{
    type Kind = X::Kind;

    #[inline]
    fn get(&self, r: usize, c: usize) -> T {
        (**self).get(r, c)
    }

    #[inline]
    fn at(&self, index: usize) -> T {
        (**self).at(index)
    }
}

impl<T: Element, const R: usize, const C: usize, S: Compact<R, C>> Mat<T, R, C, S> {
    /// Number of rows
    pub const ROWS: usize = R;

    /// Number of columns
    pub const COLS: usize = C;

    /// Structural type
    pub const KIND: MatType = S::KIND;

    /// Number of stored elements
    pub const SIZE: usize = S::KIND.compact_size(R, C);

    pub(crate) const SHAPE_OK: () = assert!(
        R >= 1 && C >= 1 && S::KIND.allows_shape(R, C),
        "matrix must be non-empty and structured kinds must be square"
    );

    /// Zero matrix
    pub fn zeros() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::SHAPE_OK;
        Self {
            data: <S::Buf<T> as Buffer<T>>::splat(T::zero()),
            _kind: PhantomData,
        }
    }

    pub(crate) fn from_compact_fn(mut f: impl FnMut(usize) -> T) -> Self {
        let mut out = Self::zeros();
        for (i, slot) in out.as_mut_slice().iter_mut().enumerate() {
            *slot = f(i);
        }
        out
    }

    /// Number of stored elements
    pub const fn size(&self) -> usize {
        Self::SIZE
    }

    /// Structural type
    pub const fn kind(&self) -> MatType {
        S::KIND
    }

    /// The compact buffer
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    /// The compact buffer, mutably
    ///
    /// Writes land in storage directly, so an `ASym` slot holds the value of
    /// the upper cell and a `Scalar` slot the whole diagonal.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_mut_slice()
    }

    /// Logical value of `(r, c)`
    ///
    /// Structural zeros read as zero and mirrored cells of `Sym`/`ASym`
    /// read through their canonical slot.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of range; see [`Mat::try_get`].
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> T {
        assert!(r < R && c < C, "index ({}, {}) out of range for a {}x{} matrix", r, c, R, C);
        layout::read(S::KIND, R, C, self.as_slice(), r, c)
    }

    /// Checked [`Mat::get`]
    pub fn try_get(&self, r: usize, c: usize) -> MatResult<T> {
        if r < R && c < C {
            Ok(layout::read(S::KIND, R, C, self.as_slice(), r, c))
        } else {
            Err(MatError::out_of_range(r, c, R, C))
        }
    }

    /// Checked compact-buffer read
    pub fn try_at(&self, index: usize) -> MatResult<T> {
        self.as_slice()
            .get(index)
            .copied()
            .ok_or(MatError::CompactIndexOutOfRange {
                index,
                size: Self::SIZE,
            })
    }

    /// Write the logical cell `(r, c)`
    ///
    /// Below-diagonal writes to `Sym` update the mirrored slot; below-diagonal
    /// writes to `ASym` store the negated value so that `get(r, c)` returns
    /// `value`. Any diagonal write to `Scalar` sets the single stored value.
    ///
    /// # Panics
    ///
    /// Panics when the cell is out of range or structurally zero; see
    /// [`Mat::try_set`].
    pub fn set(&mut self, r: usize, c: usize, value: T) {
        if let Err(err) = self.try_set(r, c, value) {
            panic!("{}", err);
        }
    }

    /// Checked [`Mat::set`]
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` outside the shape, `ReadOnlyCell` for a structural
    /// zero (including the `ASym` diagonal).
    pub fn try_set(&mut self, r: usize, c: usize, value: T) -> MatResult<()> {
        if r >= R || c >= C {
            return Err(MatError::out_of_range(r, c, R, C));
        }
        if layout::write(S::KIND, R, C, self.as_mut_slice(), r, c, value) {
            Ok(())
        } else {
            Err(MatError::read_only(r, c, S::KIND))
        }
    }

    /// Write `(r, c)` if it has storage, returning whether it was written
    ///
    /// This is the conversion primitive: structural zeros are skipped silently.
    pub fn assign_cell(&mut self, r: usize, c: usize, value: T) -> bool {
        r < R && c < C && layout::write(S::KIND, R, C, self.as_mut_slice(), r, c, value)
    }

    /// Borrow as a plain view
    pub fn view(&self) -> MatView<'_, T, R, C, S> {
        View::new(self.as_slice(), Plain::new())
    }

    /// Borrow as a negating view
    pub fn opp_(&self) -> OppView<'_, T, R, C, S> {
        View::new(self.as_slice(), Negated::new())
    }

    /// Borrow as the writable view
    pub fn view_mut(&mut self) -> MatViewMut<'_, T, R, C, S> {
        MatViewMut::new(self.as_mut_slice())
    }
}

impl<T: Element, const R: usize, const C: usize, S: Compact<R, C>> Default for Mat<T, R, C, S> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<T: Element, const R: usize, const C: usize, S: Compact<R, C>> MatRead<T, R, C> for Mat<T, R, C, S> {
    type Kind = S;

    #[inline]
    fn get(&self, r: usize, c: usize) -> T {
        Mat::get(self, r, c)
    }

    #[inline]
    fn at(&self, index: usize) -> T {
        self.as_slice()[index]
    }

    fn to_mat(&self) -> Mat<T, R, C, S> {
        *self
    }
}

impl<T: Element, const R: usize, const C: usize, S: Compact<R, C>> Index<usize> for Mat<T, R, C, S> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        assert!(index < Self::SIZE, "compact index {} out of range for {} stored elements", index, Self::SIZE);
        &self.as_slice()[index]
    }
}

impl<T: Element, const R: usize, const C: usize, S: Compact<R, C>> IndexMut<usize> for Mat<T, R, C, S> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        assert!(index < Self::SIZE, "compact index {} out of range for {} stored elements", index, Self::SIZE);
        &mut self.as_mut_slice()[index]
    }
}

impl<T: Element, const R: usize, const C: usize, S: Compact<R, C>> fmt::Debug for Mat<T, R, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mat")
            .field("kind", &S::KIND)
            .field("rows", &R)
            .field("cols", &C)
            .field("data", &self.as_slice())
            .finish()
    }
}
