//! Non-owning views of matrix storage
//!
//! Every read-only view is a [`View`]: a borrowed compact buffer plus a
//! [`Mapping`] that says how a logical `(r, c)` of the view is answered from
//! the parent's storage. The parent's shape and structural type are carried
//! in the mapping's type, so all index arithmetic is still that of
//! [`crate::layout`]; views never copy or allocate.
//!
//! The aliases name the variants:
//!
//! | Alias | Obtained with | Shape | Kind |
//! |-------|---------------|-------|------|
//! | [`MatView`] | [`Mat::view`] | `R x C` | parent |
//! | [`OppView`] | [`Mat::opp_`], `-&mat` | `R x C` | parent |
//! | [`TransView`] | [`Mat::t_`] | `C x R` | transposed |
//! | [`DiagMatView`] | [`Mat::diag_mat_`] | `N x N` | `Diagonal` |
//! | [`DiagVecView`], [`DiagRowVecView`] | [`Mat::diag_vec_`], [`Mat::diag_row_vec_`] | `N x 1`, `1 x N` | `Normal` |
//! | [`OffDiagView`] | [`Mat::off_diag_`] | `N x N` | off-diagonal |
//! | [`RowView`], [`ColView`] | [`Mat::row_`], [`Mat::col_`] | `1 x C`, `R x 1` | `Normal` |
//! | [`RowsView`], [`ColsView`] | [`Mat::rows_`], [`Mat::cols_`] | `N x C`, `R x N` | `Normal` |
//! | [`RowsIdxView`], [`ColsIdxView`] | [`Mat::rows_idx_`], [`Mat::cols_idx_`] | `N x C`, `R x N` | `Normal` |
//!
//! [`MatViewMut`] is the only writable view. It aliases a parent of the same
//! shape and kind and is what [`crate::Tensor::slice_mut`] hands out.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use crate::dense::arith::{accumulate_into, zip_into};
use crate::dense::creation::copy_into;
use crate::dense::{Mat, MatRead};
use crate::element::Element;
use crate::error::{MatError, MatResult};
use crate::hints::{HintOp, SynthHints};
use crate::layout::{self, coords};
use crate::structure::{kind, Compact, Structure};

/// How a view answers reads from its parent's compact buffer
pub trait Mapping<T: Element>: Copy {
    /// Logical value of the view's cell `(r, c)`
    fn read(&self, data: &[T], r: usize, c: usize) -> T;

    /// Compact read when the view shares the parent's layout
    #[inline]
    fn read_compact(&self, _data: &[T], _index: usize) -> Option<T> {
        None
    }
}

/// Read-only view
///
/// # Type Parameters
///
/// * `R`, `C` - Shape of the view
/// * `S` - Structural type of the view
/// * `M` - The [`Mapping`] onto the parent
pub struct View<'a, T, const R: usize, const C: usize, S, M> {
    data: &'a [T],
    mapping: M,
    _kind: PhantomData<S>,
}

impl<'a, T, const R: usize, const C: usize, S, M: Clone> Clone for View<'a, T, R, C, S, M> {
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            mapping: self.mapping.clone(),
            _kind: PhantomData,
        }
    }
}

impl<'a, T, const R: usize, const C: usize, S, M: Copy> Copy for View<'a, T, R, C, S, M> {}

impl<'a, T: Element, const R: usize, const C: usize, S: Structure, M: Mapping<T>> View<'a, T, R, C, S, M> {
    pub(crate) fn new(data: &'a [T], mapping: M) -> Self {
        Self {
            data,
            mapping,
            _kind: PhantomData,
        }
    }

    /// Number of compact elements of the view's kind
    pub const fn size(&self) -> usize {
        S::KIND.compact_size(R, C)
    }

    /// Logical value of `(r, c)`
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of range.
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> T {
        assert!(r < R && c < C, "index ({}, {}) out of range for a {}x{} view", r, c, R, C);
        self.mapping.read(self.data, r, c)
    }

    /// Checked [`View::get`]
    pub fn try_get(&self, r: usize, c: usize) -> MatResult<T> {
        if r < R && c < C {
            Ok(self.mapping.read(self.data, r, c))
        } else {
            Err(MatError::out_of_range(r, c, R, C))
        }
    }

    /// Value at compact index `index` of the view's kind
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.size()`.
    #[inline]
    pub fn at(&self, index: usize) -> T {
        assert!(index < self.size(), "compact index {} out of range for {} stored elements", index, self.size());
        match self.mapping.read_compact(self.data, index) {
            Some(value) => value,
            None => {
                let (r, c) = coords(S::KIND, R, C, index);
                self.mapping.read(self.data, r, c)
            }
        }
    }

}

impl<'a, T: Element, const R: usize, const C: usize, S: Compact<R, C>, M: Mapping<T>> View<'a, T, R, C, S, M> {
    /// Materialize into an owning matrix
    pub fn as_mat(&self) -> Mat<T, R, C, S> {
        Mat::from_compact_fn(|i| self.at(i))
    }
}

impl<'a, T: Element, const R: usize, const C: usize, S: Compact<R, C>, M: Mapping<T>> MatRead<T, R, C>
    for View<'a, T, R, C, S, M>
{
    type Kind = S;

    #[inline]
    fn get(&self, r: usize, c: usize) -> T {
        View::get(self, r, c)
    }

    #[inline]
    fn at(&self, index: usize) -> T {
        View::at(self, index)
    }
}

impl<'a, T: Element, const R: usize, const C: usize, S: Compact<R, C>, M: Mapping<T>> From<View<'a, T, R, C, S, M>>
    for Mat<T, R, C, S>
{
    fn from(view: View<'a, T, R, C, S, M>) -> Self {
        view.as_mat()
    }
}

impl<'a, T: Element, const R: usize, const C: usize, S: Structure, M: Mapping<T>> fmt::Debug
    for View<'a, T, R, C, S, M>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("kind", &S::KIND)
            .field("rows", &R)
            .field("cols", &C)
            .finish_non_exhaustive()
    }
}

macro_rules! parent_mapping {
    ($(#[$doc:meta])* $name:ident { $($field:ident: $ty:ty),* }) => {
        $(#[$doc])*
        pub struct $name<PS, const PR: usize, const PC: usize> {
            $(pub(crate) $field: $ty,)*
            _parent: PhantomData<PS>,
        }

        impl<PS, const PR: usize, const PC: usize> Clone for $name<PS, PR, PC> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<PS, const PR: usize, const PC: usize> Copy for $name<PS, PR, PC> {}

        impl<PS, const PR: usize, const PC: usize> $name<PS, PR, PC> {
            pub(crate) fn new($($field: $ty),*) -> Self {
                Self {
                    $($field,)*
                    _parent: PhantomData,
                }
            }
        }
    };
}

parent_mapping! {
    /// The parent unchanged
    Plain {}
}

parent_mapping! {
    /// Every read negated
    Negated {}
}

parent_mapping! {
    /// Rows and columns swapped
    Transposed {}
}

parent_mapping! {
    /// Diagonal of a square parent as a diagonal matrix
    DiagonalOf {}
}

parent_mapping! {
    /// Diagonal of a square parent as a column vector
    DiagonalColumn {}
}

parent_mapping! {
    /// Diagonal of a square parent as a row vector
    DiagonalRow {}
}

parent_mapping! {
    /// Parent with its diagonal read as zero
    OffDiagonal {}
}

parent_mapping! {
    /// One row of the parent
    RowOf { row: usize }
}

parent_mapping! {
    /// One column of the parent
    ColOf { col: usize }
}

parent_mapping! {
    /// Contiguous rows starting at `first`
    RowRange { first: usize }
}

parent_mapping! {
    /// Contiguous columns starting at `first`
    ColRange { first: usize }
}

#[inline]
fn parent<T: Element, PS: Structure, const PR: usize, const PC: usize>(data: &[T], r: usize, c: usize) -> T {
    layout::read(PS::KIND, PR, PC, data, r, c)
}

impl<T: Element, PS: Structure, const PR: usize, const PC: usize> Mapping<T> for Plain<PS, PR, PC> {
    #[inline]
    fn read(&self, data: &[T], r: usize, c: usize) -> T {
        parent::<T, PS, PR, PC>(data, r, c)
    }

    #[inline]
    fn read_compact(&self, data: &[T], index: usize) -> Option<T> {
        Some(data[index])
    }
}

impl<T: Element, PS: Structure, const PR: usize, const PC: usize> Mapping<T> for Negated<PS, PR, PC> {
    #[inline]
    fn read(&self, data: &[T], r: usize, c: usize) -> T {
        parent::<T, PS, PR, PC>(data, r, c).negate()
    }

    #[inline]
    fn read_compact(&self, data: &[T], index: usize) -> Option<T> {
        Some(data[index].negate())
    }
}

impl<T: Element, PS: Structure, const PR: usize, const PC: usize> Mapping<T> for Transposed<PS, PR, PC> {
    #[inline]
    fn read(&self, data: &[T], r: usize, c: usize) -> T {
        parent::<T, PS, PR, PC>(data, c, r)
    }
}

impl<T: Element, PS: Structure, const PR: usize, const PC: usize> Mapping<T> for DiagonalOf<PS, PR, PC> {
    #[inline]
    fn read(&self, data: &[T], r: usize, c: usize) -> T {
        if r == c {
            parent::<T, PS, PR, PC>(data, r, r)
        } else {
            T::zero()
        }
    }

    #[inline]
    fn read_compact(&self, data: &[T], index: usize) -> Option<T> {
        Some(parent::<T, PS, PR, PC>(data, index, index))
    }
}

impl<T: Element, PS: Structure, const PR: usize, const PC: usize> Mapping<T> for DiagonalColumn<PS, PR, PC> {
    #[inline]
    fn read(&self, data: &[T], r: usize, _c: usize) -> T {
        parent::<T, PS, PR, PC>(data, r, r)
    }
}

impl<T: Element, PS: Structure, const PR: usize, const PC: usize> Mapping<T> for DiagonalRow<PS, PR, PC> {
    #[inline]
    fn read(&self, data: &[T], _r: usize, c: usize) -> T {
        parent::<T, PS, PR, PC>(data, c, c)
    }
}

impl<T: Element, PS: Structure, const PR: usize, const PC: usize> Mapping<T> for OffDiagonal<PS, PR, PC> {
    #[inline]
    fn read(&self, data: &[T], r: usize, c: usize) -> T {
        if r == c {
            T::zero()
        } else {
            parent::<T, PS, PR, PC>(data, r, c)
        }
    }
}

impl<T: Element, PS: Structure, const PR: usize, const PC: usize> Mapping<T> for RowOf<PS, PR, PC> {
    #[inline]
    fn read(&self, data: &[T], _r: usize, c: usize) -> T {
        parent::<T, PS, PR, PC>(data, self.row, c)
    }
}

impl<T: Element, PS: Structure, const PR: usize, const PC: usize> Mapping<T> for ColOf<PS, PR, PC> {
    #[inline]
    fn read(&self, data: &[T], r: usize, _c: usize) -> T {
        parent::<T, PS, PR, PC>(data, r, self.col)
    }
}

impl<T: Element, PS: Structure, const PR: usize, const PC: usize> Mapping<T> for RowRange<PS, PR, PC> {
    #[inline]
    fn read(&self, data: &[T], r: usize, c: usize) -> T {
        parent::<T, PS, PR, PC>(data, self.first + r, c)
    }
}

impl<T: Element, PS: Structure, const PR: usize, const PC: usize> Mapping<T> for ColRange<PS, PR, PC> {
    #[inline]
    fn read(&self, data: &[T], r: usize, c: usize) -> T {
        parent::<T, PS, PR, PC>(data, r, self.first + c)
    }
}

/// Rows picked by an index array
pub struct RowList<'i, PS, const PR: usize, const PC: usize, const N: usize> {
    pub(crate) rows: &'i [usize; N],
    _parent: PhantomData<PS>,
}

/// Columns picked by an index array
pub struct ColList<'i, PS, const PR: usize, const PC: usize, const N: usize> {
    pub(crate) cols: &'i [usize; N],
    _parent: PhantomData<PS>,
}

impl<'i, PS, const PR: usize, const PC: usize, const N: usize> RowList<'i, PS, PR, PC, N> {
    pub(crate) fn new(rows: &'i [usize; N]) -> Self {
        Self {
            rows,
            _parent: PhantomData,
        }
    }
}

impl<'i, PS, const PR: usize, const PC: usize, const N: usize> ColList<'i, PS, PR, PC, N> {
    pub(crate) fn new(cols: &'i [usize; N]) -> Self {
        Self {
            cols,
            _parent: PhantomData,
        }
    }
}

impl<'i, PS, const PR: usize, const PC: usize, const N: usize> Clone for RowList<'i, PS, PR, PC, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'i, PS, const PR: usize, const PC: usize, const N: usize> Copy for RowList<'i, PS, PR, PC, N> {}

impl<'i, PS, const PR: usize, const PC: usize, const N: usize> Clone for ColList<'i, PS, PR, PC, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'i, PS, const PR: usize, const PC: usize, const N: usize> Copy for ColList<'i, PS, PR, PC, N> {}

impl<'i, T: Element, PS: Structure, const PR: usize, const PC: usize, const N: usize> Mapping<T>
    for RowList<'i, PS, PR, PC, N>
{
    #[inline]
    fn read(&self, data: &[T], r: usize, c: usize) -> T {
        parent::<T, PS, PR, PC>(data, self.rows[r], c)
    }
}

impl<'i, T: Element, PS: Structure, const PR: usize, const PC: usize, const N: usize> Mapping<T>
    for ColList<'i, PS, PR, PC, N>
{
    #[inline]
    fn read(&self, data: &[T], r: usize, c: usize) -> T {
        parent::<T, PS, PR, PC>(data, r, self.cols[c])
    }
}

/// Plain view of an `R x C` matrix
pub type MatView<'a, T, const R: usize, const C: usize, S = kind::Normal> =
    View<'a, T, R, C, S, Plain<S, R, C>>;

/// Negating view
pub type OppView<'a, T, const R: usize, const C: usize, S = kind::Normal> =
    View<'a, T, R, C, S, Negated<S, R, C>>;

/// Transposed view of an `R x C` parent
pub type TransView<'a, T, const R: usize, const C: usize, S> =
    View<'a, T, C, R, <S as Compact<R, C>>::Transposed, Transposed<S, R, C>>;

/// Diagonal of an `N x N` parent as a diagonal matrix
pub type DiagMatView<'a, T, const N: usize, S> = View<'a, T, N, N, kind::Diagonal, DiagonalOf<S, N, N>>;

/// Diagonal of an `N x N` parent as a column vector
pub type DiagVecView<'a, T, const N: usize, S> = View<'a, T, N, 1, kind::Normal, DiagonalColumn<S, N, N>>;

/// Diagonal of an `N x N` parent as a row vector
pub type DiagRowVecView<'a, T, const N: usize, S> = View<'a, T, 1, N, kind::Normal, DiagonalRow<S, N, N>>;

/// Off-diagonal part of an `N x N` parent
pub type OffDiagView<'a, T, const N: usize, S> =
    View<'a, T, N, N, <S as Compact<N, N>>::OffDiag, OffDiagonal<S, N, N>>;

/// One row of an `R x C` parent
pub type RowView<'a, T, const R: usize, const C: usize, S> = View<'a, T, 1, C, kind::Normal, RowOf<S, R, C>>;

/// One column of an `R x C` parent
pub type ColView<'a, T, const R: usize, const C: usize, S> = View<'a, T, R, 1, kind::Normal, ColOf<S, R, C>>;

/// `N` contiguous rows of an `R x C` parent
pub type RowsView<'a, T, const R: usize, const C: usize, const N: usize, S> =
    View<'a, T, N, C, kind::Normal, RowRange<S, R, C>>;

/// `N` contiguous columns of an `R x C` parent
pub type ColsView<'a, T, const R: usize, const C: usize, const N: usize, S> =
    View<'a, T, R, N, kind::Normal, ColRange<S, R, C>>;

/// Rows of an `R x C` parent picked by index
pub type RowsIdxView<'a, T, const R: usize, const C: usize, const N: usize, S> =
    View<'a, T, N, C, kind::Normal, RowList<'a, S, R, C, N>>;

/// Columns of an `R x C` parent picked by index
pub type ColsIdxView<'a, T, const R: usize, const C: usize, const N: usize, S> =
    View<'a, T, R, N, kind::Normal, ColList<'a, S, R, C, N>>;

/// Writable view aliasing a parent of the same shape and kind
pub struct MatViewMut<'a, T, const R: usize, const C: usize, S = kind::Normal> {
    data: &'a mut [T],
    _kind: PhantomData<S>,
}

impl<'a, T: Element, const R: usize, const C: usize, S: Structure> MatViewMut<'a, T, R, C, S> {
    pub(crate) fn new(data: &'a mut [T]) -> Self {
        Self {
            data,
            _kind: PhantomData,
        }
    }

    /// Number of compact elements
    pub const fn size(&self) -> usize {
        S::KIND.compact_size(R, C)
    }

    /// Logical value of `(r, c)`
    pub fn get(&self, r: usize, c: usize) -> T {
        assert!(r < R && c < C, "index ({}, {}) out of range for a {}x{} view", r, c, R, C);
        layout::read(S::KIND, R, C, self.data, r, c)
    }

    /// Write `(r, c)` with the same redirection rules as [`Mat::set`]
    ///
    /// # Panics
    ///
    /// Panics when the cell is out of range or structurally zero.
    pub fn set(&mut self, r: usize, c: usize, value: T) {
        if let Err(err) = self.try_set(r, c, value) {
            panic!("{}", err);
        }
    }

    /// Checked [`MatViewMut::set`]
    pub fn try_set(&mut self, r: usize, c: usize, value: T) -> MatResult<()> {
        if r >= R || c >= C {
            return Err(MatError::out_of_range(r, c, R, C));
        }
        if layout::write(S::KIND, R, C, self.data, r, c, value) {
            Ok(())
        } else {
            Err(MatError::read_only(r, c, S::KIND))
        }
    }

    /// Read-only reborrow
    pub fn as_view(&self) -> MatView<'_, T, R, C, S> {
        View::new(self.data, Plain::new())
    }

    /// Overwrite the parent with `src`
    pub fn assign<A: MatRead<T, R, C>>(&mut self, src: &A) -> &mut Self {
        copy_into::<T, R, C, S, A>(self.data, src, SynthHints::default().unroll(HintOp::Copy));
        self
    }

    /// Store `lhs + rhs` in the parent
    pub fn add<A, B>(&mut self, lhs: &A, rhs: &B) -> &mut Self
    where
        A: MatRead<T, R, C>,
        B: MatRead<T, R, C>,
    {
        zip_into::<T, R, C, S, A, B>(self.data, lhs, rhs, SynthHints::default().unroll(HintOp::Add), T::plus);
        self
    }

    /// Store `lhs - rhs` in the parent
    pub fn sub<A, B>(&mut self, lhs: &A, rhs: &B) -> &mut Self
    where
        A: MatRead<T, R, C>,
        B: MatRead<T, R, C>,
    {
        zip_into::<T, R, C, S, A, B>(self.data, lhs, rhs, SynthHints::default().unroll(HintOp::Add), T::minus);
        self
    }

    /// Add `rhs` into the parent
    pub fn add_assign_from<B: MatRead<T, R, C>>(&mut self, rhs: &B) -> &mut Self {
        accumulate_into::<T, R, C, S, B>(self.data, rhs, T::plus);
        self
    }

    /// Subtract `rhs` from the parent
    pub fn sub_assign_from<B: MatRead<T, R, C>>(&mut self, rhs: &B) -> &mut Self {
        accumulate_into::<T, R, C, S, B>(self.data, rhs, T::minus);
        self
    }
}

impl<'a, T: Element, const R: usize, const C: usize, S: Compact<R, C>> MatRead<T, R, C> for MatViewMut<'a, T, R, C, S> {
    type Kind = S;

    fn get(&self, r: usize, c: usize) -> T {
        MatViewMut::get(self, r, c)
    }

    fn at(&self, index: usize) -> T {
        self.data[index]
    }
}

impl<'a, T: Element, const R: usize, const C: usize, S: Structure> Index<usize> for MatViewMut<'a, T, R, C, S> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<'a, T: Element, const R: usize, const C: usize, S: Structure> IndexMut<usize> for MatViewMut<'a, T, R, C, S> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<'a, T: Element, const R: usize, const C: usize, S: Structure> fmt::Debug for MatViewMut<'a, T, R, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatViewMut")
            .field("kind", &S::KIND)
            .field("data", &self.data)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upper() -> Mat<i32, 3, 3, kind::Upper> {
        Mat::from_slice(&[1, 2, 3, 4, 5, 6]).unwrap()
    }

    #[test]
    fn test_plain_and_negated() {
        let m = upper();
        let v = m.view();
        assert_eq!(v.get(1, 2), 5);
        assert_eq!(v.at(3), 4);
        let n = m.opp_();
        assert_eq!(n.get(0, 1), -2);
        assert_eq!(n.get(2, 0), 0);
        assert_eq!(n.as_mat().as_slice(), &[-1, -2, -3, -4, -5, -6]);
    }

    #[test]
    fn test_transposed_view_kind() {
        let m = upper();
        let t = m.t_();
        assert_eq!(t.get(2, 0), 3);
        assert_eq!(t.get(0, 2), 0);
        // lower compact order: (0,0) (1,0) (1,1) (2,0) (2,1) (2,2)
        let lower: Mat<i32, 3, 3, kind::Lower> = t.into();
        assert_eq!(lower.as_slice(), &[1, 2, 4, 3, 5, 6]);
    }

    #[test]
    fn test_view_mut_writes_parent() {
        let mut m = Mat::<i32, 2, 2, kind::ASym>::zeros();
        {
            let mut v = m.view_mut();
            v.set(1, 0, 7);
            assert_eq!(v.get(0, 1), -7);
            v[0] = 3;
        }
        assert_eq!(m.get(1, 0), -3);

        let mut dense = Mat::<i32, 2, 2>::zeros();
        let a = Mat::<i32, 2, 2>::filled(2);
        let b = Mat::<i32, 2, 2, kind::Diagonal>::filled(5);
        dense.view_mut().add(&a, &b).sub_assign_from(&b);
        assert_eq!(dense, a);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_view_get_out_of_range() {
        let m = upper();
        let _ = m.view().get(0, 3);
    }
}
