//! Diagonal, row and column extraction
//!
//! Each extraction comes as a copying method and a `_`-suffixed view. Views
//! check their indices when they are created.

use super::types::{Mat, MatRead};
use crate::element::Element;
use crate::layout::Cells;
use crate::structure::{kind, Compact, Structure};
use crate::view::{
    ColList, ColOf, ColRange, ColView, ColsIdxView, ColsView, DiagMatView, DiagRowVecView, DiagVecView,
    DiagonalColumn, DiagonalOf, DiagonalRow, OffDiagView, OffDiagonal, RowList, RowOf, RowRange, RowView,
    RowsIdxView, RowsView, View,
};

impl<T: Element, const N: usize, S: Compact<N, N>> Mat<T, N, N, S> {
    /// Diagonal part as a diagonal matrix
    pub fn diag_mat(&self) -> Mat<T, N, N, kind::Diagonal> {
        Mat::from_compact_fn(|i| self.get(i, i))
    }

    /// Diagonal part as a view
    pub fn diag_mat_(&self) -> DiagMatView<'_, T, N, S> {
        View::new(self.as_slice(), DiagonalOf::new())
    }

    /// Diagonal as a column vector
    pub fn diag_vec(&self) -> Mat<T, N, 1> {
        Mat::from_compact_fn(|i| self.get(i, i))
    }

    /// Diagonal as a column vector view
    pub fn diag_vec_(&self) -> DiagVecView<'_, T, N, S> {
        View::new(self.as_slice(), DiagonalColumn::new())
    }

    /// Diagonal as a row vector
    pub fn diag_row_vec(&self) -> Mat<T, 1, N> {
        Mat::from_compact_fn(|i| self.get(i, i))
    }

    /// Diagonal as a row vector view
    pub fn diag_row_vec_(&self) -> DiagRowVecView<'_, T, N, S> {
        View::new(self.as_slice(), DiagonalRow::new())
    }

    /// Everything but the diagonal
    ///
    /// The result kind drops the diagonal where the type system can say so
    /// (`Upper` becomes `SUpper`, `Lower` becomes `SLower`); other kinds keep
    /// their type with a zeroed diagonal.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixmat_core::{kind, Mat};
    ///
    /// let u = Mat::<i32, 2, 2, kind::Upper>::from_slice(&[1, 2, 3]).unwrap();
    /// let e: Mat<i32, 2, 2, kind::SUpper> = u.off_diag();
    /// assert_eq!(e.as_slice(), &[2]);
    /// ```
    pub fn off_diag(&self) -> Mat<T, N, N, S::OffDiag> {
        let mut out = Mat::zeros();
        let buf = out.as_mut_slice();
        for (i, r, c) in Cells::new(<S::OffDiag as Structure>::KIND, N, N) {
            buf[i] = if r == c { T::zero() } else { self.get(r, c) };
        }
        out
    }

    /// Off-diagonal view
    pub fn off_diag_(&self) -> OffDiagView<'_, T, N, S> {
        View::new(self.as_slice(), OffDiagonal::new())
    }
}

impl<T: Element, const R: usize, const C: usize, S: Compact<R, C>> Mat<T, R, C, S> {
    /// Row `index` as a row vector
    ///
    /// # Panics
    ///
    /// Panics if `index >= R`.
    pub fn row(&self, index: usize) -> Mat<T, 1, C> {
        self.row_(index).as_mat()
    }

    /// Row `index` as a view
    ///
    /// # Panics
    ///
    /// Panics if `index >= R`.
    pub fn row_(&self, index: usize) -> RowView<'_, T, R, C, S> {
        assert!(index < R, "row index {} out of range for {} rows", index, R);
        View::new(self.as_slice(), RowOf::new(index))
    }

    /// Column `index` as a column vector
    pub fn col(&self, index: usize) -> Mat<T, R, 1> {
        self.col_(index).as_mat()
    }

    /// Column `index` as a view
    ///
    /// # Panics
    ///
    /// Panics if `index >= C`.
    pub fn col_(&self, index: usize) -> ColView<'_, T, R, C, S> {
        assert!(index < C, "column index {} out of range for {} columns", index, C);
        View::new(self.as_slice(), ColOf::new(index))
    }

    /// `N` contiguous rows starting at `first`
    pub fn rows<const N: usize>(&self, first: usize) -> Mat<T, N, C> {
        self.rows_::<N>(first).as_mat()
    }

    /// View of `N` contiguous rows starting at `first`
    ///
    /// # Panics
    ///
    /// Panics if the range does not fit in `R` rows.
    pub fn rows_<const N: usize>(&self, first: usize) -> RowsView<'_, T, R, C, N, S> {
        assert!(first + N <= R, "rows {}..{} out of range for {} rows", first, first + N, R);
        View::new(self.as_slice(), RowRange::new(first))
    }

    /// `N` contiguous columns starting at `first`
    pub fn cols<const N: usize>(&self, first: usize) -> Mat<T, R, N> {
        self.cols_::<N>(first).as_mat()
    }

    /// View of `N` contiguous columns starting at `first`
    ///
    /// # Panics
    ///
    /// Panics if the range does not fit in `C` columns.
    pub fn cols_<const N: usize>(&self, first: usize) -> ColsView<'_, T, R, C, N, S> {
        assert!(first + N <= C, "columns {}..{} out of range for {} columns", first, first + N, C);
        View::new(self.as_slice(), ColRange::new(first))
    }

    /// Rows picked by index, in the given order
    pub fn rows_idx<const N: usize>(&self, indices: &[usize; N]) -> Mat<T, N, C> {
        self.rows_idx_(indices).as_mat()
    }

    /// View of rows picked by index
    ///
    /// # Panics
    ///
    /// Panics if any index is out of range.
    pub fn rows_idx_<'a, const N: usize>(&'a self, indices: &'a [usize; N]) -> RowsIdxView<'a, T, R, C, N, S> {
        if let Some(bad) = indices.iter().find(|&&i| i >= R) {
            panic!("row index {} out of range for {} rows", bad, R);
        }
        View::new(self.as_slice(), RowList::new(indices))
    }

    /// Columns picked by index, in the given order
    pub fn cols_idx<const N: usize>(&self, indices: &[usize; N]) -> Mat<T, R, N> {
        self.cols_idx_(indices).as_mat()
    }

    /// View of columns picked by index
    ///
    /// # Panics
    ///
    /// Panics if any index is out of range.
    pub fn cols_idx_<'a, const N: usize>(&'a self, indices: &'a [usize; N]) -> ColsIdxView<'a, T, R, C, N, S> {
        if let Some(bad) = indices.iter().find(|&&i| i >= C) {
            panic!("column index {} out of range for {} columns", bad, C);
        }
        View::new(self.as_slice(), ColList::new(indices))
    }

    /// Overwrite row `index` from a row vector
    ///
    /// Cells the structural type does not store are skipped.
    ///
    /// # Panics
    ///
    /// Panics if `index >= R`.
    pub fn set_row<A: MatRead<T, 1, C>>(&mut self, index: usize, src: &A) -> &mut Self {
        assert!(index < R, "row index {} out of range for {} rows", index, R);
        for c in 0..C {
            self.assign_cell(index, c, src.get(0, c));
        }
        self
    }

    /// Overwrite column `index` from a column vector
    ///
    /// Cells the structural type does not store are skipped.
    ///
    /// # Panics
    ///
    /// Panics if `index >= C`.
    pub fn set_col<A: MatRead<T, R, 1>>(&mut self, index: usize, src: &A) -> &mut Self {
        assert!(index < C, "column index {} out of range for {} columns", index, C);
        for r in 0..R {
            self.assign_cell(r, index, src.get(r, 0));
        }
        self
    }
}
