//! Stacks of equally shaped matrices

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::dense::Mat;
use crate::element::Element;
use crate::structure::{kind, Compact};
use crate::view::{MatView, MatViewMut};

/// `N` matrices of shape `R x C` and kind `S`
///
/// # Examples
///
/// ```
/// use fixmat_core::{kind, Tensor};
///
/// let mut t = Tensor::<i32, 3, 3, 2, kind::Diagonal>::zeros();
/// t.slice_mut(1).set(2, 2, 5);
/// assert_eq!(t.mat_size(), 3);
/// assert_eq!(t.size(), 6);
/// assert_eq!(t.slice(1).get(2, 2), 5);
/// ```
#[derive(Clone, Copy)]
pub struct Tensor<T: Copy, const R: usize, const C: usize, const N: usize, S: Compact<R, C> = kind::Normal> {
    mats: [Mat<T, R, C, S>; N],
}

impl<T: Element, const R: usize, const C: usize, const N: usize, S: Compact<R, C>> Tensor<T, R, C, N, S> {
    /// Stored elements per slice
    pub const MAT_SIZE: usize = Mat::<T, R, C, S>::SIZE;

    /// Stored elements in total
    pub const SIZE: usize = N * Self::MAT_SIZE;

    /// All slices zero
    pub fn zeros() -> Self {
        Self {
            mats: [Mat::zeros(); N],
        }
    }

    /// Build from slices
    pub fn from_mats(mats: [Mat<T, R, C, S>; N]) -> Self {
        Self { mats }
    }

    /// Stored elements per slice
    pub const fn mat_size(&self) -> usize {
        Self::MAT_SIZE
    }

    /// Stored elements in total
    pub const fn size(&self) -> usize {
        Self::SIZE
    }

    /// View of slice `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    pub fn slice(&self, index: usize) -> MatView<'_, T, R, C, S> {
        assert!(index < N, "slice index {} out of range for {} slices", index, N);
        self.mats[index].view()
    }

    /// Writable view of slice `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    pub fn slice_mut(&mut self, index: usize) -> MatViewMut<'_, T, R, C, S> {
        assert!(index < N, "slice index {} out of range for {} slices", index, N);
        self.mats[index].view_mut()
    }

    /// Iterate over the slices
    pub fn iter(&self) -> std::slice::Iter<'_, Mat<T, R, C, S>> {
        self.mats.iter()
    }
}

impl<T: Element, const R: usize, const C: usize, const N: usize, S: Compact<R, C>> Default for Tensor<T, R, C, N, S> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<T: Element, const R: usize, const C: usize, const N: usize, S: Compact<R, C>> Index<usize> for Tensor<T, R, C, N, S> {
    type Output = Mat<T, R, C, S>;

    fn index(&self, index: usize) -> &Self::Output {
        assert!(index < N, "slice index {} out of range for {} slices", index, N);
        &self.mats[index]
    }
}

impl<T: Element, const R: usize, const C: usize, const N: usize, S: Compact<R, C>> IndexMut<usize>
    for Tensor<T, R, C, N, S>
{
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        assert!(index < N, "slice index {} out of range for {} slices", index, N);
        &mut self.mats[index]
    }
}

impl<T: Element, const R: usize, const C: usize, const N: usize, S: Compact<R, C>> fmt::Debug
    for Tensor<T, R, C, N, S>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("slices", &N)
            .field("mats", &self.mats)
            .finish()
    }
}

impl<'t, T: Element, const R: usize, const C: usize, const N: usize, S: Compact<R, C>> IntoIterator
    for &'t Tensor<T, R, C, N, S>
{
    type Item = &'t Mat<T, R, C, S>;
    type IntoIter = std::slice::Iter<'t, Mat<T, R, C, S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        let t = Tensor::<f64, 4, 4, 3, kind::SUpper>::zeros();
        assert_eq!(t.mat_size(), 6);
        assert_eq!(t.size(), 18);
        let n = Tensor::<f64, 2, 3, 5>::zeros();
        assert_eq!(n.size(), 30);
        assert_eq!(std::mem::size_of_val(&t), 18 * std::mem::size_of::<f64>());
        assert_eq!(std::mem::size_of::<Tensor<f64, 8, 8, 4, kind::Scalar>>(), 4 * std::mem::size_of::<f64>());
    }

    #[test]
    fn test_slices_are_independent() {
        let mut t = Tensor::<i32, 2, 2, 3>::zeros();
        t.slice_mut(0).assign(&Mat::<i32, 2, 2>::filled(1));
        t[2].set(1, 1, 9);
        assert_eq!(t.slice(0).as_mat(), Mat::<i32, 2, 2>::filled(1));
        assert_eq!(t.slice(1).as_mat(), Mat::<i32, 2, 2>::zeros());
        assert_eq!(t[2].get(1, 1), 9);
        let total: i32 = t.iter().map(|m| m.sum()).sum();
        assert_eq!(total, 13);
    }

    #[test]
    fn test_from_mats() {
        let a = Mat::<i32, 2, 2, kind::Sym>::from_slice(&[1, 2, 3]).unwrap();
        let t = Tensor::from_mats([a, a.scale(2)]);
        assert_eq!(t.slice(1).get(1, 0), 4);
        assert_eq!((&t).into_iter().count(), 2);
    }

    #[test]
    #[should_panic(expected = "slice index 2 out of range")]
    fn test_slice_out_of_range() {
        let t = Tensor::<i32, 2, 2, 2>::zeros();
        let _ = t.slice(2);
    }
}
