//! Bottom-up merge sort over compact buffers
//!
//! The sort runs `ceil(log2(n))` passes of doubling width. Each pass merges
//! neighbouring runs from the matrix into a scratch buffer of the same type
//! and copies the result back, so no heap allocation takes place.
//!
//! Sorting acts on the compact buffer. For a column or row vector that is the
//! vector itself; for structured kinds only the stored cells move, in
//! canonical compact order.

use fixmat_core::{Compact, Element, Mat, MatRead};

/// Sort the stored elements of `mat` in ascending order
///
/// The sort is stable: equal elements keep their relative order. Elements
/// that compare as unordered (such as `NaN`) are placed after the element
/// they were compared against.
///
/// # Complexity
///
/// Time: O(n log n) comparisons
/// Space: one scratch matrix of the same type, on the stack
///
/// # Examples
///
/// ```
/// use fixmat_core::Vector;
/// use fixmat_kernels::merge_sort;
///
/// let mut v = Vector::<i32, 5>::from_slice(&[4, -1, 3, 3, 0]).unwrap();
/// merge_sort(&mut v);
/// assert_eq!(v.as_slice(), &[-1, 0, 3, 3, 4]);
/// ```
pub fn merge_sort<T, const R: usize, const C: usize, S>(mat: &mut Mat<T, R, C, S>)
where
    T: Element,
    S: Compact<R, C>,
{
    let size = mat.size();
    let mut scratch = Mat::<T, R, C, S>::zeros();
    let mut width = 1;
    let mut passes = 0;
    while width < size {
        merge_pass(mat.as_slice(), scratch.as_mut_slice(), width);
        mat.as_mut_slice().copy_from_slice(scratch.as_slice());
        width *= 2;
        passes += 1;
    }
    log::trace!("merge_sort: {} elements in {} passes", size, passes);
}

/// Write the sorted stored elements of `src` into `dst`
///
/// `src` is left untouched.
///
/// # Examples
///
/// ```
/// use fixmat_core::{kind, Mat};
/// use fixmat_kernels::merge_sort_into;
///
/// let src = Mat::<i32, 3, 3, kind::Lower>::from_slice(&[6, 5, 4, 3, 2, 1]).unwrap();
/// let mut dst = Mat::<i32, 3, 3, kind::Lower>::zeros();
/// merge_sort_into(&src, &mut dst);
/// assert_eq!(dst.as_slice(), &[1, 2, 3, 4, 5, 6]);
/// assert_eq!(src.get(0, 0), 6);
/// ```
pub fn merge_sort_into<T, const R: usize, const C: usize, S, A>(src: &A, dst: &mut Mat<T, R, C, S>)
where
    T: Element,
    S: Compact<R, C>,
    A: MatRead<T, R, C, Kind = S>,
{
    *dst = src.to_mat();
    merge_sort(dst);
}

/// Alias of [`merge_sort`]
#[inline]
pub fn sort<T, const R: usize, const C: usize, S>(mat: &mut Mat<T, R, C, S>)
where
    T: Element,
    S: Compact<R, C>,
{
    merge_sort(mat);
}

/// Alias of [`merge_sort_into`]
#[inline]
pub fn sort_into<T, const R: usize, const C: usize, S, A>(src: &A, dst: &mut Mat<T, R, C, S>)
where
    T: Element,
    S: Compact<R, C>,
    A: MatRead<T, R, C, Kind = S>,
{
    merge_sort_into(src, dst);
}

/// Merge every pair of neighbouring runs of length `width` from `src` into `dst`
fn merge_pass<T: Element>(src: &[T], dst: &mut [T], width: usize) {
    let size = src.len();
    let mut start = 0;
    while start < size {
        let mid = (start + width).min(size);
        let end = (start + 2 * width).min(size);
        let (mut left, mut right) = (start, mid);
        for slot in &mut dst[start..end] {
            if right == end || (left < mid && src[left] <= src[right]) {
                *slot = src[left];
                left += 1;
            } else {
                *slot = src[right];
                right += 1;
            }
        }
        start = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixmat_core::{kind, FxP, Vector};

    #[test]
    fn test_sort_power_of_two() {
        let mut v = Vector::<i32, 8>::from_slice(&[7, 3, 5, 1, 8, 2, 6, 4]).unwrap();
        merge_sort(&mut v);
        assert_eq!(v.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_sort_odd_length() {
        let mut v = Vector::<i32, 7>::from_slice(&[0, -3, 9, -3, 2, 11, 1]).unwrap();
        sort(&mut v);
        assert_eq!(v.as_slice(), &[-3, -3, 0, 1, 2, 9, 11]);
    }

    #[test]
    fn test_sort_single_element() {
        let mut v = Vector::<f64, 1>::from_slice(&[2.5]).unwrap();
        merge_sort(&mut v);
        assert_eq!(v.as_slice(), &[2.5]);
    }

    #[test]
    fn test_sort_negative_values_into() {
        // all values below zero
        let src = Vector::<i32, 5>::from_slice(&[-1, -9, -4, -7, -2]).unwrap();
        let mut dst = Vector::<i32, 5>::zeros();
        sort_into(&src, &mut dst);
        assert_eq!(dst.as_slice(), &[-9, -7, -4, -2, -1]);
        assert_eq!(src.as_slice(), &[-1, -9, -4, -7, -2]);
    }

    #[test]
    fn test_sort_into_from_view() {
        let src = Mat::<i32, 2, 3>::from_slice(&[3, 1, 2, 6, 5, 4]).unwrap();
        let mut dst = Mat::<i32, 3, 2>::zeros();
        merge_sort_into(&src.t_(), &mut dst);
        assert_eq!(dst.as_slice(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_sort_structured_compact_buffer() {
        let mut s = Mat::<i32, 3, 3, kind::Sym>::from_slice(&[9, 8, 7, 6, 5, 4]).unwrap();
        merge_sort(&mut s);
        assert_eq!(s.as_slice(), &[4, 5, 6, 7, 8, 9]);
        assert_eq!(s.get(1, 0), s.get(0, 1));
    }

    #[test]
    fn test_sort_fixed_point() {
        let values: Vec<FxP<8, 8>> = [1.5, -0.25, 0.0, -3.0]
            .iter()
            .map(|&v| FxP::<8, 8>::from_f64(v).unwrap())
            .collect();
        let mut v = Vector::<FxP<8, 8>, 4>::from_slice(&values).unwrap();
        merge_sort(&mut v);
        let sorted: Vec<f64> = v.as_slice().iter().map(|x| x.to_f64()).collect();
        assert_eq!(sorted, vec![-3.0, -0.25, 0.0, 1.5]);
    }

    #[test]
    fn test_merge_pass_merges_sorted_runs() {
        let src = [2, 5, 1, 9, 3, 4, 0];
        let mut dst = [0; 7];
        merge_pass(&src, &mut dst, 2);
        assert_eq!(dst, [1, 2, 5, 9, 0, 3, 4]);
    }
}
