//! Elementwise arithmetic
//!
//! Every kernel iterates exactly the compact domain of the destination.
//! When both operands share the destination's structural type the loop runs
//! buffer to buffer; otherwise each stored cell reads its operands logically,
//! so operands of any kind can be combined into any destination.

use super::types::{Mat, MatRead};
use crate::element::{Element, FieldElement};
use crate::hints::{HintOp, SynthHints};
use crate::layout::Cells;
use crate::structure::{Compact, Structure};

/// `out = op(lhs, rhs)` over the compact domain of `S`
pub(crate) fn zip_into<T, const R: usize, const C: usize, S, A, B>(
    out: &mut [T],
    lhs: &A,
    rhs: &B,
    unroll: usize,
    op: impl Fn(T, T) -> T,
) where
    T: Element,
    S: Structure,
    A: MatRead<T, R, C>,
    B: MatRead<T, R, C>,
{
    if <A::Kind as Structure>::KIND == S::KIND && <B::Kind as Structure>::KIND == S::KIND {
        for (chunk_index, chunk) in out.chunks_mut(unroll).enumerate() {
            let base = chunk_index * unroll;
            for (j, slot) in chunk.iter_mut().enumerate() {
                *slot = op(lhs.at(base + j), rhs.at(base + j));
            }
        }
    } else {
        for (i, r, c) in Cells::new(S::KIND, R, C) {
            out[i] = op(lhs.get(r, c), rhs.get(r, c));
        }
    }
}

/// `out = op(out, rhs)` over the compact domain of `S`
pub(crate) fn accumulate_into<T, const R: usize, const C: usize, S, B>(out: &mut [T], rhs: &B, op: impl Fn(T, T) -> T)
where
    T: Element,
    S: Structure,
    B: MatRead<T, R, C>,
{
    if <B::Kind as Structure>::KIND == S::KIND {
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = op(*slot, rhs.at(i));
        }
    } else {
        for (i, r, c) in Cells::new(S::KIND, R, C) {
            out[i] = op(out[i], rhs.get(r, c));
        }
    }
}

impl<T: Element, const R: usize, const C: usize, S: Compact<R, C>> Mat<T, R, C, S> {
    /// Store `lhs + rhs`, restricted to this matrix's structural type
    ///
    /// # Arguments
    ///
    /// * `lhs`, `rhs` - Matrices or views of any structural type
    ///
    /// # Examples
    ///
    /// ```
    /// use fixmat_core::{kind, Mat};
    ///
    /// let d = Mat::<i32, 2, 2, kind::Diagonal>::from_slice(&[1, 2]).unwrap();
    /// let s = Mat::<i32, 2, 2, kind::SUpper>::from_slice(&[5]).unwrap();
    /// let mut out = Mat::<i32, 2, 2, kind::Upper>::zeros();
    /// out.add(&d, &s);
    /// assert_eq!(out.as_slice(), &[1, 5, 2]);
    /// ```
    pub fn add<A, B>(&mut self, lhs: &A, rhs: &B) -> &mut Self
    where
        A: MatRead<T, R, C>,
        B: MatRead<T, R, C>,
    {
        self.add_with(lhs, rhs, &SynthHints::default())
    }

    /// [`Mat::add`] with explicit synthesis hints
    pub fn add_with<A, B>(&mut self, lhs: &A, rhs: &B, hints: &SynthHints) -> &mut Self
    where
        A: MatRead<T, R, C>,
        B: MatRead<T, R, C>,
    {
        zip_into::<T, R, C, S, A, B>(self.as_mut_slice(), lhs, rhs, hints.unroll(HintOp::Add), T::plus);
        self
    }

    /// Store `lhs - rhs`, restricted to this matrix's structural type
    pub fn sub<A, B>(&mut self, lhs: &A, rhs: &B) -> &mut Self
    where
        A: MatRead<T, R, C>,
        B: MatRead<T, R, C>,
    {
        self.sub_with(lhs, rhs, &SynthHints::default())
    }

    /// [`Mat::sub`] with explicit synthesis hints
    pub fn sub_with<A, B>(&mut self, lhs: &A, rhs: &B, hints: &SynthHints) -> &mut Self
    where
        A: MatRead<T, R, C>,
        B: MatRead<T, R, C>,
    {
        zip_into::<T, R, C, S, A, B>(self.as_mut_slice(), lhs, rhs, hints.unroll(HintOp::Add), T::minus);
        self
    }

    /// Store the elementwise (Hadamard) product
    ///
    /// Both operands must have this matrix's structural type; the product is
    /// taken slot by slot.
    pub fn emul<A, B>(&mut self, lhs: &A, rhs: &B) -> &mut Self
    where
        A: MatRead<T, R, C, Kind = S>,
        B: MatRead<T, R, C, Kind = S>,
    {
        self.emul_with(lhs, rhs, &SynthHints::default())
    }

    /// [`Mat::emul`] with explicit synthesis hints
    pub fn emul_with<A, B>(&mut self, lhs: &A, rhs: &B, hints: &SynthHints) -> &mut Self
    where
        A: MatRead<T, R, C, Kind = S>,
        B: MatRead<T, R, C, Kind = S>,
    {
        zip_into::<T, R, C, S, A, B>(self.as_mut_slice(), lhs, rhs, hints.unroll(HintOp::Add), T::times);
        self
    }

    /// Add `rhs` into this matrix's stored cells
    pub fn add_assign_from<B: MatRead<T, R, C>>(&mut self, rhs: &B) -> &mut Self {
        accumulate_into::<T, R, C, S, B>(self.as_mut_slice(), rhs, T::plus);
        self
    }

    /// Subtract `rhs` from this matrix's stored cells
    pub fn sub_assign_from<B: MatRead<T, R, C>>(&mut self, rhs: &B) -> &mut Self {
        accumulate_into::<T, R, C, S, B>(self.as_mut_slice(), rhs, T::minus);
        self
    }

    /// Store `-src`
    pub fn neg_from<A: MatRead<T, R, C, Kind = S>>(&mut self, src: &A) -> &mut Self {
        for (i, slot) in self.as_mut_slice().iter_mut().enumerate() {
            *slot = src.at(i).negate();
        }
        self
    }

    /// Additive inverse
    pub fn negated(&self) -> Self {
        Self::from_compact_fn(|i| self.as_slice()[i].negate())
    }

    /// Every element multiplied by `factor`
    pub fn scale(&self, factor: T) -> Self {
        Self::from_compact_fn(|i| self.as_slice()[i].times(factor))
    }

    /// Sum of all logical cells
    pub fn sum(&self) -> T {
        let mut acc = T::zero();
        for r in 0..R {
            for c in 0..C {
                acc = acc.plus(self.get(r, c));
            }
        }
        acc
    }

    /// Largest absolute difference over all logical cells
    pub fn max_abs_diff<B: MatRead<T, R, C>>(&self, other: &B) -> f64 {
        let mut worst = 0.0f64;
        for r in 0..R {
            for c in 0..C {
                let diff = (self.get(r, c).to_f64() - other.get(r, c).to_f64()).abs();
                worst = worst.max(diff);
            }
        }
        worst
    }
}

impl<T: FieldElement, const R: usize, const C: usize, S: Compact<R, C>> Mat<T, R, C, S> {
    /// Every element divided by `divisor`
    pub fn div_scalar(&self, divisor: T) -> Self {
        Self::from_compact_fn(|i| self.as_slice()[i].divide(divisor))
    }
}

impl<T: Element, const N: usize, S: Compact<N, N>> Mat<T, N, N, S> {
    /// Sum of the diagonal
    pub fn trace(&self) -> T {
        (0..N).fold(T::zero(), |acc, i| acc.plus(self.get(i, i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::kind;

    #[test]
    fn test_same_kind_flat_path() {
        let a = Mat::<i32, 3, 3, kind::Sym>::from_slice(&[1, 2, 3, 4, 5, 6]).unwrap();
        let b = Mat::<i32, 3, 3, kind::Sym>::filled(1);
        let mut out = Mat::<i32, 3, 3, kind::Sym>::zeros();
        out.add(&a, &b);
        assert_eq!(out.as_slice(), &[2, 3, 4, 5, 6, 7]);
        out.sub(&a, &b);
        assert_eq!(out.as_slice(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_mixed_kinds_into_normal() {
        let upper = Mat::<i32, 2, 2, kind::Upper>::from_slice(&[1, 2, 3]).unwrap();
        let lower = Mat::<i32, 2, 2, kind::Lower>::from_slice(&[10, 20, 30]).unwrap();
        let mut out = Mat::<i32, 2, 2>::zeros();
        out.add(&upper, &lower);
        assert_eq!(out.as_slice(), &[11, 2, 20, 33]);
    }

    #[test]
    fn test_hints_do_not_change_sums() {
        let a = Mat::<i32, 4, 4>::from_slice(&(0..16).collect::<Vec<_>>()).unwrap();
        let b = Mat::<i32, 4, 4>::filled(3);
        let mut reference = Mat::<i32, 4, 4>::zeros();
        reference.add(&a, &b);
        for unroll in [1, 2, 5, 16, 64] {
            let mut out = Mat::<i32, 4, 4>::zeros();
            out.add_with(&a, &b, &SynthHints::new().with_add_unroll(unroll));
            assert_eq!(out.as_slice(), reference.as_slice());
        }
    }

    #[test]
    fn test_emul() {
        let a = Mat::<i32, 2, 2, kind::Diagonal>::from_slice(&[2, 3]).unwrap();
        let mut out = Mat::<i32, 2, 2, kind::Diagonal>::zeros();
        out.emul(&a, &a);
        assert_eq!(out.as_slice(), &[4, 9]);
    }

    #[test]
    fn test_accumulate_and_scale() {
        let mut a = Mat::<i32, 2, 2, kind::Lower>::from_slice(&[1, 2, 3]).unwrap();
        let d = Mat::<i32, 2, 2, kind::Scalar>::filled(10);
        a.add_assign_from(&d);
        assert_eq!(a.as_slice(), &[11, 2, 13]);
        a.sub_assign_from(&d);
        assert_eq!(a.scale(2).as_slice(), &[2, 4, 6]);
        assert_eq!(a.negated().as_slice(), &[-1, -2, -3]);
        assert_eq!(a.sum(), 6);
        assert_eq!(a.trace(), 4);
    }

    #[test]
    fn test_div_scalar_and_diff() {
        let a = Mat::<f64, 2, 2>::from_slice(&[2.0, 4.0, 6.0, 8.0]).unwrap();
        let half = a.div_scalar(2.0);
        assert_eq!(half.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(a.max_abs_diff(&half), 4.0);
    }

    #[test]
    fn test_asym_sum_counts_both_halves() {
        let a = Mat::<i32, 3, 3, kind::ASym>::from_slice(&[1, 2, 3]).unwrap();
        assert_eq!(a.sum(), 0);
    }
}
