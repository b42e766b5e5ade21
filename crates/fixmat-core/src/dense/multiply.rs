//! Matrix multiplication
//!
//! A product is computed over the compact domain of the destination. Two
//! strategies produce bit-identical results for finite operands:
//!
//! - **Scheduled**: square products of up to
//!   [`MAX_SCHEDULE_DIM`](crate::schedule::MAX_SCHEDULE_DIM) whose
//!   operands are both sparse structural types walk the static
//!   [`Schedule`](crate::schedule::Schedule), touching only structurally
//!   non-zero terms.
//! - **GEMM**: everything else runs the triple loop, initializing each
//!   accumulator with its first partial product.
//!
//! Skipped terms are exact zero products, so both strategies accumulate the
//! same non-zero terms in the same order. Floating-point operands holding an
//! infinity or NaN are the exception: GEMM evaluates `inf * 0 = NaN` for a
//! structural zero that the schedule never reads. For `bool` elements
//! accumulation is OR-of-AND.

use super::types::{Mat, MatRead};
use crate::element::Element;
use crate::hints::{HintOp, SynthHints};
use crate::layout::Cells;
use crate::schedule::{Schedule, ScheduleFor, Step};
use crate::structure::{Compact, Structure};

impl<T: Element, const R: usize, const C: usize, S: Compact<R, C>> Mat<T, R, C, S> {
    /// Store `lhs * rhs`, restricted to this matrix's structural type
    ///
    /// Cells outside the destination's domain are not computed; when the
    /// destination kind is the product kind given by
    /// [`MulWith`](crate::MulWith) nothing is lost.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixmat_core::{kind, Mat};
    ///
    /// let d = Mat::<i32, 4, 4, kind::Diagonal>::from_slice(&[2, 3, 4, 5]).unwrap();
    /// let mut out = Mat::<i32, 4, 4, kind::Diagonal>::zeros();
    /// out.mul(&d, &d);
    /// assert_eq!(out.as_slice(), &[4, 9, 16, 25]);
    /// ```
    pub fn mul<const K: usize, A, B>(&mut self, lhs: &A, rhs: &B) -> &mut Self
    where
        A: MatRead<T, R, K>,
        B: MatRead<T, K, C>,
    {
        self.mul_with(lhs, rhs, &SynthHints::default())
    }

    /// [`Mat::mul`] with explicit synthesis hints
    pub fn mul_with<const K: usize, A, B>(&mut self, lhs: &A, rhs: &B, hints: &SynthHints) -> &mut Self
    where
        A: MatRead<T, R, K>,
        B: MatRead<T, K, C>,
    {
        let lhs_kind = <A::Kind as Structure>::KIND;
        let rhs_kind = <B::Kind as Structure>::KIND;
        if R == K && K == C && Schedule::supports(lhs_kind, rhs_kind, R) {
            log::trace!("mul: scheduled {} x {} into {} ({}x{})", lhs_kind, rhs_kind, S::KIND, R, C);
            let schedule = ScheduleFor::<A::Kind, B::Kind, S, R>::SCHEDULE;
            self.run_schedule(&schedule, lhs, rhs);
        } else {
            log::trace!("mul: gemm {} x {} into {} ({}x{}x{})", lhs_kind, rhs_kind, S::KIND, R, K, C);
            self.gemm(lhs, rhs, hints.unroll(HintOp::Mul));
        }
        self
    }

    fn run_schedule<const K: usize, A, B>(&mut self, schedule: &Schedule, lhs: &A, rhs: &B)
    where
        A: MatRead<T, R, K>,
        B: MatRead<T, K, C>,
    {
        let out = self.as_mut_slice();
        for step in schedule.steps() {
            let o = step.out as usize;
            if step.has(Step::ZERO) {
                out[o] = T::zero();
                continue;
            }
            let mut a = lhs.at(step.lhs as usize);
            if step.has(Step::NEG_LHS) {
                a = a.negate();
            }
            let mut b = rhs.at(step.rhs as usize);
            if step.has(Step::NEG_RHS) {
                b = b.negate();
            }
            let term = a.times(b);
            out[o] = if step.has(Step::INIT) { term } else { out[o].plus(term) };
        }
    }

    fn gemm<const K: usize, A, B>(&mut self, lhs: &A, rhs: &B, unroll: usize)
    where
        A: MatRead<T, R, K>,
        B: MatRead<T, K, C>,
    {
        let out = self.as_mut_slice();
        for (i, r, c) in Cells::new(S::KIND, R, C) {
            let mut acc = T::zero();
            for base in (0..K).step_by(unroll) {
                for k in base..(base + unroll).min(K) {
                    let term = lhs.get(r, k).times(rhs.get(k, c));
                    acc = if k == 0 { term } else { acc.plus(term) };
                }
            }
            out[i] = acc;
        }
    }
}
