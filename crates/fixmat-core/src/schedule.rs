//! Static multiplication schedules
//!
//! A schedule is the flattened list of every structurally non-zero
//! `(result cell, contraction index)` pair of a square product, expressed
//! directly as compact offsets into the two operands and the result. Walking
//! it needs no triangular-number arithmetic at run time, which is the access
//! pattern a spatial datapath wants.
//!
//! Schedules are produced by [`Schedule::build`] during constant evaluation
//! and instantiated once per `(lhs kind, rhs kind, result kind, n)` through
//! [`ScheduleFor`]. Operands that are dense (`Normal`) or whose every cell is
//! populated (`Sym`) gain nothing from a schedule and go through the GEMM walk
//! instead.

use std::marker::PhantomData;

use crate::layout::{cell, coords, Cell};
use crate::structure::{MatType, Structure};

/// Largest square dimension with a static schedule
pub const MAX_SCHEDULE_DIM: usize = 8;

/// Capacity of a schedule
pub const MAX_STEPS: usize = 512;

/// One multiply-accumulate of a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Compact offset in the result
    pub out: u8,
    /// Compact offset in the left operand
    pub lhs: u8,
    /// Compact offset in the right operand
    pub rhs: u8,
    /// Combination of the `Step::*` flag bits
    pub flags: u8,
}

impl Step {
    /// First term of its result cell: overwrite instead of accumulate
    pub const INIT: u8 = 1;
    /// Result cell without any term: write zero
    pub const ZERO: u8 = 2;
    /// Left operand read from its negated half
    pub const NEG_LHS: u8 = 4;
    /// Right operand read from its negated half
    pub const NEG_RHS: u8 = 8;

    const EMPTY: Step = Step {
        out: 0,
        lhs: 0,
        rhs: 0,
        flags: 0,
    };

    /// Test a flag bit
    #[inline]
    pub const fn has(self, flag: u8) -> bool {
        self.flags & flag != 0
    }
}

/// Flattened multiplication schedule
#[derive(Debug, Clone, Copy)]
pub struct Schedule {
    steps: [Step; MAX_STEPS],
    len: usize,
    available: bool,
}

impl Schedule {
    const UNAVAILABLE: Schedule = Schedule {
        steps: [Step::EMPTY; MAX_STEPS],
        len: 0,
        available: false,
    };

    /// Whether `lhs * rhs` of dimension `n` is scheduled rather than walked as GEMM
    pub const fn supports(lhs: MatType, rhs: MatType, n: usize) -> bool {
        n >= 1
            && n <= MAX_SCHEDULE_DIM
            && !matches!(lhs, MatType::Normal | MatType::Sym)
            && !matches!(rhs, MatType::Normal | MatType::Sym)
    }

    /// Build the schedule of an `n x n` product written into an `out` domain
    ///
    /// The result domain is walked in canonical compact order and, within a
    /// cell, contraction indices ascend. Cells without any non-zero term get a
    /// single `ZERO` step so that stale values are cleared.
    pub const fn build(lhs: MatType, rhs: MatType, out: MatType, n: usize) -> Schedule {
        let mut schedule = Schedule::UNAVAILABLE;
        if !Schedule::supports(lhs, rhs, n) {
            return schedule;
        }

        let size = out.compact_size(n, n);
        let mut index = 0;
        while index < size {
            let (r, c) = coords(out, n, n, index);
            let mut first = true;
            let mut k = 0;
            while k < n {
                let a = cell(lhs, n, n, r, k);
                let b = cell(rhs, n, n, k, c);
                if let (Some(i), Some(j)) = (a.slot(), b.slot()) {
                    let mut flags = if first { Step::INIT } else { 0 };
                    if matches!(a, Cell::Negated(_)) {
                        flags |= Step::NEG_LHS;
                    }
                    if matches!(b, Cell::Negated(_)) {
                        flags |= Step::NEG_RHS;
                    }
                    assert!(schedule.len < MAX_STEPS, "multiplication schedule overflow");
                    schedule.steps[schedule.len] = Step {
                        out: index as u8,
                        lhs: i as u8,
                        rhs: j as u8,
                        flags,
                    };
                    schedule.len += 1;
                    first = false;
                }
                k += 1;
            }
            if first {
                assert!(schedule.len < MAX_STEPS, "multiplication schedule overflow");
                schedule.steps[schedule.len] = Step {
                    out: index as u8,
                    lhs: 0,
                    rhs: 0,
                    flags: Step::ZERO,
                };
                schedule.len += 1;
            }
            index += 1;
        }

        schedule.available = true;
        schedule
    }

    /// Whether the schedule exists for its operand kinds
    pub const fn is_available(&self) -> bool {
        self.available
    }

    /// Number of steps
    pub const fn len(&self) -> usize {
        self.len
    }

    /// `true` when there are no steps
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The steps in execution order
    pub fn steps(&self) -> &[Step] {
        &self.steps[..self.len]
    }
}

/// Per-instantiation schedule constant
pub struct ScheduleFor<L, R, O, const N: usize>(PhantomData<(L, R, O)>);

impl<L: Structure, R: Structure, O: Structure, const N: usize> ScheduleFor<L, R, O, N> {
    /// The schedule of `L * R` written into an `O` domain of dimension `N`
    pub const SCHEDULE: Schedule = Schedule::build(L::KIND, R::KIND, O::KIND, N);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::kind;

    #[test]
    fn test_upper_times_upper() {
        let schedule = Schedule::build(MatType::Upper, MatType::Upper, MatType::Upper, 4);
        assert!(schedule.is_available());
        // (c - r + 1) terms for every r <= c
        assert_eq!(schedule.len(), 20);
        let inits = schedule.steps().iter().filter(|s| s.has(Step::INIT)).count();
        assert_eq!(inits, 10);
        assert!(schedule.steps().iter().all(|s| !s.has(Step::ZERO)));
    }

    #[test]
    fn test_diagonal_times_diagonal() {
        let schedule = Schedule::build(MatType::Diagonal, MatType::Diagonal, MatType::Diagonal, 5);
        let expected: Vec<_> = (0..5u8)
            .map(|i| Step {
                out: i,
                lhs: i,
                rhs: i,
                flags: Step::INIT,
            })
            .collect();
        assert_eq!(schedule.steps(), expected.as_slice());
    }

    #[test]
    fn test_strict_product_zeroes_border() {
        let schedule = Schedule::build(MatType::SUpper, MatType::SUpper, MatType::SUpper, 3);
        // only (0, 2) receives a term, through k = 1
        assert_eq!(schedule.len(), 3);
        let zeroed: Vec<_> = schedule
            .steps()
            .iter()
            .filter(|s| s.has(Step::ZERO))
            .map(|s| s.out)
            .collect();
        assert_eq!(zeroed, vec![0, 2]);
    }

    #[test]
    fn test_antisymmetric_flags() {
        let schedule = Schedule::build(MatType::ASym, MatType::ASym, MatType::Normal, 2);
        // cell (0, 0) = a(0,1) * a(1,0) = a01 * -a01
        let first = schedule.steps()[0];
        assert_eq!(first.out, 0);
        assert!(first.has(Step::INIT));
        assert!(first.has(Step::NEG_RHS));
        assert!(!first.has(Step::NEG_LHS));
        // off-diagonal cells only meet the zero diagonal
        assert!(schedule.steps()[1].has(Step::ZERO));
    }

    #[test]
    fn test_dense_operands_are_unscheduled() {
        assert!(!Schedule::build(MatType::Normal, MatType::Upper, MatType::Normal, 4).is_available());
        assert!(!Schedule::build(MatType::Upper, MatType::Sym, MatType::Normal, 4).is_available());
        assert!(!Schedule::build(MatType::Upper, MatType::Upper, MatType::Upper, 9).is_available());
    }

    #[test]
    fn test_associated_constant() {
        let schedule = ScheduleFor::<kind::Scalar, kind::Lower, kind::Lower, 3>::SCHEDULE;
        assert!(schedule.is_available());
        assert_eq!(schedule.len(), 6);
        assert!(schedule.steps().iter().all(|s| s.lhs == 0));
    }
}
