//! Output-stationary systolic array multiplication
//!
//! An `R x C` grid of processing elements computes `lhs * rhs`. Row `r` of
//! the left operand enters the grid from the west, delayed by `r` cycles; column
//! `c` of the right operand enters from the north, delayed by `c` cycles. Every
//! cycle each value moves one element east or south, and each element that
//! holds a pair multiplies it into its own accumulator. Element `(r, c)` sees
//! `lhs(r, k)` and `rhs(k, c)` together at cycle `k + r + c`.
//!
//! The simulation is cycle accurate and accumulates in the same order as
//! [`Mat::mul`], so results are bit-identical to it for finite operands.
//! Like the GEMM path of [`Mat::mul`], the array multiplies structural zeros
//! too, so an infinite float can turn one of them into NaN.

use fixmat_core::{Element, Mat, MatRead};

/// Cycles an `R x C` grid needs to finish a product with inner dimension `K`
///
/// # Examples
///
/// ```
/// use fixmat_kernels::systolic_cycles;
///
/// assert_eq!(systolic_cycles(4, 4, 4), 10);
/// assert_eq!(systolic_cycles(4, 0, 4), 0);
/// ```
pub const fn systolic_cycles(rows: usize, inner: usize, cols: usize) -> usize {
    if rows == 0 || inner == 0 || cols == 0 {
        0
    } else {
        rows + inner + cols - 2
    }
}

/// Multiply `lhs * rhs` on a simulated systolic array
///
/// Operands may be of any structural kind; they are read through their
/// logical cells as the array streams them in. The result is a dense matrix.
///
/// # Complexity
///
/// Time: O((R + K + C) * R * C) register updates
/// Space: three `R x C` register grids, on the stack
///
/// # Examples
///
/// ```
/// use fixmat_core::{kind, Mat};
/// use fixmat_kernels::systolic_mul;
///
/// let a = Mat::<i32, 2, 3>::from_slice(&[1, 2, 3, 4, 5, 6]).unwrap();
/// let b = Mat::<i32, 3, 3, kind::Diagonal>::from_slice(&[1, 10, 100]).unwrap();
/// let c = systolic_mul(&a, &b);
/// assert_eq!(c.as_slice(), &[1, 20, 300, 4, 50, 600]);
/// ```
pub fn systolic_mul<T, const R: usize, const K: usize, const C: usize, A, B>(lhs: &A, rhs: &B) -> Mat<T, R, C>
where
    T: Element,
    A: MatRead<T, R, K>,
    B: MatRead<T, K, C>,
{
    let mut east = [[None::<T>; C]; R];
    let mut south = [[None::<T>; C]; R];
    let mut acc = [[None::<T>; C]; R];

    let cycles = systolic_cycles(R, K, C);
    for cycle in 0..cycles {
        // descending so that each register reads its neighbour's previous value
        for r in (0..R).rev() {
            for c in (0..C).rev() {
                east[r][c] = if c == 0 {
                    feed(cycle, r, K).map(|k| lhs.get(r, k))
                } else {
                    east[r][c - 1]
                };
                south[r][c] = if r == 0 {
                    feed(cycle, c, K).map(|k| rhs.get(k, c))
                } else {
                    south[r - 1][c]
                };
            }
        }

        for r in 0..R {
            for c in 0..C {
                if let (Some(a), Some(b)) = (east[r][c], south[r][c]) {
                    let term = a.times(b);
                    acc[r][c] = Some(match acc[r][c] {
                        Some(sum) => sum.plus(term),
                        None => term,
                    });
                }
            }
        }
    }
    log::trace!("systolic_mul: {}x{}x{} finished in {} cycles", R, K, C, cycles);

    let mut out = Mat::<T, R, C>::zeros();
    for (r, row) in acc.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            out.set(r, c, cell.unwrap_or_else(T::zero));
        }
    }
    out
}

/// Inner index entering lane `lane` at `cycle`, if any
#[inline]
fn feed(cycle: usize, lane: usize, inner: usize) -> Option<usize> {
    cycle.checked_sub(lane).filter(|&k| k < inner)
}
