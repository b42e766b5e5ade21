//! Approximate inversion
//!
//! [`Mat::inv_nsa`] implements the Newton-Schulz style series for a matrix
//! split as `A = D + E` into its diagonal `D` and off-diagonal part `E`:
//!
//! ```text
//! P     = -D^-1 E
//! A^-1 ~= (P + P^2 + ... + P^iter) D^-1 + D^-1
//! ```
//!
//! The series converges when the spectral radius of `D^-1 E` is below one,
//! which holds for strictly diagonally dominant matrices. It is an
//! approximation meant for a handful of iterations in fixed point, not a
//! general solver.

use log::{debug, log_enabled, warn, Level};

use super::types::Mat;
use crate::element::FieldElement;
use crate::error::{MatError, MatResult};
use crate::structure::{kind, Compact};

/// Iteration count used by [`Mat::inverse`]
pub const DEFAULT_NSA_ITERATIONS: usize = 4;

impl<T: FieldElement, const N: usize, S: Compact<N, N>> Mat<T, N, N, S> {
    /// Elementwise reciprocal of the diagonal
    ///
    /// # Errors
    ///
    /// `SingularDiagonal` if a diagonal element is zero.
    pub fn inv_diag(&self) -> MatResult<Mat<T, N, N, kind::Diagonal>> {
        let mut out = Mat::zeros();
        for i in 0..N {
            let d = self.get(i, i);
            if d.is_zero() {
                return Err(MatError::SingularDiagonal { index: i });
            }
            out.as_mut_slice()[i] = d.recip();
        }
        Ok(out)
    }

    /// Approximate inverse by `iter` Newton-Schulz iterations
    ///
    /// # Arguments
    ///
    /// * `iter` - Number of series terms, at least one
    ///
    /// # Errors
    ///
    /// `InvalidIterations` when `iter == 0`, `SingularDiagonal` when the
    /// diagonal has a zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixmat_core::Mat;
    ///
    /// let a = Mat::<f64, 2, 2>::from_slice(&[4.0, 1.0, 1.0, 4.0]).unwrap();
    /// let inv = a.inv_nsa(8).unwrap();
    /// let mut check = Mat::<f64, 2, 2>::zeros();
    /// check.mul(&a, &inv);
    /// assert!(check.max_abs_diff(&Mat::<f64, 2, 2>::identity()) < 1e-4);
    /// ```
    pub fn inv_nsa(&self, iter: usize) -> MatResult<Mat<T, N, N>> {
        if iter == 0 {
            return Err(MatError::InvalidIterations(iter));
        }
        let d_inv = self.inv_diag()?;
        let off = self.off_diag_();

        let mut product = Mat::<T, N, N>::zeros();
        product.mul(&d_inv.opp_(), &off);

        let mut term = product;
        let mut sum = product;
        let mut next = Mat::<T, N, N>::zeros();
        for step in 1..iter {
            next.mul(&term, &product);
            term = next;
            sum.add_assign_from(&term);
            if log_enabled!(Level::Debug) {
                let largest = term.as_slice().iter().fold(0.0f64, |m, v| m.max(v.to_f64().abs()));
                debug!("inv_nsa: iteration {}/{}, largest series term {:e}", step + 1, iter, largest);
            }
        }

        let mut out = Mat::<T, N, N>::zeros();
        out.mul(&sum, &d_inv).add_assign_from(&d_inv);
        Ok(out)
    }

    /// Approximate inverse with [`DEFAULT_NSA_ITERATIONS`]
    pub fn inverse(&self) -> MatResult<Mat<T, N, N>> {
        self.inv_nsa(DEFAULT_NSA_ITERATIONS)
    }

    /// Improved Newton-Schulz inversion
    ///
    /// Only the entry point exists; no numeric behavior is defined for it.
    ///
    /// # Errors
    ///
    /// Always returns `Unsupported`.
    pub fn inv_insa(&self, iter: usize) -> MatResult<Mat<T, N, N>> {
        warn!("inv_insa called with {} iterations but is not implemented", iter);
        Err(MatError::unsupported("improved Newton-Schulz inversion (inv_insa)"))
    }
}

impl<T: FieldElement, const N: usize> Mat<T, N, N> {
    /// Store the approximate inverse of `src`
    ///
    /// On error `self` is left unchanged.
    pub fn inv_nsa_from<S: Compact<N, N>>(&mut self, src: &Mat<T, N, N, S>, iter: usize) -> MatResult<&mut Self> {
        *self = src.inv_nsa(iter)?;
        Ok(self)
    }
}
