//! Transposition

use super::types::{Mat, MatRead};
use crate::element::Element;
use crate::layout::Cells;
use crate::structure::{kind, Compact, MatType, Structure};
use crate::view::{TransView, Transposed, View};

impl<T: Element, const R: usize, const C: usize, S: Compact<R, C>> Mat<T, R, C, S> {
    /// Store the transpose of a `C x R` source
    ///
    /// `Diagonal`, `Scalar` and `Sym` destinations copy a same-kind source
    /// as is; an `ASym` destination negates a same-kind source. Otherwise the
    /// destination domain is walked.
    pub fn t_from<A: MatRead<T, C, R>>(&mut self, src: &A) -> &mut Self {
        let same_kind = <A::Kind as Structure>::KIND == S::KIND;
        let out = self.as_mut_slice();
        match S::KIND {
            MatType::Diagonal | MatType::Scalar | MatType::Sym if same_kind => {
                for (i, slot) in out.iter_mut().enumerate() {
                    *slot = src.at(i);
                }
            }
            MatType::ASym if same_kind => {
                for (i, slot) in out.iter_mut().enumerate() {
                    *slot = src.at(i).negate();
                }
            }
            _ => {
                for (i, r, c) in Cells::new(S::KIND, R, C) {
                    out[i] = src.get(c, r);
                }
            }
        }
        self
    }

    /// Transposed copy
    ///
    /// # Examples
    ///
    /// ```
    /// use fixmat_core::{kind, Mat};
    ///
    /// let upper = Mat::<i32, 2, 2, kind::Upper>::from_slice(&[1, 2, 3]).unwrap();
    /// let lower: Mat<i32, 2, 2, kind::Lower> = upper.t();
    /// assert_eq!(lower.get(1, 0), 2);
    /// ```
    pub fn t(&self) -> Mat<T, C, R, S::Transposed> {
        let mut out = Mat::zeros();
        out.t_from(self);
        out
    }

    /// Transposed view without copying
    pub fn t_(&self) -> TransView<'_, T, R, C, S> {
        View::new(self.as_slice(), Transposed::new())
    }
}

impl<T: Element, const N: usize> Mat<T, N, N, kind::Normal> {
    /// Transpose in place
    pub fn t_self(&mut self) -> &mut Self {
        let buf = self.as_mut_slice();
        for r in 0..N {
            for c in (r + 1)..N {
                buf.swap(r * N + c, c * N + r);
            }
        }
        self
    }
}

impl<T: Element, const N: usize> Mat<T, N, N, kind::ASym>
where
    kind::ASym: Compact<N, N>,
{
    /// Transpose in place, which negates the stored half
    pub fn t_self(&mut self) -> &mut Self {
        for slot in self.as_mut_slice() {
            *slot = slot.negate();
        }
        self
    }
}
