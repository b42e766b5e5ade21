//! Operator overloads
//!
//! Binary operators accept owned matrices, borrowed matrices and views on
//! either side and return a fresh [`Mat`]. The result kind comes from the
//! type-level tables: `a + b` and `a - b` produce
//! `<S1 as SumWith<S2>>::Output`, `a * b` produces
//! `<S1 as MulWith<S2>>::Output`, and the Hadamard product `a % b` needs
//! both operands of one kind.
//!
//! ```
//! use fixmat_core::{kind, Mat};
//!
//! let d = Mat::<i32, 2, 2, kind::Diagonal>::from_slice(&[1, 2]).unwrap();
//! let u = Mat::<i32, 2, 2, kind::SUpper>::from_slice(&[3]).unwrap();
//! let sum: Mat<i32, 2, 2, kind::Upper> = d + u;
//! assert_eq!(sum.as_slice(), &[1, 3, 2]);
//!
//! let square: Mat<i32, 2, 2, kind::Diagonal> = &d * &d;
//! assert_eq!(square.as_slice(), &[1, 4]);
//! ```
//!
//! The inherent methods [`Mat::add`], [`Mat::sub`] and [`Mat::mul`] write
//! into an existing destination and share their names with the operator
//! traits. With `std::ops::Add` (or `Sub`, `Mul`) imported, call them by
//! path, e.g. `Mat::add(&mut out, &a, &b)`.

use std::ops::{Add, AddAssign, Mul, Neg, Rem, Sub, SubAssign};

use crate::dense::{Mat, MatRead};
use crate::element::Element;
use crate::structure::{Compact, MulWith, SumWith};
use crate::view::{Mapping, OppView, View};

macro_rules! sum_ops {
    ($([$($gen:tt)*] $lhs:ty, $rhs:ty;)*) => {$(
        impl<$($gen)* T, const R: usize, const C: usize, S1, S2> Add<$rhs> for $lhs
        where
            T: Element,
            S1: SumWith<S2> + Compact<R, C>,
            S2: Compact<R, C>,
            <S1 as SumWith<S2>>::Output: Compact<R, C>,
            $lhs: MatRead<T, R, C, Kind = S1>,
            $rhs: MatRead<T, R, C, Kind = S2>,
        {
            type Output = Mat<T, R, C, <S1 as SumWith<S2>>::Output>;

            fn add(self, rhs: $rhs) -> Self::Output {
                let mut out = Mat::zeros();
                Mat::add(&mut out, &self, &rhs);
                out
            }
        }

        impl<$($gen)* T, const R: usize, const C: usize, S1, S2> Sub<$rhs> for $lhs
        where
            T: Element,
            S1: SumWith<S2> + Compact<R, C>,
            S2: Compact<R, C>,
            <S1 as SumWith<S2>>::Output: Compact<R, C>,
            $lhs: MatRead<T, R, C, Kind = S1>,
            $rhs: MatRead<T, R, C, Kind = S2>,
        {
            type Output = Mat<T, R, C, <S1 as SumWith<S2>>::Output>;

            fn sub(self, rhs: $rhs) -> Self::Output {
                let mut out = Mat::zeros();
                Mat::sub(&mut out, &self, &rhs);
                out
            }
        }
    )*};
}

sum_ops! {
    [] Mat<T, R, C, S1>, Mat<T, R, C, S2>;
    ['b,] Mat<T, R, C, S1>, &'b Mat<T, R, C, S2>;
    ['b, M2,] Mat<T, R, C, S1>, View<'b, T, R, C, S2, M2>;
    ['a,] &'a Mat<T, R, C, S1>, Mat<T, R, C, S2>;
    ['a, 'b,] &'a Mat<T, R, C, S1>, &'b Mat<T, R, C, S2>;
    ['a, 'b, M2,] &'a Mat<T, R, C, S1>, View<'b, T, R, C, S2, M2>;
    ['a, M1,] View<'a, T, R, C, S1, M1>, Mat<T, R, C, S2>;
    ['a, 'b, M1,] View<'a, T, R, C, S1, M1>, &'b Mat<T, R, C, S2>;
    ['a, 'b, M1, M2,] View<'a, T, R, C, S1, M1>, View<'b, T, R, C, S2, M2>;
}

macro_rules! mul_ops {
    ($([$($gen:tt)*] $lhs:ty, $rhs:ty;)*) => {$(
        impl<$($gen)* T, const R: usize, const K: usize, const C: usize, S1, S2> Mul<$rhs> for $lhs
        where
            T: Element,
            S1: MulWith<S2> + Compact<R, K>,
            S2: Compact<K, C>,
            <S1 as MulWith<S2>>::Output: Compact<R, C>,
            $lhs: MatRead<T, R, K, Kind = S1>,
            $rhs: MatRead<T, K, C, Kind = S2>,
        {
            type Output = Mat<T, R, C, <S1 as MulWith<S2>>::Output>;

            fn mul(self, rhs: $rhs) -> Self::Output {
                let mut out = Mat::zeros();
                Mat::mul::<K, _, _>(&mut out, &self, &rhs);
                out
            }
        }
    )*};
}

mul_ops! {
    [] Mat<T, R, K, S1>, Mat<T, K, C, S2>;
    ['b,] Mat<T, R, K, S1>, &'b Mat<T, K, C, S2>;
    ['b, M2,] Mat<T, R, K, S1>, View<'b, T, K, C, S2, M2>;
    ['a,] &'a Mat<T, R, K, S1>, Mat<T, K, C, S2>;
    ['a, 'b,] &'a Mat<T, R, K, S1>, &'b Mat<T, K, C, S2>;
    ['a, 'b, M2,] &'a Mat<T, R, K, S1>, View<'b, T, K, C, S2, M2>;
    ['a, M1,] View<'a, T, R, K, S1, M1>, Mat<T, K, C, S2>;
    ['a, 'b, M1,] View<'a, T, R, K, S1, M1>, &'b Mat<T, K, C, S2>;
    ['a, 'b, M1, M2,] View<'a, T, R, K, S1, M1>, View<'b, T, K, C, S2, M2>;
}

macro_rules! hadamard_ops {
    ($([$($gen:tt)*] $lhs:ty, $rhs:ty;)*) => {$(
        impl<$($gen)* T, const R: usize, const C: usize, S> Rem<$rhs> for $lhs
        where
            T: Element,
            S: Compact<R, C>,
            $lhs: MatRead<T, R, C, Kind = S>,
            $rhs: MatRead<T, R, C, Kind = S>,
        {
            type Output = Mat<T, R, C, S>;

            fn rem(self, rhs: $rhs) -> Self::Output {
                let mut out = Mat::zeros();
                out.emul(&self, &rhs);
                out
            }
        }
    )*};
}

hadamard_ops! {
    [] Mat<T, R, C, S>, Mat<T, R, C, S>;
    ['b,] Mat<T, R, C, S>, &'b Mat<T, R, C, S>;
    ['b, M2,] Mat<T, R, C, S>, View<'b, T, R, C, S, M2>;
    ['a,] &'a Mat<T, R, C, S>, Mat<T, R, C, S>;
    ['a, 'b, M2,] &'a Mat<T, R, C, S>, View<'b, T, R, C, S, M2>;
    ['a, M1,] View<'a, T, R, C, S, M1>, Mat<T, R, C, S>;
    ['a, 'b, M1,] View<'a, T, R, C, S, M1>, &'b Mat<T, R, C, S>;
    ['a, 'b, M1, M2,] View<'a, T, R, C, S, M1>, View<'b, T, R, C, S, M2>;
}

// Written out by hand: the macro's `MatRead` bounds on two references that
// differ only in lifetime are ambiguous to the trait solver. Both bounds are
// implied by `S: Compact<R, C>` through the blanket `&X` impl.
impl<'a, 'b, T, const R: usize, const C: usize, S> Rem<&'b Mat<T, R, C, S>> for &'a Mat<T, R, C, S>
where
    T: Element,
    S: Compact<R, C>,
{
    type Output = Mat<T, R, C, S>;

    fn rem(self, rhs: &'b Mat<T, R, C, S>) -> Self::Output {
        let mut out = Mat::zeros();
        out.emul(&self, &rhs);
        out
    }
}

macro_rules! assign_ops {
    ($([$($gen:tt)*] $rhs:ty;)*) => {$(
        impl<$($gen)* T, const R: usize, const C: usize, S1, S2> AddAssign<$rhs> for Mat<T, R, C, S1>
        where
            T: Element,
            S1: SumWith<S2, Output = S1> + Compact<R, C>,
            S2: Compact<R, C>,
            $rhs: MatRead<T, R, C, Kind = S2>,
        {
            fn add_assign(&mut self, rhs: $rhs) {
                self.add_assign_from(&rhs);
            }
        }

        impl<$($gen)* T, const R: usize, const C: usize, S1, S2> SubAssign<$rhs> for Mat<T, R, C, S1>
        where
            T: Element,
            S1: SumWith<S2, Output = S1> + Compact<R, C>,
            S2: Compact<R, C>,
            $rhs: MatRead<T, R, C, Kind = S2>,
        {
            fn sub_assign(&mut self, rhs: $rhs) {
                self.sub_assign_from(&rhs);
            }
        }
    )*};
}

assign_ops! {
    [] Mat<T, R, C, S2>;
    ['b,] &'b Mat<T, R, C, S2>;
    ['b, M2,] View<'b, T, R, C, S2, M2>;
}

impl<T: Element, const R: usize, const C: usize, S: Compact<R, C>> Neg for Mat<T, R, C, S> {
    type Output = Self;

    fn neg(self) -> Self {
        self.negated()
    }
}

/// Negating a borrowed matrix does not copy
impl<'a, T: Element, const R: usize, const C: usize, S: Compact<R, C>> Neg for &'a Mat<T, R, C, S> {
    type Output = OppView<'a, T, R, C, S>;

    fn neg(self) -> Self::Output {
        self.opp_()
    }
}

impl<'a, T: Element, const R: usize, const C: usize, S: Compact<R, C>, M: Mapping<T>> Neg for View<'a, T, R, C, S, M> {
    type Output = Mat<T, R, C, S>;

    fn neg(self) -> Self::Output {
        self.as_mat().negated()
    }
}

fn logical_eq<T, const R: usize, const C: usize, A, B>(lhs: &A, rhs: &B) -> bool
where
    T: Element,
    A: MatRead<T, R, C>,
    B: MatRead<T, R, C>,
{
    (0..R).all(|r| (0..C).all(|c| lhs.get(r, c) == rhs.get(r, c)))
}

/// Equality of logical cells, across structural types
impl<T: Element, const R: usize, const C: usize, S1: Compact<R, C>, S2: Compact<R, C>> PartialEq<Mat<T, R, C, S2>>
    for Mat<T, R, C, S1>
{
    fn eq(&self, other: &Mat<T, R, C, S2>) -> bool {
        logical_eq::<T, R, C, _, _>(self, other)
    }
}

impl<'b, T, const R: usize, const C: usize, S1, S2, M> PartialEq<View<'b, T, R, C, S2, M>> for Mat<T, R, C, S1>
where
    T: Element,
    S1: Compact<R, C>,
    S2: Compact<R, C>,
    M: Mapping<T>,
{
    fn eq(&self, other: &View<'b, T, R, C, S2, M>) -> bool {
        logical_eq::<T, R, C, _, _>(self, other)
    }
}

impl<'a, T, const R: usize, const C: usize, S1, S2, M> PartialEq<Mat<T, R, C, S2>> for View<'a, T, R, C, S1, M>
where
    T: Element,
    S1: Compact<R, C>,
    S2: Compact<R, C>,
    M: Mapping<T>,
{
    fn eq(&self, other: &Mat<T, R, C, S2>) -> bool {
        logical_eq::<T, R, C, _, _>(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::kind;

    fn upper() -> Mat<i32, 3, 3, kind::Upper> {
        Mat::from_slice(&[1, 2, 3, 4, 5, 6]).unwrap()
    }

    #[test]
    fn test_vector_sum() {
        let a = Mat::<i32, 2, 1>::from_slice(&[2, 3]).unwrap();
        let b = Mat::<i32, 2, 1>::from_slice(&[5, 6]).unwrap();
        assert_eq!((a + b).as_slice(), &[7, 9]);
        assert_eq!((&a - &b).as_slice(), &[-3, -3]);
    }

    #[test]
    fn test_result_kinds() {
        let u = upper();
        let l = u.t();
        let d = u.diag_mat();
        let sum_ul: Mat<i32, 3, 3> = u + l;
        assert_eq!(sum_ul.get(2, 0), 3);
        let sum_ud: Mat<i32, 3, 3, kind::Upper> = &u + &d;
        assert_eq!(sum_ud.as_slice(), &[2, 2, 3, 8, 5, 12]);
        let prod: Mat<i32, 3, 3, kind::Upper> = &u * &u;
        let mut reference = Mat::<i32, 3, 3>::zeros();
        Mat::mul(&mut reference, &Mat::<i32, 3, 3>::from_read(&u), &u);
        assert_eq!(prod, reference);
        let dl: Mat<i32, 3, 3, kind::Lower> = d * l;
        assert_eq!(dl.get(2, 0), 18);
    }

    #[test]
    fn test_view_operands() {
        let u = upper();
        let doubled = u.view() + u.view();
        assert_eq!(doubled.as_slice(), &[2, 4, 6, 8, 10, 12]);
        let zero = &u + -&u;
        assert!(zero.as_slice().iter().all(|&v| v == 0));
        let col = u.col_(2) % u.col_(2);
        assert_eq!(col.as_slice(), &[9, 25, 36]);
        let row_times_col: Mat<i32, 1, 1> = u.row_(0) * u.col_(2);
        assert_eq!(row_times_col.as_slice(), &[1 * 3 + 2 * 5 + 3 * 6]);
    }

    #[test]
    fn test_assign_ops() {
        let mut u = upper();
        let d = Mat::<i32, 3, 3, kind::Scalar>::filled(10);
        u += d;
        assert_eq!(u.as_slice(), &[11, 2, 3, 14, 5, 16]);
        u -= &d;
        assert_eq!(u, upper());
        u -= upper().view();
        assert!(u.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_negation() {
        let u = upper();
        let owned = -u;
        let borrowed = -&u;
        assert_eq!(owned, borrowed);
        assert_eq!(-u.t_(), owned.t());
    }

    #[test]
    fn test_equality_across_kinds() {
        let d = Mat::<i32, 2, 2, kind::Diagonal>::from_slice(&[3, 3]).unwrap();
        let s = Mat::<i32, 2, 2, kind::Scalar>::filled(3);
        let n = Mat::<i32, 2, 2>::from_slice(&[3, 0, 0, 3]).unwrap();
        assert_eq!(d, s);
        assert_eq!(s, n);
        assert_eq!(n.view(), d);
        assert_ne!(n, Mat::<i32, 2, 2>::filled(3));
    }
}
