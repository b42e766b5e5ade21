//! Structural matrix types and their type algebra
//!
//! A structural type describes which logical cells of a matrix are stored
//! independently. It exists twice:
//!
//! - as the runtime/`const` value [`MatType`], which drives the index
//!   arithmetic in [`crate::layout`] and the multiplication schedules, and
//! - as a zero-sized marker in [`kind`] implementing [`Structure`], which is
//!   what [`crate::Mat`] carries as a type parameter so that result types of
//!   `+` and `*` are known at compile time.
//!
//! | Kind | Stored cells | Compact size |
//! |------|--------------|--------------|
//! | `Normal` | all, row-major | `r * c` |
//! | `Diagonal` | diagonal | `n` |
//! | `Scalar` | one value on the diagonal | `1` |
//! | `Upper`, `Lower` | triangle incl. diagonal | `n(n+1)/2` |
//! | `SUpper`, `SLower` | strict triangle | `n(n-1)/2` |
//! | `Sym` | upper triangle, mirrored below | `n(n+1)/2` |
//! | `ASym` | strict upper triangle, negated below | `n(n-1)/2` |
//!
//! [`Compact`] ties a marker to an `R x C` shape and names its inline
//! buffer, which holds exactly the compact size.
//!
//! The type-level tables ([`SumWith`], [`MulWith`]) and the `const fn` tables
//! ([`MatType::sum_type`], [`MatType::mul_type`]) are kept in agreement by the
//! integration tests.

use std::fmt;
use std::str::FromStr;

use crate::error::{MatError, MatResult};

/// Structural type of a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MatType {
    /// Dense, possibly rectangular
    Normal,
    /// Only the diagonal is stored
    Diagonal,
    /// One value repeated along the diagonal
    Scalar,
    /// Upper triangle including the diagonal
    Upper,
    /// Lower triangle including the diagonal
    Lower,
    /// Strict upper triangle
    SUpper,
    /// Strict lower triangle
    SLower,
    /// Symmetric: upper triangle stored, lower mirrored
    Sym,
    /// Antisymmetric: strict upper stored, lower negated, diagonal zero
    ASym,
}

impl MatType {
    /// All nine structural types, in declaration order
    pub const ALL: [MatType; 9] = [
        MatType::Normal,
        MatType::Diagonal,
        MatType::Scalar,
        MatType::Upper,
        MatType::Lower,
        MatType::SUpper,
        MatType::SLower,
        MatType::Sym,
        MatType::ASym,
    ];

    /// Number of physically stored elements
    pub const fn compact_size(self, rows: usize, cols: usize) -> usize {
        match self {
            MatType::Normal => rows * cols,
            MatType::Diagonal => rows,
            MatType::Scalar => 1,
            MatType::Upper | MatType::Lower | MatType::Sym => rows * (rows + 1) / 2,
            MatType::SUpper | MatType::SLower | MatType::ASym => rows * rows.saturating_sub(1) / 2,
        }
    }

    /// Whether the type is only defined for square shapes
    pub const fn requires_square(self) -> bool {
        !matches!(self, MatType::Normal)
    }

    /// Whether a `rows x cols` matrix may have this type
    pub const fn allows_shape(self, rows: usize, cols: usize) -> bool {
        !self.requires_square() || rows == cols
    }

    /// `const` equality
    pub const fn is(self, other: MatType) -> bool {
        self as u8 == other as u8
    }

    /// Structural type of `self + rhs`
    pub const fn sum_type(self, rhs: MatType) -> MatType {
        use MatType::*;
        if self.is(rhs) {
            return self;
        }
        match (self, rhs) {
            (Diagonal, Scalar) | (Scalar, Diagonal) => Diagonal,
            (Diagonal | Scalar, Upper | SUpper) | (Upper | SUpper, Diagonal | Scalar) => Upper,
            (Diagonal | Scalar, Lower | SLower) | (Lower | SLower, Diagonal | Scalar) => Lower,
            (Diagonal | Scalar, Sym) | (Sym, Diagonal | Scalar) => Sym,
            (Upper, SUpper) | (SUpper, Upper) => Upper,
            (Lower, SLower) | (SLower, Lower) => Lower,
            _ => Normal,
        }
    }

    /// Structural type of `self * rhs` for a `rows x comm` by `comm x cols` product
    pub const fn mul_type(self, rhs: MatType, rows: usize, comm: usize, cols: usize) -> MatType {
        use MatType::*;
        if rows != comm || comm != cols {
            return Normal;
        }
        match (self, rhs) {
            (Scalar, other) => other,
            (other, Scalar) => other,
            (Diagonal, Diagonal | Upper | Lower | SUpper | SLower) => rhs,
            (Upper | Lower | SUpper | SLower, Diagonal) => self,
            (Upper, Upper) => Upper,
            (Upper | SUpper, Upper | SUpper) => SUpper,
            (Lower, Lower) => Lower,
            (Lower | SLower, Lower | SLower) => SLower,
            _ => Normal,
        }
    }

    /// Structural type of the transpose
    pub const fn transpose_type(self) -> MatType {
        match self {
            MatType::Upper => MatType::Lower,
            MatType::Lower => MatType::Upper,
            MatType::SUpper => MatType::SLower,
            MatType::SLower => MatType::SUpper,
            other => other,
        }
    }

    /// Structural type of the off-diagonal part
    pub const fn off_diag_type(self) -> MatType {
        match self {
            MatType::Upper => MatType::SUpper,
            MatType::Lower => MatType::SLower,
            other => other,
        }
    }

    /// Name used by the text format
    pub const fn name(self) -> &'static str {
        match self {
            MatType::Normal => "normal",
            MatType::Diagonal => "diagonal",
            MatType::Scalar => "scalar",
            MatType::Upper => "upper",
            MatType::Lower => "lower",
            MatType::SUpper => "supper",
            MatType::SLower => "slower",
            MatType::Sym => "sym",
            MatType::ASym => "asym",
        }
    }
}

impl fmt::Display for MatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MatType {
    type Err = MatError;

    fn from_str(s: &str) -> MatResult<Self> {
        MatType::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| MatError::parse("matrix type", format!("unknown type name `{}`", s)))
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Type-level structural type carried by [`crate::Mat`] and the views
pub trait Structure: sealed::Sealed + Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// The runtime tag
    const KIND: MatType;
}

/// Storage of a structural type at one `R x C` shape
///
/// `Buf<T>` holds exactly `Self::KIND.compact_size(R, C)` elements, so a
/// `Mat<f64, 8, 8, kind::Diagonal>` occupies 8 floats and a `Scalar` one.
/// `Normal` is implemented for every shape; `Diagonal` and `Scalar` for
/// every square shape; the triangular, symmetric and antisymmetric kinds
/// for square shapes up to [`MAX_TRIANGULAR_DIM`].
pub trait Compact<const R: usize, const C: usize>: Structure {
    /// Inline compact buffer
    type Buf<T: Copy>: Buffer<T>;
    /// Kind of the transpose
    type Transposed: Compact<C, R>;
    /// Kind of the off-diagonal part
    type OffDiag: Compact<R, C>;
}

/// Largest `n` with an `n x n` buffer for the triangular kinds
pub const MAX_TRIANGULAR_DIM: usize = 32;

/// Inline array backing a [`Compact`] kind
///
/// Every buffer is a `[[T; W]; H]`: `Normal` uses its own `R x C` shape and
/// the other kinds a single row of their compact length.
pub trait Buffer<T>: Copy {
    /// Buffer with every slot set to `value`
    fn splat(value: T) -> Self;
    /// Slots in compact order
    fn as_slice(&self) -> &[T];
    /// Slots in compact order, mutably
    fn as_mut_slice(&mut self) -> &mut [T];
}

impl<T: Copy, const W: usize, const H: usize> Buffer<T> for [[T; W]; H] {
    #[inline]
    fn splat(value: T) -> Self {
        [[value; W]; H]
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        self.as_flattened()
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        self.as_flattened_mut()
    }
}

/// Kind of `Self + Rhs`
pub trait SumWith<Rhs: Structure>: Structure {
    type Output: Structure;
}

/// Kind of `Self * Rhs`
pub trait MulWith<Rhs: Structure>: Structure {
    type Output: Structure;
}

/// Zero-sized structural type markers
pub mod kind {
    macro_rules! kinds {
        ($($(#[$doc:meta])* $name:ident;)*) => {
            $(
                $(#[$doc])*
                #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
                pub struct $name;

                impl super::sealed::Sealed for $name {}

                impl super::Structure for $name {
                    const KIND: super::MatType = super::MatType::$name;
                }
            )*
        };
    }

    kinds! {
        /// Dense storage
        Normal;
        /// Diagonal storage
        Diagonal;
        /// Scalar (identity multiple) storage
        Scalar;
        /// Upper triangular storage
        Upper;
        /// Lower triangular storage
        Lower;
        /// Strict upper triangular storage
        SUpper;
        /// Strict lower triangular storage
        SLower;
        /// Symmetric storage
        Sym;
        /// Antisymmetric storage
        ASym;
    }
}

impl<const R: usize, const C: usize> Compact<R, C> for kind::Normal {
    type Buf<T: Copy> = [[T; C]; R];
    type Transposed = kind::Normal;
    type OffDiag = kind::Normal;
}

impl<const N: usize> Compact<N, N> for kind::Diagonal {
    type Buf<T: Copy> = [[T; N]; 1];
    type Transposed = kind::Diagonal;
    type OffDiag = kind::Diagonal;
}

impl<const N: usize> Compact<N, N> for kind::Scalar {
    type Buf<T: Copy> = [[T; 1]; 1];
    type Transposed = kind::Scalar;
    type OffDiag = kind::Scalar;
}

macro_rules! triangular_storage {
    (@kind $n:literal, $name:ident, t: $t:ident, off: $off:ident) => {
        impl Compact<$n, $n> for kind::$name {
            type Buf<T: Copy> = [[T; MatType::$name.compact_size($n, $n)]; 1];
            type Transposed = kind::$t;
            type OffDiag = kind::$off;
        }
    };
    ($($n:literal)*) => {$(
        triangular_storage!(@kind $n, Upper, t: Lower, off: SUpper);
        triangular_storage!(@kind $n, Lower, t: Upper, off: SLower);
        triangular_storage!(@kind $n, SUpper, t: SLower, off: SUpper);
        triangular_storage!(@kind $n, SLower, t: SUpper, off: SLower);
        triangular_storage!(@kind $n, Sym, t: Sym, off: Sym);
        triangular_storage!(@kind $n, ASym, t: ASym, off: ASym);
    )*};
}

triangular_storage! {
    1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16
    17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32
}

macro_rules! kind_table {
    ($tr:ident: $($lhs:ident x $rhs:ident => $out:ident),* $(,)?) => {
        $(
            impl $tr<kind::$rhs> for kind::$lhs {
                type Output = kind::$out;
            }
        )*
    };
}

kind_table! {
    SumWith:
    Normal x Normal => Normal, Normal x Diagonal => Normal, Normal x Scalar => Normal, Normal x Upper => Normal, Normal x Lower => Normal, Normal x SUpper => Normal, Normal x SLower => Normal, Normal x Sym => Normal, Normal x ASym => Normal,
    Diagonal x Normal => Normal, Diagonal x Diagonal => Diagonal, Diagonal x Scalar => Diagonal, Diagonal x Upper => Upper, Diagonal x Lower => Lower, Diagonal x SUpper => Upper, Diagonal x SLower => Lower, Diagonal x Sym => Sym, Diagonal x ASym => Normal,
    Scalar x Normal => Normal, Scalar x Diagonal => Diagonal, Scalar x Scalar => Scalar, Scalar x Upper => Upper, Scalar x Lower => Lower, Scalar x SUpper => Upper, Scalar x SLower => Lower, Scalar x Sym => Sym, Scalar x ASym => Normal,
    Upper x Normal => Normal, Upper x Diagonal => Upper, Upper x Scalar => Upper, Upper x Upper => Upper, Upper x Lower => Normal, Upper x SUpper => Upper, Upper x SLower => Normal, Upper x Sym => Normal, Upper x ASym => Normal,
    Lower x Normal => Normal, Lower x Diagonal => Lower, Lower x Scalar => Lower, Lower x Upper => Normal, Lower x Lower => Lower, Lower x SUpper => Normal, Lower x SLower => Lower, Lower x Sym => Normal, Lower x ASym => Normal,
    SUpper x Normal => Normal, SUpper x Diagonal => Upper, SUpper x Scalar => Upper, SUpper x Upper => Upper, SUpper x Lower => Normal, SUpper x SUpper => SUpper, SUpper x SLower => Normal, SUpper x Sym => Normal, SUpper x ASym => Normal,
    SLower x Normal => Normal, SLower x Diagonal => Lower, SLower x Scalar => Lower, SLower x Upper => Normal, SLower x Lower => Lower, SLower x SUpper => Normal, SLower x SLower => SLower, SLower x Sym => Normal, SLower x ASym => Normal,
    Sym x Normal => Normal, Sym x Diagonal => Sym, Sym x Scalar => Sym, Sym x Upper => Normal, Sym x Lower => Normal, Sym x SUpper => Normal, Sym x SLower => Normal, Sym x Sym => Sym, Sym x ASym => Normal,
    ASym x Normal => Normal, ASym x Diagonal => Normal, ASym x Scalar => Normal, ASym x Upper => Normal, ASym x Lower => Normal, ASym x SUpper => Normal, ASym x SLower => Normal, ASym x Sym => Normal, ASym x ASym => ASym,
}
kind_table! {
    MulWith:
    Normal x Normal => Normal, Normal x Diagonal => Normal, Normal x Scalar => Normal, Normal x Upper => Normal, Normal x Lower => Normal, Normal x SUpper => Normal, Normal x SLower => Normal, Normal x Sym => Normal, Normal x ASym => Normal,
    Diagonal x Normal => Normal, Diagonal x Diagonal => Diagonal, Diagonal x Scalar => Diagonal, Diagonal x Upper => Upper, Diagonal x Lower => Lower, Diagonal x SUpper => SUpper, Diagonal x SLower => SLower, Diagonal x Sym => Normal, Diagonal x ASym => Normal,
    Scalar x Normal => Normal, Scalar x Diagonal => Diagonal, Scalar x Scalar => Scalar, Scalar x Upper => Upper, Scalar x Lower => Lower, Scalar x SUpper => SUpper, Scalar x SLower => SLower, Scalar x Sym => Sym, Scalar x ASym => ASym,
    Upper x Normal => Normal, Upper x Diagonal => Upper, Upper x Scalar => Upper, Upper x Upper => Upper, Upper x Lower => Normal, Upper x SUpper => SUpper, Upper x SLower => Normal, Upper x Sym => Normal, Upper x ASym => Normal,
    Lower x Normal => Normal, Lower x Diagonal => Lower, Lower x Scalar => Lower, Lower x Upper => Normal, Lower x Lower => Lower, Lower x SUpper => Normal, Lower x SLower => SLower, Lower x Sym => Normal, Lower x ASym => Normal,
    SUpper x Normal => Normal, SUpper x Diagonal => SUpper, SUpper x Scalar => SUpper, SUpper x Upper => SUpper, SUpper x Lower => Normal, SUpper x SUpper => SUpper, SUpper x SLower => Normal, SUpper x Sym => Normal, SUpper x ASym => Normal,
    SLower x Normal => Normal, SLower x Diagonal => SLower, SLower x Scalar => SLower, SLower x Upper => Normal, SLower x Lower => SLower, SLower x SUpper => Normal, SLower x SLower => SLower, SLower x Sym => Normal, SLower x ASym => Normal,
    Sym x Normal => Normal, Sym x Diagonal => Normal, Sym x Scalar => Sym, Sym x Upper => Normal, Sym x Lower => Normal, Sym x SUpper => Normal, Sym x SLower => Normal, Sym x Sym => Normal, Sym x ASym => Normal,
    ASym x Normal => Normal, ASym x Diagonal => Normal, ASym x Scalar => ASym, ASym x Upper => Normal, ASym x Lower => Normal, ASym x SUpper => Normal, ASym x SLower => Normal, ASym x Sym => Normal, ASym x ASym => Normal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_sizes() {
        assert_eq!(MatType::Normal.compact_size(3, 5), 15);
        assert_eq!(MatType::Diagonal.compact_size(4, 4), 4);
        assert_eq!(MatType::Scalar.compact_size(4, 4), 1);
        assert_eq!(MatType::Upper.compact_size(4, 4), 10);
        assert_eq!(MatType::Sym.compact_size(4, 4), 10);
        assert_eq!(MatType::SLower.compact_size(4, 4), 6);
        assert_eq!(MatType::ASym.compact_size(1, 1), 0);
    }

    #[test]
    fn test_transpose_type_is_involution() {
        for kind in MatType::ALL {
            assert_eq!(kind.transpose_type().transpose_type(), kind);
        }
        assert_eq!(MatType::Upper.transpose_type(), MatType::Lower);
        assert_eq!(MatType::SLower.transpose_type(), MatType::SUpper);
        assert_eq!(MatType::Sym.transpose_type(), MatType::Sym);
    }

    #[test]
    fn test_sum_type_is_commutative() {
        for a in MatType::ALL {
            for b in MatType::ALL {
                assert_eq!(a.sum_type(b), b.sum_type(a), "{} + {}", a, b);
            }
        }
        assert_eq!(MatType::Diagonal.sum_type(MatType::SUpper), MatType::Upper);
        assert_eq!(MatType::Scalar.sum_type(MatType::Sym), MatType::Sym);
        assert_eq!(MatType::Upper.sum_type(MatType::Lower), MatType::Normal);
    }

    #[test]
    fn test_mul_type_rules() {
        use MatType::*;
        assert_eq!(Upper.mul_type(Upper, 4, 4, 4), Upper);
        assert_eq!(SUpper.mul_type(Upper, 4, 4, 4), SUpper);
        assert_eq!(Diagonal.mul_type(Lower, 4, 4, 4), Lower);
        assert_eq!(Scalar.mul_type(ASym, 4, 4, 4), ASym);
        assert_eq!(Diagonal.mul_type(Sym, 4, 4, 4), Normal);
        assert_eq!(Upper.mul_type(Lower, 4, 4, 4), Normal);
        assert_eq!(Normal.mul_type(Normal, 4, 2, 4), Normal);
    }

    #[test]
    fn test_names_round_trip() {
        for kind in MatType::ALL {
            assert_eq!(kind.name().parse::<MatType>().unwrap(), kind);
        }
        assert!("triangular".parse::<MatType>().is_err());
    }

    #[test]
    fn test_marker_kinds() {
        assert_eq!(<kind::Upper as Structure>::KIND, MatType::Upper);
        assert_eq!(<<kind::Upper as Compact<3, 3>>::Transposed as Structure>::KIND, MatType::Lower);
        assert_eq!(<<kind::Lower as Compact<3, 3>>::OffDiag as Structure>::KIND, MatType::SLower);
        assert_eq!(<<kind::Upper as MulWith<kind::SUpper>>::Output as Structure>::KIND, MatType::SUpper);
    }

    #[test]
    fn test_buffers_hold_compact_size() {
        fn len<S: Compact<R, C>, const R: usize, const C: usize>() -> usize {
            <S::Buf<u8> as Buffer<u8>>::splat(0).as_slice().len()
        }
        assert_eq!(len::<kind::Normal, 3, 5>(), 15);
        assert_eq!(len::<kind::Diagonal, 8, 8>(), 8);
        assert_eq!(len::<kind::Scalar, 8, 8>(), 1);
        assert_eq!(len::<kind::Upper, 8, 8>(), 36);
        assert_eq!(len::<kind::SLower, 8, 8>(), 28);
        assert_eq!(len::<kind::ASym, 1, 1>(), 0);
        assert_eq!(len::<kind::Sym, 32, 32>(), MatType::Sym.compact_size(MAX_TRIANGULAR_DIM, MAX_TRIANGULAR_DIM));
    }
}
