//! Element types
//!
//! Matrices are generic over an [`Element`]: a small copyable arithmetic type
//! whose operations model a hardware datapath. Integer arithmetic wraps like
//! a fixed-width register instead of trapping, floating point follows IEEE,
//! and `bool` forms the boolean semiring (OR as sum, AND as product) so that a
//! boolean matrix product accumulates by OR.
//!
//! Division lives in the [`FieldElement`] extension, which inversion requires.

use std::fmt::{Debug, Display};

use scirs2_core::numeric::{NumCast, One, ToPrimitive, Zero};

/// Arithmetic element of a matrix
pub trait Element:
    Copy + PartialEq + PartialOrd + Debug + Display + Send + Sync + 'static
{
    /// Additive identity
    fn zero() -> Self;

    /// Multiplicative identity
    fn one() -> Self;

    /// `self + rhs`
    fn plus(self, rhs: Self) -> Self;

    /// `self - rhs`
    fn minus(self, rhs: Self) -> Self;

    /// `self * rhs`
    fn times(self, rhs: Self) -> Self;

    /// `-self`
    fn negate(self) -> Self;

    /// Conversion from a real value, `None` when not representable
    fn from_f64(value: f64) -> Option<Self>;

    /// Approximate real value
    fn to_f64(self) -> f64;

    /// Parse one value of the text matrix format
    fn parse_value(text: &str) -> Option<Self> {
        text.parse::<f64>().ok().and_then(Self::from_f64)
    }

    /// `true` for the additive identity
    fn is_zero(self) -> bool {
        self == Self::zero()
    }
}

/// Element with division
pub trait FieldElement: Element {
    /// `self / rhs`
    fn divide(self, rhs: Self) -> Self;

    /// `1 / self`
    fn recip(self) -> Self {
        Self::one().divide(self)
    }
}

macro_rules! impl_int_element {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                #[inline]
                fn zero() -> Self {
                    <$t as Zero>::zero()
                }

                #[inline]
                fn one() -> Self {
                    <$t as One>::one()
                }

                #[inline]
                fn plus(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }

                #[inline]
                fn minus(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }

                #[inline]
                fn times(self, rhs: Self) -> Self {
                    self.wrapping_mul(rhs)
                }

                #[inline]
                fn negate(self) -> Self {
                    self.wrapping_neg()
                }

                fn from_f64(value: f64) -> Option<Self> {
                    <$t as NumCast>::from(value)
                }

                fn to_f64(self) -> f64 {
                    ToPrimitive::to_f64(&self).unwrap_or(f64::NAN)
                }

                // Integer syntax only; `1.9` must not load as `1`.
                fn parse_value(text: &str) -> Option<Self> {
                    text.parse::<$t>().ok()
                }
            }

            impl FieldElement for $t {
                #[inline]
                fn divide(self, rhs: Self) -> Self {
                    self.wrapping_div(rhs)
                }
            }
        )*
    };
}

impl_int_element!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float_element {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                #[inline]
                fn zero() -> Self {
                    <$t as Zero>::zero()
                }

                #[inline]
                fn one() -> Self {
                    <$t as One>::one()
                }

                #[inline]
                fn plus(self, rhs: Self) -> Self {
                    self + rhs
                }

                #[inline]
                fn minus(self, rhs: Self) -> Self {
                    self - rhs
                }

                #[inline]
                fn times(self, rhs: Self) -> Self {
                    self * rhs
                }

                #[inline]
                fn negate(self) -> Self {
                    -self
                }

                fn from_f64(value: f64) -> Option<Self> {
                    <$t as NumCast>::from(value)
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }
            }

            impl FieldElement for $t {
                #[inline]
                fn divide(self, rhs: Self) -> Self {
                    self / rhs
                }
            }
        )*
    };
}

impl_float_element!(f32, f64);

impl Element for bool {
    fn zero() -> Self {
        false
    }

    fn one() -> Self {
        true
    }

    fn plus(self, rhs: Self) -> Self {
        self | rhs
    }

    fn minus(self, rhs: Self) -> Self {
        self & !rhs
    }

    fn times(self, rhs: Self) -> Self {
        self & rhs
    }

    // Boolean semiring has no additive inverse
    fn negate(self) -> Self {
        self
    }

    fn from_f64(value: f64) -> Option<Self> {
        if value.is_nan() {
            None
        } else {
            Some(value != 0.0)
        }
    }

    fn to_f64(self) -> f64 {
        if self {
            1.0
        } else {
            0.0
        }
    }

    fn parse_value(text: &str) -> Option<Self> {
        match text {
            "true" => Some(true),
            "false" => Some(false),
            other => other.parse::<f64>().ok().and_then(<bool as Element>::from_f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_arithmetic_wraps() {
        assert_eq!(i8::MAX.plus(1), i8::MIN);
        assert_eq!(0u8.minus(1), u8::MAX);
        assert_eq!(i8::MIN.negate(), i8::MIN);
        assert_eq!(7i32.times(-3), -21);
        assert_eq!(7i32.divide(2), 3);
    }

    #[test]
    fn test_boolean_semiring() {
        assert!(true.plus(false));
        assert!(!true.times(false));
        assert!(!true.minus(true));
        assert!(true.minus(false));
        assert!(true.negate());
        assert!(!<bool as Element>::zero());
    }

    #[test]
    fn test_float_conversion() {
        assert_eq!(<f32 as Element>::from_f64(0.5), Some(0.5f32));
        assert_eq!(<f64 as FieldElement>::recip(4.0), 0.25);
        assert_eq!(Element::to_f64(3u16), 3.0);
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(<i32 as Element>::parse_value("-12"), Some(-12));
        assert_eq!(<i32 as Element>::parse_value("1.9"), None);
        assert_eq!(<i32 as Element>::parse_value("4.0"), None);
        assert_eq!(<u64 as Element>::parse_value("1e3"), None);
        assert_eq!(<u8 as Element>::parse_value("300"), None);
        assert_eq!(<f64 as Element>::parse_value("2.5e1"), Some(25.0));
        assert_eq!(<bool as Element>::parse_value("1"), Some(true));
        assert_eq!(<i32 as Element>::parse_value("abc"), None);
    }
}
