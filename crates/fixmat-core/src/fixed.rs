//! Parameterized binary fixed-point numbers
//!
//! [`Fixed<INT, DEC, SIGNED>`] models a hardware fixed-point register with
//! `INT` integer bits. Signed formats count the sign in `INT` and carry
//! `DEC + 1` fractional bits, so [`FxP<8, 8>`] is a 17-bit word covering
//! `[-128, 128)` in steps of `2^-9`. Unsigned formats carry `DEC` fractional
//! bits, so [`UFxP<4, 4>`] is an 8-bit word covering `[0, 16)`.
//!
//! Overflow wraps around the word and every operation that drops bits
//! (multiplication, division, conversion from `f64`) truncates toward
//! negative infinity, matching the usual synthesis defaults.
//!
//! # Examples
//!
//! ```
//! use fixmat_core::FxP;
//!
//! let a = FxP::<8, 8>::from_f64(1.5).unwrap();
//! let b = FxP::<8, 8>::from_int(-2);
//! assert_eq!(FxP::<8, 8>::BITS, 17);
//! assert_eq!((a * b).to_f64(), -3.0);
//! assert_eq!((a + b).to_string(), "-0.5");
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use scirs2_core::numeric::{NumCast, One, ToPrimitive, Zero};

use crate::element::{Element, FieldElement};
use crate::error::{MatError, MatResult};

/// Fixed-point number with `INT` integer bits and [`Self::FRAC`] fractional bits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed<const INT: u32, const DEC: u32, const SIGNED: bool = true> {
    raw: i64,
}

/// Signed fixed point: `INT + DEC + 1` bits, `DEC + 1` of them fractional
pub type FxP<const INT: u32, const DEC: u32> = Fixed<INT, DEC, true>;

/// Unsigned fixed point: `INT + DEC` bits, `DEC` of them fractional
pub type UFxP<const INT: u32, const DEC: u32> = Fixed<INT, DEC, false>;

impl<const INT: u32, const DEC: u32, const SIGNED: bool> Fixed<INT, DEC, SIGNED> {
    /// Fractional bits
    pub const FRAC: u32 = if SIGNED { DEC + 1 } else { DEC };

    /// Word width in bits
    pub const BITS: u32 = {
        let bits = INT + Self::FRAC;
        assert!(bits >= 1 && bits <= 63, "fixed-point word must have 1 to 63 bits");
        bits
    };

    /// Smallest representable value
    pub const MIN: Self = Self {
        raw: if SIGNED { -(1i64 << (Self::BITS - 1)) } else { 0 },
    };

    /// Largest representable value
    pub const MAX: Self = Self {
        raw: if SIGNED {
            (1i64 << (Self::BITS - 1)) - 1
        } else {
            (1i64 << Self::BITS) - 1
        },
    };

    /// Resolution, one unit in the last place
    pub const EPSILON: Self = Self { raw: 1 };

    const SCALE: f64 = (1u64 << Self::FRAC) as f64;

    /// Reduce an intermediate to the word, two's-complement style
    const fn wrap(value: i128) -> i64 {
        let bits = Self::BITS;
        let masked = value & ((1i128 << bits) - 1);
        if SIGNED && masked >= (1i128 << (bits - 1)) {
            (masked - (1i128 << bits)) as i64
        } else {
            masked as i64
        }
    }

    /// Build from the raw word; out-of-range bits wrap
    pub const fn from_raw(raw: i64) -> Self {
        Self {
            raw: Self::wrap(raw as i128),
        }
    }

    /// The raw word, sign-extended for signed formats
    pub const fn raw(self) -> i64 {
        self.raw
    }

    /// Convert an integer; out-of-range values wrap
    pub const fn from_int(value: i64) -> Self {
        Self {
            raw: Self::wrap((value as i128) << Self::FRAC),
        }
    }

    /// Convert a real value, truncating toward negative infinity
    ///
    /// Returns `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let scaled = (value * Self::SCALE).floor();
        if scaled.abs() >= 2f64.powi(126) {
            return None;
        }
        Some(Self {
            raw: Self::wrap(scaled as i128),
        })
    }

    /// Exact real value
    pub fn to_f64(self) -> f64 {
        self.raw as f64 / Self::SCALE
    }

    /// Absolute value, wrapping at `MIN`
    pub fn abs(self) -> Self {
        if self.raw < 0 {
            -self
        } else {
            self
        }
    }
}

fn floor_div(n: i128, d: i128) -> i128 {
    let q = n / d;
    if n % d != 0 && ((n < 0) != (d < 0)) {
        q - 1
    } else {
        q
    }
}

impl<const INT: u32, const DEC: u32, const SIGNED: bool> Add for Fixed<INT, DEC, SIGNED> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            raw: Self::wrap(self.raw as i128 + rhs.raw as i128),
        }
    }
}

impl<const INT: u32, const DEC: u32, const SIGNED: bool> Sub for Fixed<INT, DEC, SIGNED> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            raw: Self::wrap(self.raw as i128 - rhs.raw as i128),
        }
    }
}

impl<const INT: u32, const DEC: u32, const SIGNED: bool> Mul for Fixed<INT, DEC, SIGNED> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            raw: Self::wrap((self.raw as i128 * rhs.raw as i128) >> Self::FRAC),
        }
    }
}

impl<const INT: u32, const DEC: u32, const SIGNED: bool> Div for Fixed<INT, DEC, SIGNED> {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    fn div(self, rhs: Self) -> Self {
        assert!(rhs.raw != 0, "fixed-point division by zero");
        Self {
            raw: Self::wrap(floor_div((self.raw as i128) << Self::FRAC, rhs.raw as i128)),
        }
    }
}

impl<const INT: u32, const DEC: u32, const SIGNED: bool> Neg for Fixed<INT, DEC, SIGNED> {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            raw: Self::wrap(-(self.raw as i128)),
        }
    }
}

macro_rules! impl_assign_ops {
    ($($tr:ident::$method:ident => $op:tt),*) => {
        $(
            impl<const INT: u32, const DEC: u32, const SIGNED: bool> $tr for Fixed<INT, DEC, SIGNED> {
                fn $method(&mut self, rhs: Self) {
                    *self = *self $op rhs;
                }
            }
        )*
    };
}

impl_assign_ops!(AddAssign::add_assign => +, SubAssign::sub_assign => -, MulAssign::mul_assign => *, DivAssign::div_assign => /);

impl<const INT: u32, const DEC: u32, const SIGNED: bool> Zero for Fixed<INT, DEC, SIGNED> {
    fn zero() -> Self {
        Self { raw: 0 }
    }

    fn is_zero(&self) -> bool {
        self.raw == 0
    }
}

impl<const INT: u32, const DEC: u32, const SIGNED: bool> One for Fixed<INT, DEC, SIGNED> {
    fn one() -> Self {
        Self::from_int(1)
    }
}

impl<const INT: u32, const DEC: u32, const SIGNED: bool> ToPrimitive for Fixed<INT, DEC, SIGNED> {
    fn to_i64(&self) -> Option<i64> {
        Some(self.raw >> Self::FRAC)
    }

    fn to_u64(&self) -> Option<u64> {
        u64::try_from(self.raw >> Self::FRAC).ok()
    }

    fn to_f64(&self) -> Option<f64> {
        Some(Fixed::to_f64(*self))
    }
}

impl<const INT: u32, const DEC: u32, const SIGNED: bool> NumCast for Fixed<INT, DEC, SIGNED> {
    fn from<N: ToPrimitive>(n: N) -> Option<Self> {
        n.to_f64().and_then(Fixed::from_f64)
    }
}

impl<const INT: u32, const DEC: u32, const SIGNED: bool> fmt::Display for Fixed<INT, DEC, SIGNED> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Fixed::to_f64(*self), f)
    }
}

impl<const INT: u32, const DEC: u32, const SIGNED: bool> FromStr for Fixed<INT, DEC, SIGNED> {
    type Err = MatError;

    fn from_str(s: &str) -> MatResult<Self> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| MatError::parse("fixed-point value", format!("`{}` is not a number", s)))?;
        Fixed::from_f64(value)
            .ok_or_else(|| MatError::parse("fixed-point value", format!("`{}` is not finite", s)))
    }
}

impl<const INT: u32, const DEC: u32, const SIGNED: bool> Element for Fixed<INT, DEC, SIGNED> {
    fn zero() -> Self {
        Self { raw: 0 }
    }

    fn one() -> Self {
        Self::from_int(1)
    }

    fn plus(self, rhs: Self) -> Self {
        self + rhs
    }

    fn minus(self, rhs: Self) -> Self {
        self - rhs
    }

    fn times(self, rhs: Self) -> Self {
        self * rhs
    }

    fn negate(self) -> Self {
        -self
    }

    fn from_f64(value: f64) -> Option<Self> {
        Fixed::from_f64(value)
    }

    fn to_f64(self) -> f64 {
        Fixed::to_f64(self)
    }

    fn parse_value(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl<const INT: u32, const DEC: u32, const SIGNED: bool> FieldElement for Fixed<INT, DEC, SIGNED> {
    fn divide(self, rhs: Self) -> Self {
        self / rhs
    }
}
