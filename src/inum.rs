//! Integers, exact decimals and ratios.

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use std::fmt;

/// The payload-free constants a numeric type can collapse into.
///
/// Each is encoded as an offset from the type's base OID.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Folded {
    /// `0`
    Zero = 1,
    /// `1`
    One = 2,
    /// `-1`
    MinusOne = 3,
}

impl Folded {
    /// The OID for this constant in the block starting at `base`.
    pub fn oid(self, base: u16) -> u16 { base + self as u16 }

    /// Which constant, if any, `oid` names in the block starting at `base`.
    pub fn from_oid(base: u16, oid: u16) -> Option<Folded> {
        match oid.checked_sub(base) {
            Some(1) => Some(Folded::Zero),
            Some(2) => Some(Folded::One),
            Some(3) => Some(Folded::MinusOne),
            _ => None,
        }
    }
}

/// Values that may be written as a folded constant.
pub trait Fold {
    /// `Some` when the value is exactly zero, one or minus one.
    fn folded(&self) -> Option<Folded>;
}

macro_rules! fold_int {
    ($($t:ty),*) => {
        $(
            impl Fold for $t {
                fn folded(&self) -> Option<Folded> {
                    match *self {
                        0 => Some(Folded::Zero),
                        1 => Some(Folded::One),
                        -1 => Some(Folded::MinusOne),
                        _ => None,
                    }
                }
            }
        )*
    };
}

fold_int!(i8, i16, i32, i64);

impl Fold for BigInt {
    fn folded(&self) -> Option<Folded> {
        if self.is_zero() {
            Some(Folded::Zero)
        } else if self.is_one() {
            Some(Folded::One)
        } else if self.is_negative() && (-self).is_one() {
            Some(Folded::MinusOne)
        } else {
            None
        }
    }
}

/// An exact decimal: `unscaled * 10^-scale`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BigDecimal {
    unscaled: BigInt,
    scale: i32,
}

impl BigDecimal {
    /// Creates a decimal from its unscaled value and scale.
    pub fn new<I: Into<BigInt>>(unscaled: I, scale: i32) -> Self {
        BigDecimal {
            unscaled: unscaled.into(),
            scale,
        }
    }

    pub fn unscaled(&self) -> &BigInt { &self.unscaled }

    pub fn scale(&self) -> i32 { self.scale }
}

impl fmt::Display for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.scale <= 0 {
            write!(f, "{}", self.unscaled)?;
            for _ in 0..self.scale.unsigned_abs() {
                write!(f, "0")?;
            }
            return Ok(());
        }
        let digits = self.unscaled.abs().to_string();
        let scale = self.scale as usize;
        let sign = if self.unscaled.is_negative() { "-" } else { "" };
        if digits.len() > scale {
            let (int, frac) = digits.split_at(digits.len() - scale);
            write!(f, "{}{}.{}", sign, int, frac)
        } else {
            write!(f, "{}0.{:0>width$}", sign, digits, width = scale)
        }
    }
}

/// An exact fraction with a non-zero denominator.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ratio {
    numer: BigInt,
    denom: BigInt,
}

impl Ratio {
    /// Returns `None` when `denom` is zero. The fraction is stored as given, not reduced.
    pub fn new<N: Into<BigInt>, D: Into<BigInt>>(numer: N, denom: D) -> Option<Self> {
        let denom = denom.into();
        if denom.is_zero() {
            None
        } else {
            Some(Ratio {
                numer: numer.into(),
                denom,
            })
        }
    }

    pub fn numer(&self) -> &BigInt { &self.numer }

    pub fn denom(&self) -> &BigInt { &self.denom }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}/{}", self.numer, self.denom) }
}
