//! Constant folding for floating point values.
//!
//! Folding compares bit patterns, so `-0.0` and every NaN keep their full payload.

use crate::inum::{Fold, Folded};
use half::f16;

impl Fold for f16 {
    fn folded(&self) -> Option<Folded> {
        let bits = self.to_bits();
        if bits == f16::ZERO.to_bits() {
            Some(Folded::Zero)
        } else if bits == f16::ONE.to_bits() {
            Some(Folded::One)
        } else if bits == f16::NEG_ONE.to_bits() {
            Some(Folded::MinusOne)
        } else {
            None
        }
    }
}

impl Fold for f32 {
    fn folded(&self) -> Option<Folded> {
        let bits = self.to_bits();
        if bits == 0f32.to_bits() {
            Some(Folded::Zero)
        } else if bits == 1f32.to_bits() {
            Some(Folded::One)
        } else if bits == (-1f32).to_bits() {
            Some(Folded::MinusOne)
        } else {
            None
        }
    }
}

impl Fold for f64 {
    fn folded(&self) -> Option<Folded> {
        let bits = self.to_bits();
        if bits == 0f64.to_bits() {
            Some(Folded::Zero)
        } else if bits == 1f64.to_bits() {
            Some(Folded::One)
        } else if bits == (-1f64).to_bits() {
            Some(Folded::MinusOne)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_is_not_folded() {
        assert_eq!(0f64.folded(), Some(Folded::Zero));
        assert_eq!((-0f64).folded(), None);
        assert_eq!((-0f32).folded(), None);
        assert_eq!(f16::NEG_ZERO.folded(), None);
    }

    #[test]
    fn units_fold() {
        assert_eq!(1f32.folded(), Some(Folded::One));
        assert_eq!((-1f64).folded(), Some(Folded::MinusOne));
        assert_eq!(f16::NEG_ONE.folded(), Some(Folded::MinusOne));
        assert_eq!(f64::NAN.folded(), None);
        assert_eq!(0.5f32.folded(), None);
    }
}
