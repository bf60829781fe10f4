//! Per-axis match/differ selectors.
//!
//! A [`Mask`] holds four bits, one per [`Axis`], with the first axis in the
//! most significant bit. A set bit means the derived configuration must
//! differ from the base on that axis; a clear bit means it must match.
//! Masks written with the opposite convention go through
//! [`Mask::from_match_bits`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::option::{Axis, SpaceError};

/// What a mask asks of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Match,
    Differ,
}

/// Four-bit selector of per-axis [`Intent`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Mask(u8);

impl Mask {
    /// Number of distinct masks.
    pub const COUNT: u8 = 16;

    /// Every axis must match the base.
    pub const MATCH_ALL: Mask = Mask(0);

    /// Every axis must differ from the base.
    pub const DIFFER_ALL: Mask = Mask(0b1111);

    /// Build a mask from "set bit = differ" bits.
    pub fn new(bits: u8) -> Result<Self, SpaceError> {
        if bits < Self::COUNT {
            Ok(Mask(bits))
        } else {
            Err(SpaceError::MaskOutOfRange(bits))
        }
    }

    /// Build a mask from "set bit = match" bits by complementing them.
    pub fn from_match_bits(bits: u8) -> Result<Self, SpaceError> {
        let mask = Self::new(bits)?;
        Ok(Mask(!mask.0 & 0b1111))
    }

    /// Mask that asks to differ on exactly `axes` and match everywhere else.
    pub fn differing(axes: &[Axis]) -> Self {
        Mask(axes.iter().fold(0, |bits, axis| bits | axis.mask_bit()))
    }

    /// All sixteen masks in ascending order.
    pub fn all() -> impl Iterator<Item = Mask> {
        (0..Self::COUNT).map(Mask)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Intent this mask expresses for `axis`.
    pub fn intent(self, axis: Axis) -> Intent {
        if self.0 & axis.mask_bit() != 0 {
            Intent::Differ
        } else {
            Intent::Match
        }
    }

    pub fn matches(self, axis: Axis) -> bool {
        self.intent(axis) == Intent::Match
    }
}

impl TryFrom<u8> for Mask {
    type Error = SpaceError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Mask::new(bits)
    }
}

impl From<Mask> for u8 {
    fn from(mask: Mask) -> u8 {
        mask.0
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04b}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(Mask::new(16), Err(SpaceError::MaskOutOfRange(16)));
        assert!(Mask::new(15).is_ok());
    }

    #[test]
    fn test_intent_per_axis() {
        let mask = Mask::new(0b0010).unwrap();
        assert_eq!(mask.intent(Axis::IteratorShape), Intent::Match);
        assert_eq!(mask.intent(Axis::BitOrder), Intent::Match);
        assert_eq!(mask.intent(Axis::UnitWidth), Intent::Differ);
        assert_eq!(mask.intent(Axis::ByteOrder), Intent::Match);
    }

    #[test]
    fn test_match_bits_are_complemented() {
        // "Match only the unit width" in the other convention.
        let mask = Mask::from_match_bits(0b0010).unwrap();
        assert_eq!(mask.bits(), 0b1101);
        assert!(mask.matches(Axis::UnitWidth));
        assert!(!mask.matches(Axis::ByteOrder));
        assert!(Mask::from_match_bits(0xff).is_err());
    }

    #[test]
    fn test_differing_builder() {
        assert_eq!(Mask::differing(&[]), Mask::MATCH_ALL);
        assert_eq!(Mask::differing(&Axis::ALL), Mask::DIFFER_ALL);
        assert_eq!(
            Mask::differing(&[Axis::UnitWidth, Axis::ByteOrder]).bits(),
            0b0011
        );
    }

    #[test]
    fn test_all_ascending() {
        let bits: Vec<u8> = Mask::all().map(Mask::bits).collect();
        assert_eq!(bits, (0..16).collect::<Vec<u8>>());
    }

    #[test]
    fn test_display_is_binary() {
        assert_eq!(Mask::new(5).unwrap().to_string(), "0101");
    }
}
