//! Variant generator: derive a legal neighbor of a base configuration.
//!
//! Derivation is constructive. The unit width is sampled first from
//! candidates already narrowed by the base's byte order, then the byte order
//! is sampled from candidates narrowed by the *sampled* width. The result is
//! legal without any check-and-retry. The one case where a mask's literal
//! request is overridden: when the sampled width is the smallest unit, the
//! byte order is forced to `none` even if the mask asked to match the base.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::mask::{Intent, Mask};
use crate::option::{Axis, ByteOrder, Configuration, UnitWidth};

/// No legal configuration satisfies a (base, mask) request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeriveError {
    #[error("no unit width satisfies mask {mask} for base {base}")]
    NoUnitWidth { base: Configuration, mask: Mask },

    #[error("no byte order satisfies mask {mask} for base {base} with unit width {width:?}")]
    NoByteOrder {
        base: Configuration,
        mask: Mask,
        width: UnitWidth,
    },
}

/// Derive a configuration related to `base` as `mask` asks.
///
/// Only the unit width and byte order draws consume randomness; iterator
/// shape and bit order have two values each, so "differ" is deterministic.
pub fn derive<R: Rng + ?Sized>(
    base: &Configuration,
    mask: Mask,
    rng: &mut R,
) -> Result<Configuration, DeriveError> {
    let shape = match mask.intent(Axis::IteratorShape) {
        Intent::Match => base.shape,
        Intent::Differ => base.shape.other(),
    };
    let bit_order = match mask.intent(Axis::BitOrder) {
        Intent::Match => base.bit_order,
        Intent::Differ => base.bit_order.other(),
    };

    let widths = width_candidates(base, mask);
    let width = *widths
        .choose(rng)
        .ok_or(DeriveError::NoUnitWidth { base: *base, mask })?;

    let byte_orders = byte_order_candidates(base, mask, width);
    let byte_order = *byte_orders.choose(rng).ok_or(DeriveError::NoByteOrder {
        base: *base,
        mask,
        width,
    })?;

    Ok(Configuration {
        shape,
        bit_order,
        width,
        byte_order,
    })
}

/// Unit widths `derive` may pick for `base` under `mask`, in option order.
///
/// When the base uses byte order `none`, the byte order request decides the
/// width too: differing requires leaving the smallest width, matching
/// requires staying on it.
pub fn width_candidates(base: &Configuration, mask: Mask) -> Vec<UnitWidth> {
    let mut candidates: Vec<UnitWidth> = match mask.intent(Axis::UnitWidth) {
        Intent::Match => vec![base.width],
        Intent::Differ => UnitWidth::ALL
            .into_iter()
            .filter(|&w| w != base.width)
            .collect(),
    };

    if base.byte_order.is_none() {
        match mask.intent(Axis::ByteOrder) {
            Intent::Differ => candidates.retain(|w| !w.is_smallest()),
            Intent::Match => candidates.retain(|w| w.is_smallest()),
        }
    }

    candidates
}

/// Byte orders `derive` may pick once `width` has been sampled.
///
/// Empty only for an illegal base that pairs a wide unit with `none` and
/// asks to keep it.
pub fn byte_order_candidates(base: &Configuration, mask: Mask, width: UnitWidth) -> Vec<ByteOrder> {
    if width.is_smallest() {
        // The smallest unit has no byte order, whatever the mask asked for.
        return vec![ByteOrder::None];
    }

    let mut candidates: Vec<ByteOrder> = match mask.intent(Axis::ByteOrder) {
        Intent::Match => vec![base.byte_order],
        Intent::Differ => ByteOrder::ALL
            .into_iter()
            .filter(|&b| b != base.byte_order)
            .collect(),
    };
    candidates.retain(|b| !b.is_none());

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::{is_legal, legal_bases, BitOrder, IteratorShape};
    use crate::rng::{stage_rng, Stage};

    fn byte_base() -> Configuration {
        Configuration::new(
            IteratorShape::Forward,
            BitOrder::Msb0,
            UnitWidth::U8,
            ByteOrder::None,
        )
    }

    fn word_base() -> Configuration {
        Configuration::new(
            IteratorShape::Forward,
            BitOrder::Msb0,
            UnitWidth::U32,
            ByteOrder::Msb0,
        )
    }

    #[test]
    fn test_match_all_returns_base() {
        let mut rng = stage_rng(1, Stage::Corpus);
        for base in legal_bases() {
            assert_eq!(derive(&base, Mask::MATCH_ALL, &mut rng), Ok(base));
        }
    }

    #[test]
    fn test_match_width_differ_byte_order_fails_on_smallest() {
        let mut rng = stage_rng(1, Stage::Corpus);
        let mask = Mask::differing(&[Axis::ByteOrder]);
        let result = derive(&byte_base(), mask, &mut rng);
        assert_eq!(
            result,
            Err(DeriveError::NoUnitWidth {
                base: byte_base(),
                mask,
            })
        );
    }

    #[test]
    fn test_differ_width_only_forces_none_on_smallest() {
        let mask = Mask::differing(&[Axis::UnitWidth]);
        let mut seen_smallest = false;
        let mut seen_wider = false;

        for seed in 0..64 {
            let mut rng = stage_rng(seed, Stage::Corpus);
            let derived = derive(&word_base(), mask, &mut rng).unwrap();
            assert_ne!(derived.width, UnitWidth::U32);
            assert_eq!(derived.shape, IteratorShape::Forward);
            assert_eq!(derived.bit_order, BitOrder::Msb0);
            if derived.width.is_smallest() {
                seen_smallest = true;
                assert_eq!(derived.byte_order, ByteOrder::None);
            } else {
                seen_wider = true;
                assert_eq!(derived.byte_order, ByteOrder::Msb0);
            }
        }

        assert!(seen_smallest && seen_wider);
    }

    #[test]
    fn test_shape_and_bit_order_flip_deterministically() {
        let mut rng = stage_rng(7, Stage::Corpus);
        let mask = Mask::differing(&[Axis::IteratorShape, Axis::BitOrder]);
        let derived = derive(&word_base(), mask, &mut rng).unwrap();
        assert_eq!(derived.shape, IteratorShape::Reverse);
        assert_eq!(derived.bit_order, BitOrder::Lsb0);
        assert_eq!(derived.width, UnitWidth::U32);
        assert_eq!(derived.byte_order, ByteOrder::Msb0);
    }

    #[test]
    fn test_none_base_differ_byte_order_leaves_smallest() {
        let mask = Mask::differing(&[Axis::UnitWidth, Axis::ByteOrder]);
        assert_eq!(
            width_candidates(&byte_base(), mask),
            vec![UnitWidth::U16, UnitWidth::U32, UnitWidth::U64]
        );
        assert_eq!(
            byte_order_candidates(&byte_base(), mask, UnitWidth::U16),
            vec![ByteOrder::Msb0, ByteOrder::Lsb0]
        );
    }

    #[test]
    fn test_differ_width_and_byte_order_from_wide_base() {
        let mask = Mask::differing(&[Axis::UnitWidth, Axis::ByteOrder]);
        assert_eq!(
            byte_order_candidates(&word_base(), mask, UnitWidth::U8),
            vec![ByteOrder::None]
        );
        assert_eq!(
            byte_order_candidates(&word_base(), mask, UnitWidth::U64),
            vec![ByteOrder::Lsb0]
        );
    }

    #[test]
    fn test_every_success_is_legal() {
        for seed in 0..8 {
            let mut rng = stage_rng(seed, Stage::Corpus);
            for base in legal_bases() {
                for mask in Mask::all() {
                    if let Ok(derived) = derive(&base, mask, &mut rng) {
                        assert!(is_legal(&derived), "{base} / {mask} -> {derived}");
                    }
                }
            }
        }
    }
}
