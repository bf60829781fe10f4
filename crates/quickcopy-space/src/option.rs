//! Option space: the four axes, their ordered value sets, and the legality rule.
//!
//! A [`Configuration`] is legal exactly when its unit width is the smallest
//! width and its byte order is `none`, or its unit width is wider and it names
//! an explicit byte order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four independent dimensions of an iterator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    IteratorShape,
    BitOrder,
    UnitWidth,
    ByteOrder,
}

impl Axis {
    /// All axes in their fixed order.
    pub const ALL: [Axis; 4] = [
        Axis::IteratorShape,
        Axis::BitOrder,
        Axis::UnitWidth,
        Axis::ByteOrder,
    ];

    /// Position of this axis in [`Axis::ALL`].
    pub fn index(self) -> usize {
        match self {
            Axis::IteratorShape => 0,
            Axis::BitOrder => 1,
            Axis::UnitWidth => 2,
            Axis::ByteOrder => 3,
        }
    }

    /// Mask bit owned by this axis. The first axis owns the most significant
    /// of the four bits.
    pub fn mask_bit(self) -> u8 {
        1 << (3 - self.index())
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::IteratorShape => "iterator_shape",
            Axis::BitOrder => "bit_order",
            Axis::UnitWidth => "unit_width",
            Axis::ByteOrder => "byte_order",
        };
        f.write_str(name)
    }
}

/// Traversal direction of the iterator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IteratorShape {
    Forward,
    Reverse,
}

impl IteratorShape {
    pub const ALL: [IteratorShape; 2] = [IteratorShape::Forward, IteratorShape::Reverse];

    /// The other shape. The axis has exactly two values.
    pub fn other(self) -> Self {
        match self {
            IteratorShape::Forward => IteratorShape::Reverse,
            IteratorShape::Reverse => IteratorShape::Forward,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IteratorShape::Forward => "forward",
            IteratorShape::Reverse => "reverse",
        }
    }
}

/// Order of bits within a storage unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitOrder {
    Msb0,
    Lsb0,
}

impl BitOrder {
    pub const ALL: [BitOrder; 2] = [BitOrder::Msb0, BitOrder::Lsb0];

    /// The other bit order. The axis has exactly two values.
    pub fn other(self) -> Self {
        match self {
            BitOrder::Msb0 => BitOrder::Lsb0,
            BitOrder::Lsb0 => BitOrder::Msb0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BitOrder::Msb0 => "msb0",
            BitOrder::Lsb0 => "lsb0",
        }
    }
}

/// Width of the storage unit the iterator walks over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitWidth {
    U8,
    U16,
    U32,
    U64,
}

impl UnitWidth {
    pub const ALL: [UnitWidth; 4] = [
        UnitWidth::U8,
        UnitWidth::U16,
        UnitWidth::U32,
        UnitWidth::U64,
    ];

    /// The only width that pairs with [`ByteOrder::None`].
    pub const SMALLEST: UnitWidth = UnitWidth::U8;

    pub fn is_smallest(self) -> bool {
        self == Self::SMALLEST
    }

    pub fn bits(self) -> u32 {
        match self {
            UnitWidth::U8 => 8,
            UnitWidth::U16 => 16,
            UnitWidth::U32 => 32,
            UnitWidth::U64 => 64,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnitWidth::U8 => "u8",
            UnitWidth::U16 => "u16",
            UnitWidth::U32 => "u32",
            UnitWidth::U64 => "u64",
        }
    }
}

/// Order of bytes within a multi-byte storage unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    /// No byte reordering. Only meaningful for single-byte units.
    None,
    Msb0,
    Lsb0,
}

impl ByteOrder {
    pub const ALL: [ByteOrder; 3] = [ByteOrder::None, ByteOrder::Msb0, ByteOrder::Lsb0];

    pub fn is_none(self) -> bool {
        self == ByteOrder::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ByteOrder::None => "none",
            ByteOrder::Msb0 => "msb0",
            ByteOrder::Lsb0 => "lsb0",
        }
    }
}

/// Errors raised when building values of the option space.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpaceError {
    #[error("illegal configuration {0}: only the smallest unit width pairs with byte order none")]
    Illegal(Configuration),

    #[error("mask {0} out of range: must be below 16")]
    MaskOutOfRange(u8),
}

/// A fully specified point of the option space: one value per axis.
///
/// Field order matches [`Axis::ALL`], so the derived ordering is
/// lexicographic by axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Configuration {
    pub shape: IteratorShape,
    pub bit_order: BitOrder,
    pub width: UnitWidth,
    pub byte_order: ByteOrder,
}

impl Configuration {
    pub fn new(
        shape: IteratorShape,
        bit_order: BitOrder,
        width: UnitWidth,
        byte_order: ByteOrder,
    ) -> Self {
        Self {
            shape,
            bit_order,
            width,
            byte_order,
        }
    }

    /// Build a configuration, rejecting illegal width/byte order pairings.
    pub fn new_checked(
        shape: IteratorShape,
        bit_order: BitOrder,
        width: UnitWidth,
        byte_order: ByteOrder,
    ) -> Result<Self, SpaceError> {
        let config = Self::new(shape, bit_order, width, byte_order);
        if is_legal(&config) {
            Ok(config)
        } else {
            Err(SpaceError::Illegal(config))
        }
    }

    /// Index of this configuration's value on `axis` within that axis's
    /// ordered value set.
    pub fn value_index(&self, axis: Axis) -> usize {
        match axis {
            Axis::IteratorShape => self.shape as usize,
            Axis::BitOrder => self.bit_order as usize,
            Axis::UnitWidth => self.width as usize,
            Axis::ByteOrder => self.byte_order as usize,
        }
    }

    /// Axes on which `self` and `other` hold different values, in axis order.
    pub fn differs_on(&self, other: &Configuration) -> Vec<Axis> {
        Axis::ALL
            .into_iter()
            .filter(|&axis| self.value_index(axis) != other.value_index(axis))
            .collect()
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}<{},{},{}>",
            self.shape.as_str(),
            self.bit_order.as_str(),
            self.width.as_str(),
            self.byte_order.as_str()
        )
    }
}

/// Whether `config` is a legal iterator instantiation: the smallest unit
/// pairs only with byte order `none`, every wider unit needs an explicit one.
pub fn is_legal(config: &Configuration) -> bool {
    config.width.is_smallest() == config.byte_order.is_none()
}

/// Every legal configuration, enumerated with the iterator shape outermost
/// and the byte order innermost.
pub fn legal_bases() -> Vec<Configuration> {
    let mut bases = Vec::new();
    for shape in IteratorShape::ALL {
        for bit_order in BitOrder::ALL {
            for width in UnitWidth::ALL {
                for byte_order in ByteOrder::ALL {
                    let config = Configuration::new(shape, bit_order, width, byte_order);
                    if is_legal(&config) {
                        bases.push(config);
                    }
                }
            }
        }
    }
    bases
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smallest_width_requires_none() {
        let legal = Configuration::new(
            IteratorShape::Forward,
            BitOrder::Msb0,
            UnitWidth::U8,
            ByteOrder::None,
        );
        assert!(is_legal(&legal));

        let illegal = Configuration {
            byte_order: ByteOrder::Lsb0,
            ..legal
        };
        assert!(!is_legal(&illegal));
    }

    #[test]
    fn test_wider_width_requires_explicit_byte_order() {
        for width in [UnitWidth::U16, UnitWidth::U32, UnitWidth::U64] {
            let none = Configuration::new(
                IteratorShape::Reverse,
                BitOrder::Lsb0,
                width,
                ByteOrder::None,
            );
            assert!(!is_legal(&none), "{none} should be illegal");
            for byte_order in [ByteOrder::Msb0, ByteOrder::Lsb0] {
                let config = Configuration { byte_order, ..none };
                assert!(is_legal(&config), "{config} should be legal");
            }
        }
    }

    #[test]
    fn test_legal_bases_count_and_order() {
        let bases = legal_bases();
        assert_eq!(bases.len(), 28);
        assert!(bases.iter().all(is_legal));

        // Shape outermost, byte order innermost: the enumeration is sorted.
        let mut sorted = bases.clone();
        sorted.sort();
        assert_eq!(bases, sorted);

        assert_eq!(
            bases[0],
            Configuration::new(
                IteratorShape::Forward,
                BitOrder::Msb0,
                UnitWidth::U8,
                ByteOrder::None,
            )
        );
        assert_eq!(
            bases[1],
            Configuration::new(
                IteratorShape::Forward,
                BitOrder::Msb0,
                UnitWidth::U16,
                ByteOrder::Msb0,
            )
        );
        assert_eq!(
            bases[27],
            Configuration::new(
                IteratorShape::Reverse,
                BitOrder::Lsb0,
                UnitWidth::U64,
                ByteOrder::Lsb0,
            )
        );
    }

    #[test]
    fn test_new_checked_rejects_illegal() {
        let err = Configuration::new_checked(
            IteratorShape::Forward,
            BitOrder::Msb0,
            UnitWidth::U32,
            ByteOrder::None,
        )
        .unwrap_err();
        assert!(matches!(err, SpaceError::Illegal(_)));
        assert!(err.to_string().contains("forward<msb0,u32,none>"));
    }

    #[test]
    fn test_mask_bits_msb_first() {
        assert_eq!(Axis::IteratorShape.mask_bit(), 0b1000);
        assert_eq!(Axis::BitOrder.mask_bit(), 0b0100);
        assert_eq!(Axis::UnitWidth.mask_bit(), 0b0010);
        assert_eq!(Axis::ByteOrder.mask_bit(), 0b0001);
    }

    #[test]
    fn test_differs_on() {
        let a = Configuration::new(
            IteratorShape::Forward,
            BitOrder::Msb0,
            UnitWidth::U8,
            ByteOrder::None,
        );
        let b = Configuration::new(
            IteratorShape::Forward,
            BitOrder::Lsb0,
            UnitWidth::U16,
            ByteOrder::Lsb0,
        );
        assert_eq!(
            a.differs_on(&b),
            vec![Axis::BitOrder, Axis::UnitWidth, Axis::ByteOrder]
        );
        assert!(a.differs_on(&a).is_empty());
    }

    #[test]
    fn test_display() {
        let c = Configuration::new(
            IteratorShape::Reverse,
            BitOrder::Lsb0,
            UnitWidth::U32,
            ByteOrder::Msb0,
        );
        assert_eq!(c.to_string(), "reverse<lsb0,u32,msb0>");
    }
}
