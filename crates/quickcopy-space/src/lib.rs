//! The four-axis configuration space of bit iterators.
//!
//! - [`option`]: axes, their value sets, [`Configuration`] and the legality rule.
//! - [`mask`]: per-axis match/differ selectors.
//! - [`derive`]: the variant generator that derives a legal neighbor of a base.
//! - [`rng`]: per-stage deterministic RNG streams.

pub mod derive;
pub mod mask;
pub mod option;
pub mod rng;

pub use derive::{derive, DeriveError};
pub use mask::{Intent, Mask};
pub use option::{
    is_legal, legal_bases, Axis, BitOrder, ByteOrder, Configuration, IteratorShape, SpaceError,
    UnitWidth,
};
pub use rng::{stage_rng, Stage, DEFAULT_SEED};
