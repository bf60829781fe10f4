//! Deterministic random streams.
//!
//! Derivation, tie-breaking and fill draws each read their own ChaCha8
//! stream seeded with `global_seed + stage id`, so a change in how many
//! values one stage consumes never shifts another stage's draws.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 1234;

/// A pipeline stage that draws random numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Variant derivation during corpus enumeration.
    Corpus,
    /// Coin flips resolving cross-role duplicates.
    Dedup,
    /// Fill values of non-aliasing scenarios.
    Fill,
}

impl Stage {
    pub fn id(self) -> u64 {
        match self {
            Stage::Corpus => 0,
            Stage::Dedup => 1,
            Stage::Fill => 2,
        }
    }
}

/// Stream for `stage` under `global_seed`.
pub fn stage_rng(global_seed: u64, stage: Stage) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(global_seed.wrapping_add(stage.id()))
}
