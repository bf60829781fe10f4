//! Batching: bounded, order-preserving groups of scenarios.

use quickcopy_corpus::{ConfigPair, CopyKind};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Pairs per generated function unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// How a selected pair sequence is ordered before batching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairOrdering {
    /// Corpus enumeration order.
    #[default]
    Enumeration,
    /// Ascending by (source, destination).
    Sorted,
}

/// One retained pair and its fill value.
///
/// Non-aliasing scenarios always carry a fill bit; aliasing scenarios never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub pair: ConfigPair,
    pub fill: Option<bool>,
}

/// The scenarios compiled into one generated function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub scenarios: Vec<Scenario>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = &ConfigPair> + '_ {
        self.scenarios.iter().map(|s| &s.pair)
    }
}

/// Apply `ordering` to a selected pair sequence.
pub fn order_pairs(pairs: &[ConfigPair], ordering: PairOrdering) -> Vec<ConfigPair> {
    let mut ordered = pairs.to_vec();
    if ordering == PairOrdering::Sorted {
        ordered.sort();
    }
    ordered
}

/// Split `pairs` into batches of at most `batch_size` consecutive input
/// pairs.
///
/// Within a batch, a pair equal to the previously retained one is dropped,
/// so a batch can hold fewer than `batch_size` scenarios. Fill bits are
/// drawn from `rng` for each retained non-aliasing pair, in order.
pub fn plan_batches<R: Rng + ?Sized>(
    pairs: &[ConfigPair],
    kind: CopyKind,
    batch_size: usize,
    rng: &mut R,
) -> Vec<Batch> {
    pairs
        .chunks(batch_size.max(1))
        .map(|chunk| {
            let mut scenarios: Vec<Scenario> = Vec::with_capacity(chunk.len());
            for pair in chunk {
                if scenarios.last().is_some_and(|prev| prev.pair == *pair) {
                    continue;
                }
                let fill = match kind {
                    CopyKind::NonAliasing => Some(rng.gen::<bool>()),
                    CopyKind::Aliasing => None,
                };
                scenarios.push(Scenario { pair: *pair, fill });
            }
            Batch { scenarios }
        })
        .collect()
}
