//! Enumeration of every legal base under every mask.
//!
//! The pipeline:
//! 1. Walk legal bases in fixed axis order, masks ascending.
//! 2. Derive once per role; failed derivations are skipped.
//! 3. File each pair under the non-aliasing bucket, and under the aliasing
//!    bucket too when the mask keeps the unit width.
//! 4. Resolve cross-role duplicates once per bucket.

use quickcopy_space::{derive, legal_bases, stage_rng, Axis, Configuration, Mask, Stage};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::bucket::{CopyKind, Corpus};
use crate::dedup::dedup_bucket;
use crate::pair::{ConfigPair, Role};

/// Counters gathered while building a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    /// Legal bases enumerated.
    pub bases: usize,
    /// Derivations attempted (bases x masks x roles).
    pub attempts: usize,
    /// Derivations that had no legal result.
    pub failed: usize,
    /// Pairs removed by the dedup pass, across both buckets.
    pub deduplicated: usize,
}

/// Result of building the full corpus.
#[derive(Debug, Clone)]
pub struct CorpusResult {
    pub corpus: Corpus,
    pub stats: CorpusStats,
}

/// Enumerate `bases` x all masks into an undeduplicated corpus.
///
/// Draws come from `rng` in traversal order: base, then mask, then
/// source-varied before destination-varied.
pub fn enumerate<R: Rng + ?Sized>(bases: &[Configuration], rng: &mut R) -> (Corpus, CorpusStats) {
    let mut corpus = Corpus::default();
    let mut stats = CorpusStats {
        bases: bases.len(),
        ..CorpusStats::default()
    };

    for base in bases {
        for mask in Mask::all() {
            for role in Role::ALL {
                stats.attempts += 1;
                let derived = match derive(base, mask, rng) {
                    Ok(derived) => derived,
                    Err(err) => {
                        stats.failed += 1;
                        trace!(%base, %mask, %role, %err, "skipping derivation");
                        continue;
                    }
                };

                let pair = ConfigPair::for_role(role, *base, derived);
                corpus.non_aliasing.push(role, pair);

                if mask.matches(Axis::UnitWidth) {
                    debug_assert!(pair.same_width());
                    corpus.aliasing.push(role, pair);
                }
            }
        }
    }

    (corpus, stats)
}

/// Build the deduplicated corpus over all legal bases for `seed`.
///
/// Enumeration and dedup draw from separate stage streams.
pub fn build_corpus(seed: u64) -> CorpusResult {
    let mut corpus_rng = stage_rng(seed, Stage::Corpus);
    let (mut corpus, mut stats) = enumerate(&legal_bases(), &mut corpus_rng);

    let mut dedup_rng = stage_rng(seed, Stage::Dedup);
    for kind in [CopyKind::NonAliasing, CopyKind::Aliasing] {
        let bucket = std::mem::take(corpus.bucket_mut(kind));
        let (bucket, removed) = dedup_bucket(bucket, &mut dedup_rng);
        debug!(%kind, removed, remaining = bucket.len(), "deduplicated bucket");
        stats.deduplicated += removed;
        *corpus.bucket_mut(kind) = bucket;
    }

    debug!(
        seed,
        bases = stats.bases,
        attempts = stats.attempts,
        failed = stats.failed,
        deduplicated = stats.deduplicated,
        "built corpus"
    );

    CorpusResult { corpus, stats }
}
