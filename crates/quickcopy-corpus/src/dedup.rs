//! Cross-role deduplication within a bucket.
//!
//! A pair reachable both as a source-varied and a destination-varied
//! derivation would be emitted twice. Each such pair loses occurrences from
//! one collection, picked by a coin flip, until only one role holds it.

use rand::Rng;
use tracing::trace;

use crate::bucket::Bucket;
use crate::pair::{ConfigPair, Role};

/// Unbiased choice of the collection that gives up `pair`.
pub fn tie_break<R: Rng + ?Sized>(pair: &ConfigPair, rng: &mut R) -> Role {
    let role = if rng.gen::<bool>() {
        Role::DestinationVaried
    } else {
        Role::SourceVaried
    };
    trace!(%pair, loser = %role, "tie-break");
    role
}

/// Deduplicate `bucket` using seeded coin flips. Returns the bucket and the
/// number of entries removed.
pub fn dedup_bucket<R: Rng + ?Sized>(bucket: Bucket, rng: &mut R) -> (Bucket, usize) {
    dedup_bucket_with(bucket, |pair| tie_break(pair, rng))
}

/// Deduplicate `bucket`, asking `choose_loser` which role drops an
/// occurrence each time a pair is still present under both roles.
///
/// Pairs are visited in first-appearance order, source-varied entries
/// first. Only the first occurrence is removed per decision, so a pair
/// repeated within one role may take several decisions.
pub fn dedup_bucket_with<F>(mut bucket: Bucket, mut choose_loser: F) -> (Bucket, usize)
where
    F: FnMut(&ConfigPair) -> Role,
{
    let mut removed = 0;

    for pair in bucket.cross_role_duplicates() {
        while bucket.contains(Role::SourceVaried, &pair)
            && bucket.contains(Role::DestinationVaried, &pair)
        {
            let loser = choose_loser(&pair);
            let collection = bucket.collection_mut(loser);
            if let Some(index) = collection.iter().position(|p| *p == pair) {
                collection.remove(index);
                removed += 1;
            }
        }
    }

    (bucket, removed)
}
