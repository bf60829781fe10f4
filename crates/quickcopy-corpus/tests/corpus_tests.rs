use quickcopy_corpus::{build_corpus, enumerate, CopyKind, Role};
use quickcopy_space::{is_legal, legal_bases, stage_rng, Stage, DEFAULT_SEED};

#[test]
fn test_no_cross_role_duplicates_after_dedup() {
    for seed in [0, 1, DEFAULT_SEED, u64::MAX] {
        let result = build_corpus(seed);
        for kind in CopyKind::ALL {
            let bucket = result.corpus.bucket(kind);
            let sources = bucket.collection(Role::SourceVaried);
            for pair in bucket.collection(Role::DestinationVaried) {
                assert!(
                    !sources.contains(pair),
                    "seed {seed}: {pair} in both roles of {kind}"
                );
            }
        }
    }
}

#[test]
fn test_build_is_deterministic() {
    let first = build_corpus(DEFAULT_SEED);
    let second = build_corpus(DEFAULT_SEED);
    assert_eq!(first.corpus, second.corpus);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn test_different_seeds_change_the_corpus() {
    let first = build_corpus(1);
    let second = build_corpus(2);
    assert_ne!(first.corpus, second.corpus);
}

#[test]
fn test_every_pair_is_legal_and_aliasing_shares_width() {
    let result = build_corpus(DEFAULT_SEED);
    for kind in CopyKind::ALL {
        for role in Role::ALL {
            for pair in result.corpus.select(kind, role) {
                assert!(is_legal(&pair.source) && is_legal(&pair.destination));
                if kind.is_aliasing() {
                    assert!(pair.same_width(), "{pair}");
                }
            }
        }
    }
}

#[test]
fn test_stats_account_for_every_attempt() {
    let result = build_corpus(DEFAULT_SEED);
    let stats = &result.stats;

    assert_eq!(stats.bases, 28);
    assert_eq!(stats.attempts, 28 * 16 * 2);

    // Each of the 4 `none` bases fails on the 8 masks that split the width
    // and byte order intents, once per role.
    assert_eq!(stats.failed, 4 * 8 * 2);

    let succeeded = stats.attempts - stats.failed;
    let non_aliasing = result.corpus.bucket(CopyKind::NonAliasing).len();
    let aliasing = result.corpus.bucket(CopyKind::Aliasing).len();

    let mut rng = stage_rng(DEFAULT_SEED, Stage::Corpus);
    let (raw, _) = enumerate(&legal_bases(), &mut rng);
    assert_eq!(raw.non_aliasing.len(), succeeded);
    assert_eq!(
        non_aliasing + aliasing + stats.deduplicated,
        raw.non_aliasing.len() + raw.aliasing.len()
    );
}

#[test]
fn test_corpus_serializes_by_bucket_and_role() {
    let corpus = build_corpus(DEFAULT_SEED).corpus;
    let json = serde_json::to_value(&corpus).unwrap();
    let dests = json["aliasing"]["destination_varied"].as_array().unwrap();
    let selected = corpus.select(CopyKind::Aliasing, Role::DestinationVaried);
    assert_eq!(dests.len(), selected.len());
    assert!(json["non_aliasing"]["source_varied"].is_array());
}
