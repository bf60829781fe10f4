//! Corpus builder: enumerate (base, mask) derivations into role-qualified
//! buckets and resolve cross-role duplicates.

pub mod bucket;
pub mod build;
pub mod dedup;
pub mod pair;

pub use bucket::{Bucket, CopyKind, Corpus};
pub use build::{build_corpus, enumerate, CorpusResult, CorpusStats};
pub use dedup::{dedup_bucket, dedup_bucket_with, tie_break};
pub use pair::{ConfigPair, Role};
