//! Role-qualified pair collections, one bucket per copy kind.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pair::{ConfigPair, Role};

/// Whether source and destination may overlap in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyKind {
    /// Overlapping buffers. Both sides need the same unit width.
    Aliasing,
    NonAliasing,
}

impl CopyKind {
    /// Non-aliasing first: the order sections are generated in.
    pub const ALL: [CopyKind; 2] = [CopyKind::NonAliasing, CopyKind::Aliasing];

    pub fn is_aliasing(self) -> bool {
        self == CopyKind::Aliasing
    }
}

impl fmt::Display for CopyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyKind::Aliasing => f.write_str("aliasing"),
            CopyKind::NonAliasing => f.write_str("non-aliasing"),
        }
    }
}

/// Pairs of one copy kind, split by which side was derived.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub source_varied: Vec<ConfigPair>,
    pub destination_varied: Vec<ConfigPair>,
}

impl Bucket {
    pub fn collection(&self, role: Role) -> &[ConfigPair] {
        match role {
            Role::SourceVaried => &self.source_varied,
            Role::DestinationVaried => &self.destination_varied,
        }
    }

    pub(crate) fn collection_mut(&mut self, role: Role) -> &mut Vec<ConfigPair> {
        match role {
            Role::SourceVaried => &mut self.source_varied,
            Role::DestinationVaried => &mut self.destination_varied,
        }
    }

    pub fn push(&mut self, role: Role, pair: ConfigPair) {
        self.collection_mut(role).push(pair);
    }

    pub fn contains(&self, role: Role, pair: &ConfigPair) -> bool {
        self.collection(role).contains(pair)
    }

    /// Total pairs across both roles, duplicates included.
    pub fn len(&self) -> usize {
        self.source_varied.len() + self.destination_varied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Distinct pairs present under both roles, in first-appearance order
    /// (source-varied entries first).
    pub fn cross_role_duplicates(&self) -> Vec<ConfigPair> {
        let destinations: HashSet<&ConfigPair> = self.destination_varied.iter().collect();
        let mut seen = HashSet::new();
        self.source_varied
            .iter()
            .filter(|pair| destinations.contains(pair) && seen.insert(**pair))
            .copied()
            .collect()
    }
}

/// The four role-qualified collections a run can select from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    pub aliasing: Bucket,
    pub non_aliasing: Bucket,
}

impl Corpus {
    pub fn bucket(&self, kind: CopyKind) -> &Bucket {
        match kind {
            CopyKind::Aliasing => &self.aliasing,
            CopyKind::NonAliasing => &self.non_aliasing,
        }
    }

    pub fn bucket_mut(&mut self, kind: CopyKind) -> &mut Bucket {
        match kind {
            CopyKind::Aliasing => &mut self.aliasing,
            CopyKind::NonAliasing => &mut self.non_aliasing,
        }
    }

    /// The ordered pair sequence for one (kind, role) generation target.
    pub fn select(&self, kind: CopyKind, role: Role) -> &[ConfigPair] {
        self.bucket(kind).collection(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcopy_space::legal_bases;

    #[test]
    fn test_cross_role_duplicates_distinct_and_ordered() {
        let bases = legal_bases();
        let a = ConfigPair::new(bases[0], bases[1]);
        let b = ConfigPair::new(bases[2], bases[3]);
        let c = ConfigPair::new(bases[4], bases[5]);

        let bucket = Bucket {
            source_varied: vec![b, a, b, c],
            destination_varied: vec![a, b, b],
        };

        assert_eq!(bucket.cross_role_duplicates(), vec![b, a]);
        assert_eq!(bucket.len(), 7);
        assert!(bucket.contains(Role::SourceVaried, &c));
        assert!(!bucket.contains(Role::DestinationVaried, &c));
    }

    #[test]
    fn test_select_routes_to_collection() {
        let bases = legal_bases();
        let pair = ConfigPair::new(bases[0], bases[0]);
        let mut corpus = Corpus::default();
        corpus
            .bucket_mut(CopyKind::Aliasing)
            .push(Role::DestinationVaried, pair);

        let dests = corpus.select(CopyKind::Aliasing, Role::DestinationVaried);
        assert_eq!(dests, &[pair]);
        let srcs = corpus.select(CopyKind::Aliasing, Role::SourceVaried);
        assert!(srcs.is_empty());
        assert!(corpus.non_aliasing.is_empty());
    }
}
