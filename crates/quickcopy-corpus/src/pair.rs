use std::fmt;

use quickcopy_space::Configuration;
use serde::{Deserialize, Serialize};

/// Which side of a pair was derived from the base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Derived configuration is the source, base is the destination.
    SourceVaried,
    /// Base is the source, derived configuration is the destination.
    DestinationVaried,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::SourceVaried, Role::DestinationVaried];

    /// Short name used in generated identifiers.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::SourceVaried => "srcs",
            Role::DestinationVaried => "dests",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Role::SourceVaried => Role::DestinationVaried,
            Role::DestinationVaried => Role::SourceVaried,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One copy scenario: copy from `source` into `destination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConfigPair {
    pub source: Configuration,
    pub destination: Configuration,
}

impl ConfigPair {
    pub fn new(source: Configuration, destination: Configuration) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Place `base` and `derived` on the sides `role` assigns them.
    pub fn for_role(role: Role, base: Configuration, derived: Configuration) -> Self {
        match role {
            Role::SourceVaried => Self::new(derived, base),
            Role::DestinationVaried => Self::new(base, derived),
        }
    }

    /// Both sides walk the same storage unit width.
    pub fn same_width(&self) -> bool {
        self.source.width == self.destination.width
    }
}

impl fmt::Display for ConfigPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}
