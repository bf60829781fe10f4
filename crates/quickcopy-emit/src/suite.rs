//! Structured form of one generated suite, independent of its text.

use std::fmt;

use quickcopy_corpus::{CopyKind, Role};
use serde::{Deserialize, Serialize};

use crate::batch::Batch;

/// Whether the source iterator under test is mutable or const.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constness {
    #[default]
    Plain,
    Const,
}

impl Constness {
    pub const ALL: [Constness; 2] = [Constness::Plain, Constness::Const];

    /// Prefix inserted into generated identifiers.
    pub fn prefix(self) -> &'static str {
        match self {
            Constness::Plain => "",
            Constness::Const => "const_",
        }
    }

    /// Iterator template the entry point instantiates its batches with.
    pub fn iterator_template(self) -> &'static str {
        match self {
            Constness::Plain => "bitter::bit_iterator",
            Constness::Const => "bitter::const_bit_iterator",
        }
    }
}

impl fmt::Display for Constness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constness::Plain => f.write_str("plain"),
            Constness::Const => f.write_str("const"),
        }
    }
}

/// All batches generated for one copy kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub kind: CopyKind,
    pub batches: Vec<Batch>,
}

/// Everything one generated translation unit contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuitePlan {
    pub constness: Constness,
    pub role: Role,
    pub sections: Vec<Section>,
}

impl SuitePlan {
    /// Name of the entry point registering every batch.
    pub fn entry_name(&self) -> String {
        entry_name(self.constness, self.role)
    }

    /// Name of the `index`-th (1-based) batch function of `kind`.
    pub fn batch_fn_name(&self, kind: CopyKind, index: usize) -> String {
        let non = if kind.is_aliasing() { "" } else { "non_" };
        format!(
            "test_{non}aliasing_copy_quick_{}{}_impl_{index}",
            self.constness.prefix(),
            self.role.as_str()
        )
    }

    /// Every batch function, paired with its batch, in generation order.
    pub fn batch_fns(&self) -> Vec<(String, &Section, &Batch)> {
        let mut fns = Vec::with_capacity(self.batch_count());
        for section in &self.sections {
            for (i, batch) in section.batches.iter().enumerate() {
                let name = self.batch_fn_name(section.kind, i + 1);
                fns.push((name, section, batch));
            }
        }
        fns
    }

    pub fn batch_count(&self) -> usize {
        self.sections.iter().map(|s| s.batches.len()).sum()
    }

    pub fn scenario_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.batches)
            .map(Batch::len)
            .sum()
    }
}

/// Entry point name for a (constness, role) combination.
pub fn entry_name(constness: Constness, role: Role) -> String {
    format!("test_copy_quick_{}{}", constness.prefix(), role.as_str())
}
