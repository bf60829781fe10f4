//! Top-level generation pipeline and its configuration.
//!
//! 1. Build the deduplicated corpus for the configured seed.
//! 2. Select and order the requested (kind, role) collections.
//! 3. Plan batches, drawing fill bits from the fill stage stream.
//! 4. Render the plan.

use std::path::Path;

use quickcopy_corpus::{build_corpus, CopyKind, Corpus, CorpusStats, Role};
use quickcopy_space::{stage_rng, Stage, DEFAULT_SEED};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::batch::{order_pairs, plan_batches, PairOrdering, DEFAULT_BATCH_SIZE};
use crate::render::{BanditRenderer, Renderer};
use crate::suite::{Constness, Section, SuitePlan};

/// Errors in generator configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("batch size must be at least 1")]
    ZeroBatchSize,

    #[error("wrap column {0} leaves no room for descriptions")]
    WrapColumnTooSmall(usize),

    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Knobs shared by every generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Global seed every stage stream derives from.
    pub seed: u64,
    /// Maximum consecutive input pairs per generated function.
    pub batch_size: usize,
    /// Ordering applied to a selected collection before batching.
    pub ordering: PairOrdering,
    /// Header the generated suite includes.
    pub header: String,
    /// Column description literals wrap at.
    pub wrap_column: usize,
    /// Size of the quick-test range table the driver declares.
    pub range_count: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            batch_size: DEFAULT_BATCH_SIZE,
            ordering: PairOrdering::Enumeration,
            header: "test_bit_iterator_copy_quick.hpp".to_string(),
            wrap_column: 80,
            range_count: 1000,
        }
    }
}

/// Narrowest wrap column that still fits the `it(` prefix and a word.
const MIN_WRAP_COLUMN: usize = 20;

impl GeneratorConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if self.wrap_column < MIN_WRAP_COLUMN {
            return Err(ConfigError::WrapColumnTooSmall(self.wrap_column));
        }
        Ok(())
    }

    pub fn renderer(&self) -> BanditRenderer {
        BanditRenderer {
            header: self.header.clone(),
            wrap_column: self.wrap_column,
        }
    }
}

/// Which suite to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteRequest {
    pub role: Role,
    pub constness: Constness,
    /// Copy kinds to emit, in section order, without repeats.
    pub kinds: Vec<CopyKind>,
}

impl SuiteRequest {
    /// Request both copy kinds, non-aliasing first.
    pub fn new(role: Role, constness: Constness) -> Self {
        Self {
            role,
            constness,
            kinds: CopyKind::ALL.to_vec(),
        }
    }

    /// Restrict the request to `kinds`, keeping first occurrences only.
    pub fn with_kinds(mut self, kinds: &[CopyKind]) -> Self {
        self.kinds.clear();
        for &kind in kinds {
            if !self.kinds.contains(&kind) {
                self.kinds.push(kind);
            }
        }
        self
    }
}

/// Output of a full generation run.
#[derive(Debug, Clone)]
pub struct GeneratedSuite {
    pub plan: SuitePlan,
    pub text: String,
    pub stats: CorpusStats,
}

/// Plan the batches of `request` over an already built corpus.
pub fn plan_suite(corpus: &Corpus, request: &SuiteRequest, config: &GeneratorConfig) -> SuitePlan {
    let mut fill_rng = stage_rng(config.seed, Stage::Fill);
    let role = request.role;

    let sections = request
        .kinds
        .iter()
        .map(|&kind| {
            let selected = order_pairs(corpus.select(kind, role), config.ordering);
            let batches = plan_batches(&selected, kind, config.batch_size, &mut fill_rng);
            debug!(
                %kind,
                %role,
                pairs = selected.len(),
                batches = batches.len(),
                "planned section"
            );
            Section { kind, batches }
        })
        .collect();

    SuitePlan {
        constness: request.constness,
        role: request.role,
        sections,
    }
}

/// Build the corpus, plan `request` and render it.
pub fn generate_suite(
    config: &GeneratorConfig,
    request: &SuiteRequest,
    renderer: &dyn Renderer,
) -> Result<GeneratedSuite, ConfigError> {
    config.validate()?;

    let result = build_corpus(config.seed);
    let plan = plan_suite(&result.corpus, request, config);
    let text = renderer.render(&plan);

    info!(
        entry = %plan.entry_name(),
        batches = plan.batch_count(),
        scenarios = plan.scenario_count(),
        "generated suite"
    );

    Ok(GeneratedSuite {
        plan,
        text,
        stats: result.stats,
    })
}
