//! Emitter: turn selected corpus collections into batched test functions.
//!
//! Planning ([`batch`], [`suite`]) produces a typed [`SuitePlan`]; rendering
//! ([`render`], [`driver`]) turns it into source text. [`pipeline`] is the
//! single stage that runs corpus building, planning and rendering in order.

pub mod batch;
pub mod driver;
pub mod pipeline;
pub mod render;
pub mod suite;

pub use batch::{order_pairs, plan_batches, Batch, PairOrdering, Scenario, DEFAULT_BATCH_SIZE};
pub use driver::render_driver;
pub use pipeline::{
    generate_suite, plan_suite, ConfigError, GeneratedSuite, GeneratorConfig, SuiteRequest,
};
pub use render::{BanditRenderer, Renderer};
pub use suite::{Constness, Section, SuitePlan};
