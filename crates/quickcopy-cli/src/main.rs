//! `quickcopy`: generate randomized bit iterator copy test suites.
//!
//! **Usage:**
//! ```text
//! quickcopy generate <srcs|dests> [plain|const] [--kinds both|aliasing|non-aliasing]
//!                    [--seed N] [--batch-size N] [--sorted] [--config FILE] [--out FILE]
//! quickcopy driver [--config FILE] [--out FILE]
//! quickcopy corpus [--seed N] [--config FILE] [--out FILE]
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use quickcopy_corpus::{build_corpus, CopyKind, Role};
use quickcopy_emit::{
    generate_suite, render_driver, Constness, GeneratorConfig, PairOrdering, SuiteRequest,
};
use tracing::{info, level_filters::LevelFilter};

#[derive(Parser)]
#[command(
    name = "quickcopy",
    about = "Generate randomized bit iterator copy test suites"
)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the suite for one role and constness.
    Generate {
        /// Which side of each pair varies around the base configuration.
        #[arg(value_enum)]
        role: RoleArg,

        /// Source iterator the entry point instantiates batches with.
        #[arg(value_enum, default_value_t = ConstnessArg::Plain)]
        constness: ConstnessArg,

        /// Copy kinds to emit.
        #[arg(long, value_enum, default_value_t = KindsArg::Both)]
        kinds: KindsArg,

        /// Maximum pairs per generated function.
        #[arg(long)]
        batch_size: Option<usize>,

        /// Sort pairs before batching instead of keeping enumeration order.
        #[arg(long)]
        sorted: bool,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Generate the bandit driver that runs every entry point.
    Driver {
        /// JSON generator config supplying the header and range count.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output file. Defaults to stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Dump the deduplicated corpus and its statistics as JSON.
    Corpus {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Global seed; overrides the config file.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON generator config. Missing fields take defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Srcs,
    Dests,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Role {
        match arg {
            RoleArg::Srcs => Role::SourceVaried,
            RoleArg::Dests => Role::DestinationVaried,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ConstnessArg {
    Plain,
    Const,
}

impl From<ConstnessArg> for Constness {
    fn from(arg: ConstnessArg) -> Constness {
        match arg {
            ConstnessArg::Plain => Constness::Plain,
            ConstnessArg::Const => Constness::Const,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum KindsArg {
    Both,
    Aliasing,
    NonAliasing,
}

impl KindsArg {
    fn kinds(self) -> &'static [CopyKind] {
        match self {
            KindsArg::Both => &CopyKind::ALL,
            KindsArg::Aliasing => &[CopyKind::Aliasing],
            KindsArg::NonAliasing => &[CopyKind::NonAliasing],
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate {
            role,
            constness,
            kinds,
            batch_size,
            sorted,
            common,
        } => {
            let mut config = load_config(common.config.as_deref(), common.seed)?;
            if let Some(batch_size) = batch_size {
                config.batch_size = batch_size;
            }
            if sorted {
                config.ordering = PairOrdering::Sorted;
            }

            let request = SuiteRequest::new(role.into(), constness.into());
            let request = request.with_kinds(kinds.kinds());
            let suite = generate_suite(&config, &request, &config.renderer())?;
            info!(
                seed = config.seed,
                attempts = suite.stats.attempts,
                failed = suite.stats.failed,
                deduplicated = suite.stats.deduplicated,
                "corpus statistics"
            );
            write_output(common.out.as_deref(), &suite.text)
        }
        Commands::Driver { config, out } => {
            let config = load_config(config.as_deref(), None)?;
            let text = render_driver(&config.header, config.range_count, &Role::ALL);
            write_output(out.as_deref(), &text)
        }
        Commands::Corpus { common } => {
            let config = load_config(common.config.as_deref(), common.seed)?;
            let result = build_corpus(config.seed);
            let dump = serde_json::json!({
                "seed": config.seed,
                "stats": result.stats,
                "corpus": result.corpus,
            });
            let mut text =
                serde_json::to_string_pretty(&dump).context("failed to encode corpus")?;
            text.push('\n');
            write_output(common.out.as_deref(), &text)
        }
    }
}

/// Config file values (or defaults), then command-line overrides.
fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<GeneratorConfig> {
    let mut config = match path {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

fn write_output(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = text.len(), "wrote output");
            Ok(())
        }
        None => std::io::stdout()
            .write_all(text.as_bytes())
            .context("failed to write to stdout"),
    }
}
