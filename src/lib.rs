//! # gitscribe
//!
//! Turns the committed snapshot of a git repository into a single analysis
//! prompt and estimates what sending it would cost.
//!
//! The pipeline runs in four steps:
//!
//! 1. **Validate** - resolve the model's pricing and build the ignore policy
//! 2. **Snapshot** - load the HEAD commit tree through libgit2
//! 3. **Serialize** - walk the tree into a `<repository>` markup document
//! 4. **Estimate** - interpolate the prompt, count tokens, price them
//!
//! Every fatal condition is detected in step 1 or while opening the
//! repository, before any file is read. Problems with individual files are
//! reported in the [`packer::SerializeReport`] and never fail the run.
//!
//! Configuration follows hierarchical precedence:
//! 1. User config (~/.config/gitscribe/config.toml)
//! 2. Git root (gitscribe.toml)
//! 3. Current directory (gitscribe.toml)
//! 4. Explicit --config path
//! 5. Environment variables (GITSCRIBE_*)
//! 6. CLI flags (highest precedence)

pub mod cli;
pub mod generator;
pub mod llm;
pub mod packer;
pub mod utils;

use anyhow::{Context, Result};
use llm::cost::{CostCalculator, CostEstimate};
use llm::pricing::{ModelPricing, PricingTable};
use llm::tokenizer::{TiktokenTokenizer, Tokenizer};
use packer::{GitSnapshot, SerializeReport, SerializerPolicy, TreeSerializer};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Final resolved configuration after merging all sources (CLI, env, config files).
#[derive(Debug, Clone)]
pub struct MergedConfig {
    /// Repository path to process
    pub path: PathBuf,
    /// Model identifier used for token counting and pricing
    pub model: String,
    /// Disable comment-line stripping
    pub keep_comments: bool,
    /// Per-file character limit
    pub max_file_chars: usize,
    /// Directory names ignored in addition to the defaults
    pub ignore_directories: Vec<String>,
    /// File names ignored in addition to the defaults
    pub ignore_files: Vec<String>,
    /// Extensions ignored in addition to the defaults
    pub ignore_extensions: Vec<String>,
    /// Glob patterns matched against slash paths
    pub exclude: Vec<String>,
    /// Pricing overrides from config files
    pub pricing: Vec<ModelPricing>,
    /// Write the prompt here instead of stdout
    pub output: Option<PathBuf>,
    /// Print the report as JSON
    pub json: bool,
    /// Verbosity level (0-2)
    pub verbose: u8,
    /// Quiet mode (warnings and errors only)
    pub quiet: bool,
}

impl MergedConfig {
    /// Configuration with defaults for everything but the path.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            model: llm::pricing::DEFAULT_MODEL.to_string(),
            keep_comments: false,
            max_file_chars: packer::policy::DEFAULT_MAX_FILE_CHARS,
            ignore_directories: Vec::new(),
            ignore_files: Vec::new(),
            ignore_extensions: Vec::new(),
            exclude: Vec::new(),
            pricing: Vec::new(),
            output: None,
            json: false,
            verbose: 0,
            quiet: false,
        }
    }

    /// Build the serializer policy from the defaults plus configured additions.
    pub fn policy(&self) -> Result<SerializerPolicy, utils::error::GitscribeError> {
        let mut builder = SerializerPolicy::builder()
            .ignore_directories(self.ignore_directories.iter().cloned())
            .ignore_files(self.ignore_files.iter().cloned())
            .ignore_extensions(self.ignore_extensions.iter().cloned())
            .exclude(self.exclude.iter().cloned())
            .max_file_chars(self.max_file_chars);
        if self.keep_comments {
            builder = builder.comment_markers(Vec::<String>::new());
        }
        builder.build()
    }
}

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub model: String,
    pub prompt: String,
    pub token_count: usize,
    pub cost: CostEstimate,
    pub serialization: SerializeReport,
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity flags. Calling this more
/// than once keeps the first subscriber.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Run the pipeline for a resolved configuration.
pub fn run(config: &MergedConfig) -> Result<RunReport> {
    tracing::info!("gitscribe v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        "Configuration: model={}, keep_comments={}, max_file_chars={}, exclude={:?}",
        config.model,
        config.keep_comments,
        config.max_file_chars,
        config.exclude
    );

    // Validate
    if !config.path.exists() {
        return Err(utils::error::GitscribeError::missing_repository(&config.path).into());
    }
    let pricing = PricingTable::builtin()
        .with_overrides(&config.pricing)
        .lookup(&config.model)?;
    let policy = config.policy()?;
    let serializer = TreeSerializer::new(policy)?;
    let tokenizer = TiktokenTokenizer::for_model(&config.model)?;

    // Snapshot
    tracing::info!("Analyzing repository: {}", config.path.display());
    let snapshot = GitSnapshot::open(&config.path)
        .with_context(|| format!("Failed to open git repository at {}", config.path.display()))?;
    let root = snapshot
        .head_tree()
        .context("Failed to read the HEAD commit tree")?;

    // Serialize
    let document = serializer.serialize_repository(&root);
    drop(root);

    // Estimate
    let prompt = generator::build_analysis_prompt(&document.text);
    let token_count = tokenizer.count_tokens(&prompt);
    let cost = CostCalculator::new(pricing).estimate_prompt_cost(token_count);

    tracing::debug!(
        tokens = token_count,
        cost = cost.total_cost,
        "Prompt estimated"
    );

    Ok(RunReport {
        model: config.model.clone(),
        prompt,
        token_count,
        cost,
        serialization: document.report,
    })
}
