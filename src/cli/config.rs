//! Configuration management using the `config` crate for hierarchical discovery and merging.
//!
//! ## Configuration Sources (in precedence order, highest to lowest):
//! 1. **CLI flags**
//! 2. **Environment variables** (`GITSCRIBE_*`, `__` separates nested keys,
//!    e.g. `GITSCRIBE_GENERAL__MODEL`; list keys are comma-separated, e.g.
//!    `GITSCRIBE_IGNORE__EXCLUDE=docs/**,*.lock`)
//! 3. **Config files**
//!
//! ## Config File Discovery (in merge order, later overrides earlier):
//! 1. `~/.config/gitscribe/config.toml`
//! 2. `gitscribe.toml` in the work tree root of the analyzed repository
//! 3. `./gitscribe.toml`
//! 4. Explicit `--config` path
//!
//! ```toml
//! [general]
//! model = "gpt-4o"
//! keep_comments = false
//! max_file_chars = 100000
//!
//! [ignore]
//! directories = ["target"]
//! extensions = ["webp"]
//! exclude = ["docs/**"]
//!
//! [[pricing]]
//! model = "local-llama"
//! input_per_1k = 0.0
//! ```

use crate::MergedConfig;
use crate::cli::args::Args;
use crate::llm::pricing::{DEFAULT_MODEL, ModelPricing};
use crate::packer::policy::DEFAULT_MAX_FILE_CHARS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "gitscribe.toml";

/// Keys whose environment values are split on commas.
const LIST_KEYS: [&str; 4] = [
    "ignore.directories",
    "ignore.files",
    "ignore.extensions",
    "ignore.exclude",
];

/// Root configuration structure loaded from config files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ignore: IgnoreConfig,
    #[serde(default)]
    pub pricing: Vec<ModelPricing>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub model: Option<String>,
    #[serde(default)]
    pub keep_comments: bool,
    pub max_file_chars: Option<usize>,
}

/// Additions to the built-in ignore policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IgnoreConfig {
    #[serde(default)]
    pub directories: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn discover_config_paths(explicit_path: &Path, repo_path: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(user_config) = get_user_config_path() {
        paths.push(user_config);
    }

    if let Some(git_root) = find_git_root(repo_path) {
        let git_config = git_root.join(CONFIG_FILE_NAME);
        if git_config.exists() {
            paths.push(git_config);
        }
    }

    let current_dir_config = PathBuf::from(CONFIG_FILE_NAME);
    if current_dir_config.exists() && !paths.iter().any(|p| same_file(p, &current_dir_config)) {
        paths.push(current_dir_config);
    }

    if explicit_path != Path::new(CONFIG_FILE_NAME) {
        paths.push(explicit_path.to_path_buf());
    }

    paths
}

/// Work tree root of the repository containing `repo_path`.
fn find_git_root(repo_path: &Path) -> Option<PathBuf> {
    git2::Repository::discover(repo_path)
        .ok()
        .and_then(|repo| repo.workdir().map(Path::to_path_buf))
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn get_user_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|config_dir| config_dir.join("gitscribe").join("config.toml"))
        .filter(|path| path.exists())
}

/// Load configuration from discovered config files and environment variables.
///
/// An explicit `--config` path that does not exist is an error; discovered
/// files are only used when present.
pub fn load(args: &Args, repo_path: &Path) -> Result<Config> {
    let paths = discover_config_paths(&args.config, repo_path);
    tracing::debug!(?paths, "Config files");
    load_from(&paths)
}

pub fn load_from(paths: &[PathBuf]) -> Result<Config> {
    load_with_environment(paths, environment())
}

/// The `GITSCRIBE_*` source. List keys take comma-separated values.
fn environment() -> config::Environment {
    let mut env = config::Environment::with_prefix("GITSCRIBE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",");
    for key in LIST_KEYS {
        env = env.with_list_parse_key(key);
    }
    env
}

fn load_with_environment(paths: &[PathBuf], env: config::Environment) -> Result<Config> {
    let mut builder = config::Config::builder();

    for config_path in paths {
        builder = builder.add_source(config::File::from(config_path.as_path()));
    }

    builder = builder.add_source(env);

    let settings = builder.build().context("Failed to build configuration")?;

    settings
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

/// Merge CLI arguments over file and environment configuration.
pub fn merge_config(args: &Args, repo_path: PathBuf, config: Config) -> MergedConfig {
    let Config {
        general,
        ignore,
        pricing,
    } = config;

    let mut exclude = ignore.exclude;
    exclude.extend(args.exclude.iter().cloned());

    MergedConfig {
        path: repo_path,
        model: args
            .model
            .clone()
            .or(general.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        keep_comments: args.keep_comments || general.keep_comments,
        max_file_chars: args
            .max_file_chars
            .or(general.max_file_chars)
            .unwrap_or(DEFAULT_MAX_FILE_CHARS),
        ignore_directories: ignore.directories,
        ignore_files: ignore.files,
        ignore_extensions: ignore.extensions,
        exclude,
        pricing,
        output: args.output.clone(),
        json: args.json,
        verbose: args.verbose,
        quiet: args.quiet,
    }
}
