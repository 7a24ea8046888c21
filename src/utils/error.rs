// Copyright (c) 2025-2026 the gitscribe contributors
// SPDX-License-Identifier: Apache-2.0

use console::style;
use thiserror::Error;

/// Usage text shown when no repository path can be resolved.
pub const USAGE: &str = "Usage: gitscribe <repo_path>\n   or: echo <repo_path> | gitscribe";

#[derive(Debug, Error)]
pub enum GitscribeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Repository error: {0}")]
    Repository(#[from] git2::Error),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    #[error("{USAGE}")]
    Usage,

    #[error("Validation error: {message}\nSuggestion: {suggestion}")]
    ValidationError { message: String, suggestion: String },
}

impl GitscribeError {
    pub fn missing_repository(path: &std::path::Path) -> Self {
        GitscribeError::ValidationError {
            message: format!("The repository path '{}' does not exist.", path.display()),
            suggestion: "Pass the path of a local git working copy".to_string(),
        }
    }

    pub fn unknown_model(model: &str, known: &[&str]) -> Self {
        GitscribeError::ValidationError {
            message: format!("No pricing available for model '{}'", model),
            suggestion: format!(
                "Use one of: {}, or add a [[pricing]] entry to gitscribe.toml",
                known.join(", ")
            ),
        }
    }

    pub fn invalid_glob(pattern: &str, reason: impl std::fmt::Display) -> Self {
        GitscribeError::ValidationError {
            message: format!("Invalid exclude pattern '{}': {}", pattern, reason),
            suggestion: "Exclude patterns use glob syntax, e.g. 'docs/**' or '*.lock'".to_string(),
        }
    }
}

impl From<config::ConfigError> for GitscribeError {
    fn from(err: config::ConfigError) -> Self {
        GitscribeError::Config(err.to_string())
    }
}

/// Render an error for the terminal.
///
/// Usage errors print the bare usage text so scripts see the same message the
/// tool prints on a bad invocation. Verbose mode adds the debug representation.
pub fn format_error(error: &GitscribeError, verbose: bool) -> String {
    let mut out = match *error {
        GitscribeError::Usage => USAGE.to_string(),
        GitscribeError::ValidationError {
            ref message,
            ref suggestion,
        } => format!(
            "{} {}\n{} {}",
            style("Error:").red().bold(),
            message,
            style("Suggestion:").yellow(),
            suggestion
        ),
        _ => format!("{} {}", style("Error:").red().bold(), error),
    };

    if verbose {
        out.push_str(&format!("\n\nDetails: {:?}", error));
    }

    out
}
