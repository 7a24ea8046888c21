use crate::utils::error::GitscribeError;
use clap::Parser;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;

/// CLI argument parsing with environment variable support.
///
/// Environment variables follow the pattern `GITSCRIBE_*` and are overridden by CLI flags.
#[derive(Parser, Debug)]
#[command(name = "gitscribe")]
#[command(
    about = "Serialize a git repository snapshot into an analysis prompt and estimate its token cost"
)]
#[command(version)]
pub struct Args {
    /// Path to a local git repository (read from stdin when omitted)
    pub path: Option<PathBuf>,

    /// Model used for token counting and pricing
    #[arg(short, long, env = "GITSCRIBE_MODEL")]
    pub model: Option<String>,

    /// Config file path
    #[arg(short, long, default_value = "gitscribe.toml", env = "GITSCRIBE_CONFIG")]
    pub config: PathBuf,

    /// Exclude paths matching a glob (repeatable)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Keep lines that start with a comment marker
    #[arg(long)]
    pub keep_comments: bool,

    /// Skip files longer than this many characters
    #[arg(long)]
    pub max_file_chars: Option<usize>,

    /// Write the prompt to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the token and cost report as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short)]
    pub quiet: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

/// Whether raw arguments ask for verbose output, for use before clap runs.
///
/// Matches `--verbose` and any `-v` cluster such as `-vv`.
pub fn verbose_requested<I, S>(args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter().any(|arg| {
        let arg = arg.as_ref();
        arg == "--verbose"
            || arg
                .strip_prefix('-')
                .is_some_and(|flags| !flags.is_empty() && flags.chars().all(|c| c == 'v'))
    })
}

/// Resolve the repository path from the positional argument or stdin.
///
/// An interactive stdin counts as empty so the tool never waits on a terminal.
/// The resolved path must exist.
pub fn resolve_repository_path(
    arg: Option<PathBuf>,
    mut stdin: impl Read,
    stdin_is_terminal: bool,
) -> Result<PathBuf, GitscribeError> {
    let path = match arg {
        Some(path) if !path.as_os_str().is_empty() => path,
        _ => {
            let mut input = String::new();
            if !stdin_is_terminal {
                stdin.read_to_string(&mut input)?;
            }
            let trimmed = input.trim();
            if trimmed.is_empty() {
                return Err(GitscribeError::Usage);
            }
            PathBuf::from(trimmed)
        }
    };

    if !path.exists() {
        return Err(GitscribeError::missing_repository(&path));
    }

    Ok(path)
}

/// [`resolve_repository_path`] against the process's stdin.
pub fn resolve_from_stdin(arg: Option<PathBuf>) -> Result<PathBuf, GitscribeError> {
    let stdin = std::io::stdin();
    let is_terminal = stdin.is_terminal();
    resolve_repository_path(arg, stdin.lock(), is_terminal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "gitscribe",
            "repo",
            "--model",
            "gpt-4o",
            "--exclude",
            "docs/**",
            "--exclude",
            "*.lock",
            "--keep-comments",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.path, Some(PathBuf::from("repo")));
        assert_eq!(args.model.as_deref(), Some("gpt-4o"));
        assert_eq!(args.exclude, ["docs/**", "*.lock"]);
        assert!(args.keep_comments);
        assert_eq!(args.verbose, 2);
        assert!(!args.quiet);
    }

    #[test]
    fn test_path_from_argument() {
        let dir = tempfile::tempdir().unwrap();
        let path =
            resolve_repository_path(Some(dir.path().to_path_buf()), &b""[..], false).unwrap();
        assert_eq!(path, dir.path());
    }

    #[test]
    fn test_path_from_stdin_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let input = format!("  {}\n", dir.path().display());
        let path = resolve_repository_path(None, input.as_bytes(), false).unwrap();
        assert_eq!(path, dir.path());
    }

    #[test]
    fn test_missing_path_is_usage_error() {
        let result = resolve_repository_path(None, &b"   \n"[..], false);
        assert!(matches!(result, Err(GitscribeError::Usage)));
    }

    #[test]
    fn test_terminal_stdin_is_not_read() {
        let result = resolve_repository_path(None, &b"/tmp\n"[..], true);
        assert!(matches!(result, Err(GitscribeError::Usage)));
    }

    #[test]
    fn test_nonexistent_path_is_rejected() {
        let result = resolve_repository_path(
            Some(PathBuf::from("/definitely/not/a/repo/path")),
            &b""[..],
            false,
        );
        assert!(matches!(
            result,
            Err(GitscribeError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_verbose_requested_matches_clusters() {
        assert!(verbose_requested(["repo", "-v"]));
        assert!(verbose_requested(["-vv", "repo"]));
        assert!(verbose_requested(["--verbose"]));
        assert!(!verbose_requested(["repo", "-q"]));
        assert!(!verbose_requested(["-", "--version", "-vq"]));
    }

    #[test]
    fn test_verbose_long_flag_counts() {
        let args = Args::try_parse_from(["gitscribe", "--verbose", "--verbose", "repo"]).unwrap();
        assert_eq!(args.verbose, 2);
    }
}
