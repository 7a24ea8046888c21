use anyhow::{Context, Result};
use gitscribe::utils::error::{GitscribeError, format_error};
use gitscribe::utils::summary::{display_report, display_serialization_summary};
use gitscribe::{cli, run};

fn main() {
    // Determine verbose mode early for error formatting, before args are parsed
    let verbose = cli::args::verbose_requested(std::env::args().skip(1));

    if let Err(e) = run_main() {
        display_error(&e, verbose);
        std::process::exit(1);
    }
}

/// Display an error with contextual formatting.
///
/// Uses rich formatting when the outermost error is a `GitscribeError`, and
/// anyhow's display for everything else, followed by the cause chain.
fn display_error(error: &anyhow::Error, verbose: bool) {
    let outermost = error
        .chain()
        .next()
        .and_then(|e| e.downcast_ref::<GitscribeError>());

    if let Some(gitscribe_error) = outermost {
        eprintln!("{}", format_error(gitscribe_error, verbose));
        if matches!(gitscribe_error, GitscribeError::Usage) {
            return;
        }
    } else {
        eprintln!("\n\u{26a0} Error: {}", error);
    }

    let causes: Vec<_> = error.chain().skip(1).collect();
    if !causes.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in causes.iter().enumerate() {
            let prefix = if i == causes.len() - 1 {
                "\u{2514}\u{2500}"
            } else {
                "\u{251c}\u{2500}"
            };
            eprintln!("{} {}", prefix, cause);
        }
    }
}

fn run_main() -> Result<()> {
    let args = cli::args::parse();

    gitscribe::init_logging(args.verbose, args.quiet);

    // The path gate runs before anything else touches the repository
    let repo_path = cli::args::resolve_from_stdin(args.path.clone())?;

    let config = cli::config::load(&args, &repo_path)?;
    let merged_config = cli::config::merge_config(&args, repo_path, config);

    let report = run(&merged_config)?;

    if let Some(ref output) = merged_config.output {
        std::fs::write(output, &report.prompt)
            .with_context(|| format!("Failed to write prompt to {}", output.display()))?;
        tracing::info!("Prompt written to {}", output.display());
    }

    display_serialization_summary(&report.serialization, merged_config.quiet)?;
    display_report(
        &report,
        merged_config.output.is_none(),
        merged_config.json,
    )?;

    Ok(())
}
