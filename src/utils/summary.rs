// Copyright (c) 2025-2026 the gitscribe contributors
// SPDX-License-Identifier: Apache-2.0

//! Rendering of run results.
//!
//! The prompt and the token/cost lines are the program's output and go to
//! stdout. The serialization summary is a diagnostic and goes to stderr.

use crate::RunReport;
use crate::packer::{SerializeReport, SkippedEntry};
use crate::utils::formatting::format_number;
use anyhow::Result;
use console::{Term, style};
use serde::Serialize;
use std::io::Write;

/// Machine-readable form of the token and cost report.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    model: &'a str,
    token_count: usize,
    cost: f64,
    files_included: usize,
    directories_included: usize,
    skipped: &'a [SkippedEntry],
}

/// The plain `Count:` / `Cost:` lines printed after the prompt.
pub fn render_totals(report: &RunReport) -> String {
    format!(
        "Count: {}\nCost: ${:.6}",
        report.token_count, report.cost.total_cost
    )
}

/// The token and cost report as pretty-printed JSON.
pub fn render_json(report: &RunReport) -> Result<String> {
    let json = JsonReport {
        model: &report.model,
        token_count: report.token_count,
        cost: report.cost.total_cost,
        files_included: report.serialization.files_included,
        directories_included: report.serialization.directories_included,
        skipped: &report.serialization.skipped,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Write the prompt (unless it went to a file) and the totals to stdout.
pub fn display_report(report: &RunReport, print_prompt: bool, json: bool) -> Result<()> {
    let mut term = Term::stdout();

    if print_prompt {
        writeln!(term, "{}", report.prompt)?;
    }

    if json {
        writeln!(term, "{}", render_json(report)?)?;
    } else {
        writeln!(term, "{}", render_totals(report))?;
    }

    Ok(())
}

/// Display a tree-formatted summary of what was serialized and skipped.
///
/// # Errors
///
/// Returns an error if writing to the terminal fails.
pub fn display_serialization_summary(report: &SerializeReport, quiet: bool) -> Result<()> {
    if quiet {
        return Ok(());
    }

    let mut term = Term::stderr();
    let failures = report.failures().count();
    let skipped = report.skipped.len();

    writeln!(term)?;
    writeln!(term, "{}", style("Serialization Summary:").bold())?;
    writeln!(
        term,
        "{} Directories: {}",
        style("\u{251c}\u{2500}").dim(),
        format_number(report.directories_included)
    )?;
    writeln!(
        term,
        "{} Files: {}",
        style("\u{251c}\u{2500}").dim(),
        format_number(report.files_included)
    )?;
    writeln!(
        term,
        "{} Skipped: {}",
        style("\u{251c}\u{2500}").dim(),
        format_number(skipped.saturating_sub(failures))
    )?;

    let errors = if failures == 0 {
        style(format_number(failures)).green()
    } else {
        style(format_number(failures)).red()
    };
    writeln!(term, "{} Errors: {}", style("\u{2514}\u{2500}").dim(), errors)?;

    for (i, entry) in report.failures().enumerate() {
        let prefix = if i + 1 == failures {
            "\u{2514}\u{2500}"
        } else {
            "\u{251c}\u{2500}"
        };
        writeln!(
            term,
            "   {} {}: {}",
            style(prefix).dim(),
            entry.path,
            entry.reason
        )?;
    }

    Ok(())
}
