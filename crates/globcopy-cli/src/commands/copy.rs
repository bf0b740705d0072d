// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! One-shot copy command.

use crate::config::Config;
use console::style;
use globcopy::{PassReport, ResolveWarning, SyncPlan};
use std::path::Path;
use std::sync::Arc;

/// Builds the synchronization plan for the given arguments.
pub fn build_plan(
    working_dir: &Path,
    patterns: &[String],
    output: &str,
    config: &Config,
) -> anyhow::Result<SyncPlan> {
    let plan = SyncPlan::new(working_dir, patterns, output)?.with_max_depth(config.walk.max_depth);
    Ok(plan)
}

/// Prints a resolution warning to stderr.
pub fn print_warning(warning: &ResolveWarning) {
    eprintln!("{} {}", style("warning:").yellow().bold(), warning);
}

/// Formats the one-line summary of a completed pass.
///
/// The destination is shown relative to `working_dir` when it lies inside
/// it.
pub fn summary(report: &PassReport, working_dir: &Path) -> String {
    let destination = report
        .destination
        .strip_prefix(working_dir)
        .ok()
        .filter(|relative| !relative.as_os_str().is_empty())
        .unwrap_or(&report.destination);
    format!(
        "Copied {} file(s) to {} ({:.2}s)",
        report.copied,
        destination.display(),
        report.elapsed.as_secs_f64()
    )
}

/// Runs one pass on the blocking pool, printing warnings as they come.
pub async fn run_pass(plan: Arc<SyncPlan>) -> anyhow::Result<PassReport> {
    let report = tokio::task::spawn_blocking(move || plan.run_pass(print_warning)).await??;
    Ok(report)
}

/// Copies every matching file once.
pub async fn run(
    working_dir: &Path,
    patterns: &[String],
    output: &str,
    config: &Config,
    quiet: bool,
) -> anyhow::Result<()> {
    let plan = Arc::new(build_plan(working_dir, patterns, output, config)?);
    let report = run_pass(plan).await?;

    if !quiet {
        println!("{}", style(summary(&report, working_dir)).green());
    }
    Ok(())
}
