// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Watch command: copy once, then re-copy whenever a source directory changes.

use crate::commands::copy::{build_plan, run_pass, summary};
use crate::config::Config;
use crate::watcher::{drive, Debounce, FileWatcher, IgnoreRules, SharedIgnoreRules};
use console::style;
use globcopy::{PassReport, SyncPlan};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tokio::signal;

/// Runs an initial pass, then watches the base directories of every glob.
///
/// A failure in the initial pass is returned. Failures in later passes are
/// printed and the watch continues until Ctrl+C.
pub async fn run(
    working_dir: &Path,
    patterns: &[String],
    output: &str,
    config: &Config,
    quiet: bool,
) -> anyhow::Result<()> {
    let plan = Arc::new(build_plan(working_dir, patterns, output, config)?);
    let watch_dirs = plan.watch_dirs();
    let rules: SharedIgnoreRules = Arc::new(RwLock::new(IgnoreRules::for_destination(
        plan.destination(),
        &watch_dirs,
    )));

    let report = run_pass(plan.clone()).await?;
    remember_written(&rules, &report);
    if !quiet {
        println!("{}", style(summary(&report, working_dir)).green());
    }

    let (mut watcher, mut events) = FileWatcher::new(rules.clone())?;
    if register_all(&mut watcher, &watch_dirs, quiet) == 0 {
        eprintln!(
            "{} no directories to watch (literal paths are not watched)",
            style("warning:").yellow().bold()
        );
        return Ok(());
    }

    if !quiet {
        println!("Press Ctrl+C to stop...");
    }

    let debounce = Debounce::new(config.debounce());
    let session = drive(&mut events, debounce, || {
        run_triggered_pass(plan.clone(), rules.clone(), working_dir, quiet)
    });

    tokio::select! {
        _ = session => {}
        result = signal::ctrl_c() => result?,
    }

    if !quiet {
        println!("\nStopping watcher...");
    }
    drop(watcher);
    Ok(())
}

/// Registers a recursive watch on every directory.
///
/// A directory that cannot be watched is reported and skipped. Returns how
/// many directories are being watched.
pub fn register_all(watcher: &mut FileWatcher, dirs: &[PathBuf], quiet: bool) -> usize {
    let mut watched = 0;
    for dir in dirs {
        match watcher.watch(dir) {
            Ok(()) => {
                watched += 1;
                if !quiet {
                    println!("{} {}", style("Watching").cyan(), dir.display());
                }
            }
            Err(e) => {
                tracing::debug!("watch registration failed for {}: {e}", dir.display());
                eprintln!(
                    "{} {}",
                    style("Skipping watch on").yellow(),
                    style(format!("{}: {}", dir.display(), e)).dim()
                );
            }
        }
    }
    watched
}

/// Runs a pass triggered by file changes and reports its outcome.
///
/// A failed pass is printed and does not end the session. Returns true if
/// the pass succeeded.
pub async fn run_triggered_pass(
    plan: Arc<SyncPlan>,
    rules: SharedIgnoreRules,
    working_dir: &Path,
    quiet: bool,
) -> bool {
    match run_pass(plan).await {
        Ok(report) => {
            remember_written(&rules, &report);
            if !quiet {
                println!("{}", style(summary(&report, working_dir)).green());
            }
            true
        }
        Err(e) => {
            tracing::debug!("triggered pass failed: {e:?}");
            eprintln!("{} {:#}", style("✗").red(), e);
            false
        }
    }
}

fn remember_written(rules: &SharedIgnoreRules, report: &PassReport) {
    if let Ok(mut rules) = rules.write() {
        rules.set_written(&report.written);
    }
}
