// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Synchronization passes.
//!
//! A [`SyncPlan`] holds the parsed patterns and the destination. Each call
//! to [`SyncPlan::run_pass`] re-resolves every pattern from scratch, in the
//! order they were given, and copies the result.

use crate::copier::copy_files;
use crate::error::{Result, SyncError};
use crate::finder::{MatchedFile, WalkOptions};
use crate::path::absolutize;
use crate::pattern::{PatternSpec, ResolveWarning};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Outcome of a successful pass.
#[derive(Debug, Clone)]
pub struct PassReport {
    /// Number of files copied. Files matched by several patterns count once
    /// per pattern.
    pub copied: usize,
    /// Destination directory.
    pub destination: PathBuf,
    /// Wall-clock duration of the pass.
    pub elapsed: Duration,
    /// Files the pass wrote. Files that already were their own target are
    /// left out.
    pub written: Vec<PathBuf>,
}

/// Patterns and destination for repeated synchronization passes.
#[derive(Debug, Clone)]
pub struct SyncPlan {
    patterns: Vec<PatternSpec>,
    destination: PathBuf,
    walk: WalkOptions,
}

impl SyncPlan {
    /// Parses every pattern and resolves the destination against `root`.
    ///
    /// The destination directory is excluded from every walk so that copies
    /// landing inside a source tree are not picked up again.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidPattern`] for the first pattern that
    /// fails to compile.
    pub fn new<I, S, D>(root: &Path, patterns: I, destination: D) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        D: AsRef<Path>,
    {
        let patterns = patterns
            .into_iter()
            .map(|raw| PatternSpec::parse(root, raw.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let destination = absolutize(root, destination);

        Ok(Self {
            walk: WalkOptions::default().exclude(destination.clone()),
            patterns,
            destination,
        })
    }

    /// Overrides the walk depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.walk.max_depth = max_depth;
        self
    }

    /// The parsed patterns, in command-line order.
    pub fn patterns(&self) -> &[PatternSpec] {
        &self.patterns
    }

    /// The absolute destination directory.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Unique base directories of all glob patterns, in first-appearance
    /// order. Literal patterns contribute nothing.
    pub fn watch_dirs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        for base in self.patterns.iter().filter_map(PatternSpec::base_dir) {
            if !dirs.iter().any(|d| d == base) {
                dirs.push(base.to_path_buf());
            }
        }
        dirs
    }

    /// Resolves every pattern in order and concatenates the matches.
    ///
    /// Overlapping patterns are not de-duplicated. `on_warning` is called
    /// for each pattern that contributed nothing.
    pub fn resolve<F>(&self, mut on_warning: F) -> Result<Vec<MatchedFile>>
    where
        F: FnMut(&ResolveWarning),
    {
        let mut files = Vec::new();
        for spec in &self.patterns {
            let resolution = spec.resolve(&self.walk)?;
            if let Some(warning) = &resolution.warning {
                on_warning(warning);
            }
            files.extend(resolution.files);
        }
        Ok(files)
    }

    /// Runs one complete pass: resolve, then copy.
    ///
    /// # Errors
    ///
    /// - [`SyncError::NoMatches`] when no pattern selected any file
    /// - [`SyncError::ReadDir`] when a walk fails
    /// - [`SyncError::CreateDir`] / [`SyncError::Copy`] when a write fails
    pub fn run_pass<F>(&self, on_warning: F) -> Result<PassReport>
    where
        F: FnMut(&ResolveWarning),
    {
        let start = Instant::now();
        let files = self.resolve(on_warning)?;

        if files.is_empty() {
            return Err(SyncError::NoMatches {
                patterns: self.patterns.iter().map(|p| p.raw().to_string()).collect(),
            });
        }

        let written = copy_files(&files, &self.destination)?;
        let copied = files.len();
        let elapsed = start.elapsed();
        tracing::info!(
            "copied {} file(s) to {} in {:?}",
            copied,
            self.destination.display(),
            elapsed
        );

        Ok(PassReport {
            copied,
            destination: self.destination.clone(),
            elapsed,
            written,
        })
    }
}
