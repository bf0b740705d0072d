// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Error types for synchronization passes.
//!
//! This module defines [`SyncError`], the error enum returned by every
//! fallible operation in the crate.
//!
//! # Error Categories
//!
//! - **Pattern errors**: Glob syntax that cannot be compiled
//! - **Walk errors**: A directory could not be read during discovery
//! - **Copy errors**: A destination directory or file could not be written
//! - **Empty passes**: No pattern matched any file
//!
//! Per-pattern resolution problems (a missing literal file, a missing base
//! directory) are not errors. They are reported as
//! [`ResolveWarning`](crate::ResolveWarning) values and the pass continues.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for globcopy operations.
#[derive(Error, Debug)]
pub enum SyncError {
    /// A glob pattern could not be compiled.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as supplied by the user.
        pattern: String,
        /// The underlying glob compilation error.
        source: globset::Error,
    },

    /// A directory could not be read while searching for files.
    #[error("Cannot read directory {}: {source}", path.display())]
    ReadDir {
        /// Directory being listed.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A destination directory could not be created.
    #[error("Cannot create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A file could not be copied to its destination.
    #[error("Cannot copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        /// Source file.
        from: PathBuf,
        /// Destination file.
        to: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// None of the patterns matched a single file.
    #[error("No files matched: {}", patterns.join(", "))]
    NoMatches {
        /// Every pattern of the pass, in command-line order.
        patterns: Vec<String>,
    },

    /// Any other file I/O error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Convenience type alias for Results with [`SyncError`].
pub type Result<T> = std::result::Result<T, SyncError>;
