// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! # globcopy
//!
//! Glob-driven copying of static assets into an output directory.
//!
//! globcopy takes one or more glob patterns (or plain file paths) and a
//! destination, finds the matching files and copies them while keeping the
//! directory layout found below each pattern's base directory.
//!
//! ## Features
//!
//! - Standard glob syntax (`*`, `?`, `[...]`, `**`), dotfiles included
//! - Structure-preserving copies relative to the pattern's base directory
//! - Literal file paths copied by basename
//! - Per-pattern warnings instead of hard failures
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use globcopy::SyncPlan;
//!
//! let root = std::env::current_dir()?;
//! let plan = SyncPlan::new(&root, ["src/icons/**/*.svg", "favicon.ico"], "public")?;
//! let report = plan.run_pass(|warning| eprintln!("{warning}"))?;
//! println!("Copied {} file(s)", report.copied);
//! ```

/// Copying matched files to the destination.
pub mod copier;
/// Error types.
pub mod error;
/// Recursive file discovery.
pub mod finder;
/// Path normalization helpers.
pub mod path;
/// Pattern classification and resolution.
pub mod pattern;
/// Full synchronization passes.
pub mod sync;

pub use copier::copy_files;
pub use error::{Result, SyncError};
pub use finder::{find_files, MatchedFile, WalkOptions, DEFAULT_MAX_DEPTH};
pub use pattern::{glob_base, is_glob, PatternSpec, Resolution, ResolveWarning};
pub use sync::{PassReport, SyncPlan};
