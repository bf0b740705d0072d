// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! globcopy CLI library.
//!
//! This crate provides the command-line interface for globcopy: a one-shot
//! copy command and a watch mode that re-copies on every source change.
//!
//! # Usage
//!
//! This crate is primarily used through the `globcopy` binary:
//!
//! ```bash
//! globcopy "src/icons/**/*.svg" favicon.ico public    # copy once
//! globcopy -w "vendor/*.js" public/js                 # copy and keep watching
//! ```
//!
//! # Configuration
//!
//! Optional settings are read from `globcopy.toml` in the working directory.

/// CLI commands (copy, watch).
pub mod commands;
/// Configuration from `globcopy.toml`.
pub mod config;
/// File system watching and debouncing.
pub mod watcher;
