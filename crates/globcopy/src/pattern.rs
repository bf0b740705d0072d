// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Pattern classification and resolution.
//!
//! Every command-line argument becomes a [`PatternSpec`]: either a literal
//! file path or a glob with a precomputed base directory. Resolving a spec
//! yields the files it selects plus, at most, one [`ResolveWarning`].
//!
//! # Base Directories
//!
//! The base directory of a glob is the deepest directory in the pattern
//! that contains no wildcard. It scopes the filesystem walk and anchors the
//! relative paths of the matched files:
//!
//! | Pattern              | Base directory |
//! |----------------------|----------------|
//! | `src/**/*.svg`       | `src`          |
//! | `assets/img-*.png`   | `assets`       |
//! | `*.txt`              | working root   |

use crate::error::{Result, SyncError};
use crate::finder::{find_files, MatchedFile, WalkOptions};
use crate::path::{absolutize, normalize_separators, to_slash};
use globset::{GlobBuilder, GlobMatcher};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Characters that turn a path into a glob.
pub const WILDCARDS: [char; 4] = ['*', '?', '[', ']'];

/// Returns true if `pattern` contains any wildcard character.
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(WILDCARDS)
}

/// Computes the base directory of a glob pattern.
///
/// The prefix before the first wildcard is cut back to its last `/`, so a
/// partial segment such as `foo/ba*r` yields `foo`. The result is made
/// absolute against `root`. A pattern without wildcards resolves to its
/// parent directory.
pub fn glob_base(root: &Path, pattern: &str) -> PathBuf {
    let normalized = normalize_separators(pattern);
    let prefix = match normalized.find(WILDCARDS) {
        Some(index) => &normalized[..index],
        None => normalized.trim_end_matches('/'),
    };

    match prefix.rfind('/') {
        Some(slash) => absolutize(root, &prefix[..=slash]),
        None => absolutize(root, "."),
    }
}

/// A classified command-line pattern.
#[derive(Debug, Clone)]
pub enum PatternSpec {
    /// A plain path to a single file.
    Literal {
        /// The argument as given.
        raw: String,
        /// Absolute path of the file.
        path: PathBuf,
    },
    /// A wildcard pattern.
    Glob {
        /// The argument as given.
        raw: String,
        /// `/`-separated remainder of the pattern below `base_dir`.
        pattern: String,
        /// Deepest wildcard-free ancestor directory.
        base_dir: PathBuf,
        /// Compiled matcher for `pattern`, tested against paths relative to
        /// `base_dir`.
        matcher: GlobMatcher,
    },
}

impl PatternSpec {
    /// Classifies `raw` and precomputes everything a pass needs.
    ///
    /// Relative arguments are resolved against `root`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidPattern`] if a glob cannot be compiled.
    pub fn parse(root: &Path, raw: &str) -> Result<Self> {
        let normalized = normalize_separators(raw);

        if !is_glob(&normalized) {
            return Ok(PatternSpec::Literal {
                raw: raw.to_string(),
                path: absolutize(root, &normalized),
            });
        }

        // Only the part below the base directory is compiled, so glob
        // characters in the directory names above it stay literal.
        let base_dir = glob_base(root, &normalized);
        let absolute = absolutize(root, &normalized);
        let pattern = to_slash(absolute.strip_prefix(&base_dir).unwrap_or(&absolute));
        let matcher = GlobBuilder::new(&pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| SyncError::InvalidPattern {
                pattern: raw.to_string(),
                source,
            })?
            .compile_matcher();

        Ok(PatternSpec::Glob {
            raw: raw.to_string(),
            pattern,
            base_dir,
            matcher,
        })
    }

    /// The argument this spec was built from.
    pub fn raw(&self) -> &str {
        match self {
            PatternSpec::Literal { raw, .. } | PatternSpec::Glob { raw, .. } => raw,
        }
    }

    /// Base directory for globs, `None` for literal paths.
    pub fn base_dir(&self) -> Option<&Path> {
        match self {
            PatternSpec::Literal { .. } => None,
            PatternSpec::Glob { base_dir, .. } => Some(base_dir),
        }
    }

    /// Returns true for wildcard patterns.
    pub fn is_glob(&self) -> bool {
        matches!(self, PatternSpec::Glob { .. })
    }

    /// Finds the files this pattern selects right now.
    ///
    /// Missing literal files and missing base directories produce a warning
    /// and no files.
    ///
    /// # Errors
    ///
    /// Propagates directory read failures from the walk.
    pub fn resolve(&self, options: &WalkOptions) -> Result<Resolution> {
        match self {
            PatternSpec::Literal { raw, path } => Ok(resolve_literal(raw, path)),
            PatternSpec::Glob {
                raw,
                base_dir,
                matcher,
                ..
            } => {
                if !base_dir.is_dir() {
                    return Ok(Resolution::warn(ResolveWarning::MissingBaseDir {
                        pattern: raw.clone(),
                        base_dir: base_dir.clone(),
                    }));
                }

                let files = find_files(base_dir, base_dir, matcher, options)?;
                tracing::debug!("pattern '{}' matched {} file(s)", raw, files.len());
                if files.is_empty() {
                    return Ok(Resolution::warn(ResolveWarning::NoMatches {
                        pattern: raw.clone(),
                    }));
                }
                Ok(Resolution {
                    files,
                    warning: None,
                })
            }
        }
    }
}

fn resolve_literal(raw: &str, path: &Path) -> Resolution {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => {
            let relative = path
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| path.to_path_buf());
            Resolution {
                files: vec![MatchedFile {
                    absolute: path.to_path_buf(),
                    relative,
                }],
                warning: None,
            }
        }
        Ok(_) => Resolution::warn(ResolveWarning::NotAFile {
            pattern: raw.to_string(),
            path: path.to_path_buf(),
        }),
        Err(_) => Resolution::warn(ResolveWarning::MissingFile {
            pattern: raw.to_string(),
            path: path.to_path_buf(),
        }),
    }
}

/// Files selected by one pattern.
#[derive(Debug, Default)]
pub struct Resolution {
    /// Matched files, in walk order.
    pub files: Vec<MatchedFile>,
    /// Why the pattern contributed nothing, if it did not.
    pub warning: Option<ResolveWarning>,
}

impl Resolution {
    fn warn(warning: ResolveWarning) -> Self {
        Self {
            files: Vec::new(),
            warning: Some(warning),
        }
    }
}

/// A recoverable, per-pattern resolution problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveWarning {
    /// A literal path does not exist.
    MissingFile {
        /// The argument as given.
        pattern: String,
        /// Resolved path that was checked.
        path: PathBuf,
    },
    /// A literal path exists but is not a regular file.
    NotAFile {
        /// The argument as given.
        pattern: String,
        /// Resolved path that was checked.
        path: PathBuf,
    },
    /// The base directory of a glob does not exist.
    MissingBaseDir {
        /// The argument as given.
        pattern: String,
        /// The base directory that was checked.
        base_dir: PathBuf,
    },
    /// A glob was walked but selected no file.
    NoMatches {
        /// The argument as given.
        pattern: String,
    },
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveWarning::MissingFile { pattern, path } => {
                write!(f, "File not found: {} ({})", pattern, path.display())
            }
            ResolveWarning::NotAFile { pattern, path } => {
                write!(f, "Not a file: {} ({})", pattern, path.display())
            }
            ResolveWarning::MissingBaseDir { pattern, base_dir } => {
                write!(
                    f,
                    "Base directory does not exist for pattern {}: {}",
                    pattern,
                    base_dir.display()
                )
            }
            ResolveWarning::NoMatches { pattern } => {
                write!(f, "No files match pattern: {}", pattern)
            }
        }
    }
}
