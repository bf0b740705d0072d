// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Recursive file discovery.
//!
//! [`find_files`] walks a directory tree depth-first using an explicit stack
//! of pending directories and returns every regular file whose path matches
//! a compiled glob.
//!
//! # Matching Rules
//!
//! - Paths are matched relative to the base directory, `/`-separated
//! - Hidden files and directories are matched like any other entry
//! - Symbolic links are neither followed nor matched
//! - Entry order follows `read_dir` and is not sorted

use crate::error::{Result, SyncError};
use crate::path::to_slash;
use globset::GlobMatcher;
use std::fs;
use std::path::{Path, PathBuf};

/// Default limit on how many directory levels below a base directory are
/// searched.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// A source file selected by a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
    /// The resolved source location.
    pub absolute: PathBuf,
    /// Location below the pattern's base directory. Defines where the file
    /// lands under the destination.
    pub relative: PathBuf,
}

/// Options controlling the directory walk.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Maximum number of directory levels to descend below the walk root.
    pub max_depth: usize,
    /// Directories that are never descended into.
    pub exclude: Vec<PathBuf>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            exclude: Vec::new(),
        }
    }
}

impl WalkOptions {
    /// Sets the maximum walk depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Adds a directory that must not be walked.
    pub fn exclude<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.exclude.push(dir.into());
        self
    }

    fn is_excluded(&self, dir: &Path) -> bool {
        self.exclude.iter().any(|excluded| excluded == dir)
    }
}

/// Finds every regular file under `dir` that matches `matcher`.
///
/// `matcher` is tested against each file's path relative to `base`, which
/// is normally `dir` itself. The same relative path is returned with the
/// file.
///
/// # Errors
///
/// Returns [`SyncError::ReadDir`] as soon as any directory or directory
/// entry cannot be read. Nothing is skipped silently.
pub fn find_files(
    dir: &Path,
    base: &Path,
    matcher: &GlobMatcher,
    options: &WalkOptions,
) -> Result<Vec<MatchedFile>> {
    let mut found = Vec::new();
    let mut pending: Vec<(PathBuf, usize)> = vec![(dir.to_path_buf(), 0)];

    while let Some((current, depth)) = pending.pop() {
        let entries = fs::read_dir(&current).map_err(|source| SyncError::ReadDir {
            path: current.clone(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| SyncError::ReadDir {
                path: current.clone(),
                source,
            })?;
            let file_type = entry.file_type().map_err(|source| SyncError::ReadDir {
                path: current.clone(),
                source,
            })?;
            let path = entry.path();

            if file_type.is_dir() {
                if options.is_excluded(&path) {
                    tracing::debug!("skipping excluded directory {}", path.display());
                    continue;
                }
                if depth >= options.max_depth {
                    tracing::warn!(
                        "not descending into {}: deeper than {} levels",
                        path.display(),
                        options.max_depth
                    );
                    continue;
                }
                pending.push((path, depth + 1));
            } else if file_type.is_file() {
                let relative = match path.strip_prefix(base) {
                    Ok(relative) => relative.to_path_buf(),
                    Err(_) => PathBuf::from(entry.file_name()),
                };
                if !matcher.is_match(to_slash(&relative)) {
                    continue;
                }
                tracing::debug!("matched {}", path.display());
                found.push(MatchedFile {
                    absolute: path,
                    relative,
                });
            }
        }
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use globset::GlobBuilder;
    use tempfile::TempDir;

    fn matcher_for(pattern: &str) -> GlobMatcher {
        GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .unwrap()
            .compile_matcher()
    }

    fn relatives(mut files: Vec<MatchedFile>) -> Vec<String> {
        files.sort_by(|a, b| a.relative.cmp(&b.relative));
        files.into_iter().map(|f| to_slash(f.relative)).collect()
    }

    #[test]
    fn test_find_files_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("icons/social")).unwrap();
        fs::write(root.join("icons/home.svg"), "<svg/>").unwrap();
        fs::write(root.join("icons/social/x.svg"), "<svg/>").unwrap();
        fs::write(root.join("icons/readme.md"), "# icons").unwrap();

        let base = root.join("icons");
        let matcher = matcher_for("**/*.svg");
        let files = find_files(&base, &base, &matcher, &WalkOptions::default()).unwrap();

        assert_eq!(relatives(files), vec!["home.svg", "social/x.svg"]);
    }

    #[test]
    fn test_single_star_does_not_cross_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a/nested")).unwrap();
        fs::write(root.join("a/top.txt"), "top").unwrap();
        fs::write(root.join("a/nested/deep.txt"), "deep").unwrap();

        let base = root.join("a");
        let matcher = matcher_for("*.txt");
        let files = find_files(&base, &base, &matcher, &WalkOptions::default()).unwrap();

        assert_eq!(relatives(files), vec!["top.txt"]);
    }

    #[test]
    fn test_dotfiles_are_matched() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("config/.hidden")).unwrap();
        fs::write(root.join("config/.env"), "KEY=1").unwrap();
        fs::write(root.join("config/app.toml"), "").unwrap();
        fs::write(root.join("config/.hidden/inner"), "").unwrap();

        let base = root.join("config");
        let matcher = matcher_for("**/*");
        let files = find_files(&base, &base, &matcher, &WalkOptions::default()).unwrap();

        assert_eq!(relatives(files), vec![".env", ".hidden/inner", "app.toml"]);
    }

    #[test]
    fn test_max_depth_limits_walk() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("tree/one/two")).unwrap();
        fs::write(root.join("tree/a.txt"), "").unwrap();
        fs::write(root.join("tree/one/b.txt"), "").unwrap();
        fs::write(root.join("tree/one/two/c.txt"), "").unwrap();

        let base = root.join("tree");
        let matcher = matcher_for("**/*.txt");
        let options = WalkOptions::default().with_max_depth(1);
        let files = find_files(&base, &base, &matcher, &options).unwrap();

        assert_eq!(relatives(files), vec!["a.txt", "one/b.txt"]);
    }

    #[test]
    fn test_excluded_directory_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("static/out")).unwrap();
        fs::write(root.join("static/site.css"), "").unwrap();
        fs::write(root.join("static/out/site.css"), "").unwrap();

        let base = root.join("static");
        let matcher = matcher_for("**/*.css");
        let options = WalkOptions::default().exclude(root.join("static/out"));
        let files = find_files(&base, &base, &matcher, &options).unwrap();

        assert_eq!(relatives(files), vec!["site.css"]);
    }

    #[test]
    fn test_glob_characters_in_parent_path_are_literal() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("site[v2]{x}/assets");
        fs::create_dir_all(&base).unwrap();
        fs::write(base.join("app.js"), "").unwrap();

        let files = find_files(&base, &base, &matcher_for("*.js"), &WalkOptions::default()).unwrap();

        assert_eq!(relatives(files), vec!["app.js"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        let matcher = matcher_for("*");

        let err = find_files(&missing, &missing, &matcher, &WalkOptions::default()).unwrap_err();
        assert!(matches!(err, SyncError::ReadDir { ref path, .. } if path == &missing));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("links")).unwrap();
        fs::write(root.join("target.txt"), "").unwrap();
        std::os::unix::fs::symlink(root.join("target.txt"), root.join("links/alias.txt")).unwrap();
        fs::write(root.join("links/real.txt"), "").unwrap();

        let base = root.join("links");
        let matcher = matcher_for("*.txt");
        let files = find_files(&base, &base, &matcher, &WalkOptions::default()).unwrap();

        assert_eq!(relatives(files), vec!["real.txt"]);
    }
}
