// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Copies matched files into the destination tree.

use crate::error::{Result, SyncError};
use crate::finder::MatchedFile;
use std::fs;
use std::path::{Path, PathBuf};

/// Copies every file to `destination/<relative>`.
///
/// Parent directories are created as needed and existing files are always
/// overwritten. Files are copied one at a time; the first failure stops the
/// loop and earlier copies are left in place. A file whose target is the
/// file itself is left untouched.
///
/// Returns the target paths that were written, in copy order. Files already
/// in place are not included.
pub fn copy_files(files: &[MatchedFile], destination: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let target = destination.join(&file.relative);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| SyncError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        if is_same_file(&file.absolute, &target) {
            tracing::debug!("{} is already in place", target.display());
            continue;
        }

        fs::copy(&file.absolute, &target).map_err(|source| SyncError::Copy {
            from: file.absolute.clone(),
            to: target.clone(),
            source,
        })?;
        tracing::debug!("copied {} -> {}", file.absolute.display(), target.display());
        written.push(target);
    }

    Ok(written)
}

/// Returns true if both paths resolve to the same existing file.
///
/// `fs::copy` truncates the target before reading the source, so copying a
/// file onto itself would empty it.
fn is_same_file(source: &Path, target: &Path) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(target)) {
        (Ok(source), Ok(target)) => source == target,
        _ => false,
    }
}
