// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Path normalization helpers.
//!
//! Glob matching works on `/`-separated strings, so every path that is
//! matched against a pattern goes through [`to_slash`] first, and every
//! pattern goes through [`normalize_separators`].

use std::path::{Component, Path, PathBuf};

/// Converts a Path to a normalized string with forward slashes.
/// On Windows, uses path components to rebuild with `/` separators.
#[inline]
pub fn to_slash<P: AsRef<Path>>(path: P) -> String {
    #[cfg(windows)]
    {
        let path = path.as_ref();
        let mut result = String::new();
        for component in path.components() {
            match component {
                Component::Prefix(p) => result.push_str(&p.as_os_str().to_string_lossy()),
                Component::RootDir => result.push('/'),
                other => {
                    if !result.is_empty() && !result.ends_with('/') {
                        result.push('/');
                    }
                    result.push_str(&other.as_os_str().to_string_lossy());
                }
            }
        }
        result
    }
    #[cfg(not(windows))]
    {
        path.as_ref().to_string_lossy().to_string()
    }
}

/// Replaces every backslash with a forward slash.
pub fn normalize_separators(input: &str) -> String {
    input.replace('\\', "/")
}

/// Removes `.` components and folds `..` into its parent without touching
/// the filesystem.
///
/// `..` at the root of an absolute path is dropped; leading `..` of a
/// relative path is kept.
pub fn lexical_normalize<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Resolves `path` against `root` unless it is already absolute, then
/// normalizes it lexically.
pub fn absolutize<P: AsRef<Path>>(root: &Path, path: P) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        lexical_normalize(path)
    } else {
        lexical_normalize(root.join(path))
    }
}
