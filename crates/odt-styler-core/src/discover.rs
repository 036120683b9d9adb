//! Expand a shell-style glob into the list of files to process.

use std::path::{Path, PathBuf};

use globset::GlobBuilder;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{CoreError, Result};

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Resolve `pattern` to the regular files it matches, sorted by path.
///
/// `*` and `?` never cross a `/`; `**` does. A relative pattern is resolved
/// against the current directory and its matches are reported relative to it.
pub fn discover(pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| CoreError::InvalidGlob {
            pattern: pattern.to_string(),
            source,
        })?
        .compile_matcher();

    let components: Vec<&str> = pattern.split('/').collect();
    let literal = components
        .iter()
        .position(|component| component.contains(GLOB_META))
        .unwrap_or(components.len());
    if literal == components.len() {
        let path = PathBuf::from(pattern);
        return Ok(if path.is_file() { vec![path] } else { Vec::new() });
    }

    let root = literal_root(&components[..literal], pattern.starts_with('/'));
    let mut walker = WalkDir::new(&root).min_depth(1).follow_links(true);
    if !pattern.contains("**") {
        walker = walker.max_depth(components.len() - literal);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!(%error, "skipping unreadable path");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = display_path(entry.path(), &root);
        if matcher.is_match(&path) {
            files.push(path);
        }
    }
    files.sort();
    debug!(pattern, root = %root.display(), file_count = files.len(), "resolved file pattern");
    Ok(files)
}

fn literal_root(components: &[&str], absolute: bool) -> PathBuf {
    let joined = components.join("/");
    if joined.is_empty() {
        PathBuf::from(if absolute { "/" } else { "." })
    } else {
        PathBuf::from(joined)
    }
}

fn display_path(path: &Path, root: &Path) -> PathBuf {
    if root == Path::new(".") {
        path.strip_prefix(".").unwrap_or(path).to_path_buf()
    } else {
        path.to_path_buf()
    }
}
