//! Maps input paths onto directory rules.
//!
//! Each CLI path is resolved to an absolute path, matched against the
//! configured `[[dirs]]`, checked for existence and classified as a single
//! file or a directory of images.


use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::DirectoryRule;
use crate::key::secret_for;
use crate::utils::path::resolve_path;

/// Per-path routing failures. None of these stop the batch.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("`{0}` is not inside any configured directory")]
    NoRule(PathBuf),

    #[error("`{0}` does not exist")]
    NotFound(PathBuf),

    #[error("can't read `{0}`")]
    Io(PathBuf, #[source] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Directory,
    File,
}

/// A resolved CLI path and the rule that governs it.
#[derive(Debug, Clone)]
pub struct RoutedInput<'a> {
    /// Absolute, lexically normalized path.
    pub path: PathBuf,
    /// Position of `rule` in the configured `dirs`.
    pub rule_index: usize,
    pub rule: &'a DirectoryRule,
    /// Salted hash segment; shared by every file of a directory input.
    pub secret: Option<String>,
    pub kind: InputKind,
}

impl RoutedInput<'_> {
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }
}

/// Last rule whose `base_path` is a component-wise prefix of `path`.
pub fn match_rule<'a>(path: &Path, rules: &'a [DirectoryRule]) -> Option<(usize, &'a DirectoryRule)> {
    rules
        .iter()
        .enumerate()
        .rev()
        .find(|(_, rule)| path.starts_with(&rule.base_path))
}

/// Resolve and route one CLI path.
///
/// The rule check happens before the filesystem is touched, so an
/// unconfigured path reports [`RouteError::NoRule`] even if it is missing.
pub async fn route<'a>(input: &Path, rules: &'a [DirectoryRule]) -> Result<RoutedInput<'a>, RouteError> {
    let path = resolve_path(input);

    let (rule_index, rule) = match_rule(&path, rules).ok_or_else(|| RouteError::NoRule(path.clone()))?;

    let metadata = match tokio::fs::metadata(&path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(RouteError::NotFound(path)),
        Err(e) => return Err(RouteError::Io(path, e)),
    };
    let kind = if metadata.is_dir() {
        InputKind::Directory
    } else {
        InputKind::File
    };

    let secret = secret_for(&path, rule);

    Ok(RoutedInput {
        path,
        rule_index,
        rule,
        secret,
        kind,
    })
}

/// Regular files directly inside `dir` whose name ends with `ext`
/// (case-insensitive), sorted by file name.
///
/// Symlinks are followed; subdirectories are not descended into.
pub async fn list_images(dir: &Path, ext: &str) -> Result<Vec<PathBuf>, RouteError> {
    let io_err = |e| RouteError::Io(dir.to_path_buf(), e);

    let mut entries = tokio::fs::read_dir(dir).await.map_err(io_err)?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
        let path = entry.path();
        if !has_extension(&path, ext) {
            continue;
        }
        // Dangling symlinks and the like are skipped, not fatal
        match tokio::fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => files.push(path),
            _ => {}
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// `true` if `path`'s file name ends with `ext`, ignoring case.
///
/// A plain suffix test: `scanjpg` and `.jpg` both match `jpg`. An empty
/// `ext` matches nothing.
pub fn has_extension(path: &Path, ext: &str) -> bool {
    if ext.is_empty() {
        return false;
    }
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .is_some_and(|name| name.ends_with(&ext.to_lowercase()))
}
