//! `[[dirs]]` directory rules.
//!
//! Each rule maps a local directory tree onto a key prefix in the bucket.
//!
//! # Example
//!
//! ```toml
//! [[dirs]]
//! base_path = "~/Pictures/public"   # Local root (`~` and config-relative paths allowed)
//! base_key = "photos"               # Key prefix in the bucket
//!
//! [[dirs]]
//! base_path = "~/Pictures/family"
//! base_key = "photos"
//! secret = true                     # Insert a salted hash segment into keys
//! salt = "pepper"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::path::{absolutize, expand_tilde};

/// Maps files under `base_path` to keys under `base_key`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DirectoryRule {
    /// Filesystem prefix this rule governs. Absolute after loading.
    pub base_path: PathBuf,
    /// Object-store key prefix.
    #[serde(default)]
    pub base_key: String,
    /// Obscure directory names behind a salted hash segment.
    #[serde(default)]
    pub secret: bool,
    /// Salt appended to the hashed path.
    #[serde(default)]
    pub salt: Option<String>,
}

impl DirectoryRule {
    /// Expand `~` and resolve relative base paths against `root`.
    pub fn normalize(&mut self, root: &Path) {
        let expanded = expand_tilde(&self.base_path);
        self.base_path = absolutize(&expanded, root);
    }

    /// Validate one rule; `index` is its position in `dirs`.
    pub fn validate(&self, index: usize, diag: &mut ConfigDiagnostics) {
        if self.base_path.as_os_str().is_empty() {
            diag.error(
                FieldPath::indexed("dirs", index, "base_path"),
                "`base_path` is required",
            );
        }

        if self.secret && self.salt.as_deref().is_none_or(str::is_empty) {
            diag.warn(
                FieldPath::indexed("dirs", index, "salt"),
                "secret directory without salt: hash is derived from the path alone",
            );
        }

        if !self.secret && self.salt.is_some() {
            diag.warn(
                FieldPath::indexed("dirs", index, "salt"),
                "`salt` has no effect unless `secret = true`",
            );
        }
    }
}
