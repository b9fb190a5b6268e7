//! Object key derivation.
//!
//! Layout:
//!
//! ```text
//! <base_key>/<normalized relative dir>/[<secret>/]<basename>                 original
//! <base_key>/<normalized relative dir>/[<secret>/]sizes/<W>x<H>/<basename>   derivative
//! ```
//!
//! - [`normalize`]: directory slugs
//! - [`secret`]: salted hash segment

pub mod normalize;
pub mod secret;

pub use normalize::normalize;
pub use secret::secret_for;

use std::fmt;
use std::path::{Component, Path};

use crate::config::{DirectoryRule, SizeSpec};

/// Key prefix shared by an original and all of its derivatives.
///
/// Never starts with `/`; ends with exactly one `/` unless empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPrefix(String);

impl KeyPrefix {
    /// Derive the prefix for `file` governed by `rule`.
    ///
    /// The file's directory, relative to `rule.base_path`, is normalized and
    /// appended to `rule.base_key`; the secret segment, if any, comes last.
    pub fn for_file(file: &Path, rule: &DirectoryRule, secret: Option<&str>) -> Self {
        Self::for_dir(file.parent().unwrap_or_else(|| Path::new("")), rule, secret)
    }

    /// Prefix shared by every file directly inside `dir`.
    pub fn for_dir(dir: &Path, rule: &DirectoryRule, secret: Option<&str>) -> Self {
        let relative = relative_dir(dir, &rule.base_path);
        let normalized = normalize(&relative);

        let mut segments: Vec<&str> = rule
            .base_key
            .split('/')
            .chain(normalized.split('/'))
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(secret) = secret {
            segments.push(secret);
        }

        if segments.is_empty() {
            return Self(String::new());
        }
        let mut prefix = segments.join("/");
        prefix.push('/');
        Self(prefix)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key of the original upload.
    pub fn original(&self, basename: &str) -> String {
        format!("{}{}", self.0, basename)
    }

    /// Key of the derivative for `size`.
    pub fn derivative(&self, size: &SizeSpec, basename: &str) -> String {
        format!("{}sizes/{}/{}", self.0, size.id(), basename)
    }
}

impl fmt::Display for KeyPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `dir` relative to `base`, `/`-separated regardless of platform.
///
/// A directory outside `base` is used whole.
fn relative_dir(dir: &Path, base: &Path) -> String {
    let rel = dir.strip_prefix(base).unwrap_or(dir);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn rule(base_path: &str, base_key: &str) -> DirectoryRule {
        DirectoryRule {
            base_path: PathBuf::from(base_path),
            base_key: base_key.into(),
            secret: false,
            salt: None,
        }
    }

    #[test]
    fn test_original_and_derivative_keys() {
        let prefix = KeyPrefix::for_file(
            Path::new("/home/me/Pictures/2023/Trip/a.jpg"),
            &rule("/home/me/Pictures", "photos"),
            None,
        );
        assert_eq!(prefix.as_str(), "photos/2023/trip/");
        assert_eq!(prefix.original("a.jpg"), "photos/2023/trip/a.jpg");
        assert_eq!(
            prefix.derivative(&SizeSpec::new(200, 200), "a.jpg"),
            "photos/2023/trip/sizes/200x200/a.jpg"
        );
    }

    #[test]
    fn test_basename_not_normalized() {
        let prefix = KeyPrefix::for_file(
            Path::new("/p/Été/IMG 001.JPG"),
            &rule("/p", "k"),
            None,
        );
        assert_eq!(prefix.original("IMG 001.JPG"), "k/ete/IMG 001.JPG");
    }

    #[test]
    fn test_secret_segment_after_directory() {
        let prefix = KeyPrefix::for_file(
            Path::new("/p/private/a.jpg"),
            &rule("/p", "photos"),
            Some("abc123"),
        );
        assert_eq!(prefix.as_str(), "photos/private/abc123/");
        assert_eq!(
            prefix.derivative(&SizeSpec::new(10, 20), "a.jpg"),
            "photos/private/abc123/sizes/10x20/a.jpg"
        );
    }

    #[test]
    fn test_prefix_slashes_are_tidy() {
        // File directly in base path, base key with stray slashes
        let prefix = KeyPrefix::for_file(Path::new("/p/a.jpg"), &rule("/p/", "/photos//"), None);
        assert_eq!(prefix.as_str(), "photos/");

        // Empty base key
        let prefix = KeyPrefix::for_file(Path::new("/p/x/a.jpg"), &rule("/p", ""), None);
        assert_eq!(prefix.as_str(), "x/");

        // Nothing at all
        let prefix = KeyPrefix::for_file(Path::new("/p/a.jpg"), &rule("/p", ""), None);
        assert_eq!(prefix.original("a.jpg"), "a.jpg");
    }

    #[test]
    fn test_dir_prefix_matches_its_files() {
        let rule = rule("/p", "photos");
        let dir = KeyPrefix::for_dir(Path::new("/p/Summer Trip"), &rule, Some("s3cr3t"));
        let file = KeyPrefix::for_file(Path::new("/p/Summer Trip/a.jpg"), &rule, Some("s3cr3t"));
        assert_eq!(dir, file);
        assert_eq!(dir.as_str(), "photos/summer-trip/s3cr3t/");
    }

    #[test]
    fn test_prefix_never_leading_slash_single_trailing() {
        for (file, base, key) in [
            ("/a/b/c/d.jpg", "/a", "k"),
            ("/a/b/d.jpg", "/a/b", "/k/"),
            ("/a/My Dir./d.jpg", "/a", "k"),
        ] {
            let prefix = KeyPrefix::for_file(Path::new(file), &rule(base, key), None);
            let s = prefix.as_str();
            assert!(!s.starts_with('/'), "{s}");
            assert!(s.ends_with('/') && !s.ends_with("//"), "{s}");
        }
    }
}
