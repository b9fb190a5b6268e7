//! Filesystem path resolution.
//!
//! - `expand_tilde` - `~/` expansion via `shellexpand`
//! - `absolutize` - make a path absolute against a base directory, lexically
//! - `resolve_path` - both of the above against the current directory

use std::path::{Component, Path, PathBuf};

/// Expand a leading `~` to the user's home directory.
///
/// Paths that are not valid UTF-8 are returned unchanged.
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    }
}

/// Make `path` absolute against `base` and remove `.`/`..` components.
///
/// Purely lexical: symlinks are not followed and the path need not exist,
/// so prefix matching against configured base paths sees what the user typed.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `pop` refuses to remove the root
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolve a user-supplied path (absolute, `~/`-relative or cwd-relative)
/// to an absolute path.
pub fn resolve_path(path: &Path) -> PathBuf {
    let expanded = expand_tilde(path);
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
    absolutize(&expanded, &cwd)
}
