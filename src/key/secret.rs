//! Salted hash segment for secret directories.
//!
//! The hashed string is the fully resolved input path (as routed from the
//! command line) followed by the salt, if any. SHA-1, lowercase hex.

use sha1::{Digest, Sha1};
use std::path::Path;

use crate::config::DirectoryRule;

/// `sha1_hex(input + salt)`.
pub fn hash(input: &str, salt: Option<&str>) -> String {
    let mut hasher = Sha1::new();
    hasher.update(input.as_bytes());
    if let Some(salt) = salt {
        hasher.update(salt.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Secret segment for `path` under `rule`, or `None` for public rules.
pub fn secret_for(path: &Path, rule: &DirectoryRule) -> Option<String> {
    if !rule.secret {
        return None;
    }
    Some(hash(&path.to_string_lossy(), rule.salt.as_deref()))
}
