//! In-memory collaborators for pipeline and batch tests.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use crate::config::SizeSpec;
use crate::image::{ResizeError, Resizer};
use crate::store::{ObjectStore, StoreError, UploadBody};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpload {
    pub key: String,
    pub body: UploadBody,
    pub content_type: String,
}

/// Records every upload; keys in `failing` are rejected.
#[derive(Default)]
pub struct MemoryStore {
    uploads: Mutex<Vec<RecordedUpload>>,
    failing: HashSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(keys: &[&str]) -> Self {
        Self {
            failing: keys.iter().map(|k| k.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn keys(&self) -> Vec<String> {
        self.uploads().into_iter().map(|u| u.key).collect()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn upload(
        &self,
        body: UploadBody,
        key: &str,
        content_type: &str,
    ) -> Result<(), StoreError> {
        if self.failing.contains(key) {
            return Err(StoreError::Status {
                key: key.to_string(),
                status: 503,
            });
        }
        self.uploads.lock().unwrap().push(RecordedUpload {
            key: key.to_string(),
            body,
            content_type: content_type.to_string(),
        });
        Ok(())
    }
}

/// Returns `"<file name>@<size>"` as the encoded bytes, or fails for the
/// scripted `(file name, size)` pairs.
#[derive(Default)]
pub struct ScriptedResizer {
    failing: Vec<(String, SizeSpec)>,
    calls: Mutex<Vec<(String, SizeSpec, u8)>>,
}

impl ScriptedResizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(name: &str, size: SizeSpec) -> Self {
        Self {
            failing: vec![(name.to_string(), size)],
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, SizeSpec, u8)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Resizer for ScriptedResizer {
    async fn resize(
        &self,
        source: &Path,
        size: SizeSpec,
        quality: u8,
    ) -> Result<Vec<u8>, ResizeError> {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.calls.lock().unwrap().push((name.clone(), size, quality));

        if self.failing.iter().any(|(n, s)| *n == name && *s == size) {
            return Err(ResizeError::Io(
                source.to_path_buf(),
                std::io::Error::other("scripted failure"),
            ));
        }
        Ok(format!("{name}@{size}").into_bytes())
    }
}
