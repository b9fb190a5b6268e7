//! Derivative pipeline.
//!
//! One call to [`Pipeline::process_file`] per routed file:
//!
//! ```text
//! original ──upload──▶ <prefix><basename>
//!     │ (only on success)
//!     ▼
//! sizes[0] ─resize─upload─▶ <prefix>sizes/<W>x<H>/<basename>
//! sizes[1] ─resize─upload─▶ ...            (stops at the first failure)
//! ```
//!
//! Everything runs strictly in order; see [`series`].

pub mod series;

#[cfg(test)]
pub(crate) mod fakes;

pub use series::series;

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{DirectoryRule, PhotoConfig, SizeSpec};
use crate::image::{ResizeError, Resizer};
use crate::key::KeyPrefix;
use crate::logger::error_chain;
use crate::store::{ObjectStore, StoreError, UploadBody};
use crate::utils::mime;
use crate::{debug, log};

/// Why a file stopped short.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("original upload failed")]
    Original(#[source] StoreError),

    #[error("resize to {size} failed")]
    Resize {
        size: SizeSpec,
        #[source]
        source: ResizeError,
    },

    #[error("upload of size {size} failed")]
    SizeUpload {
        size: SizeSpec,
        #[source]
        source: StoreError,
    },
}

/// Outcome of one file.
#[derive(Debug)]
pub struct FileReport {
    pub file: PathBuf,
    /// Key prefix shared by the original and its derivatives.
    pub base_key: String,
    /// Keys that were written, in upload order.
    pub uploaded: Vec<String>,
    pub error: Option<PipelineError>,
}

impl FileReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Uploads an original and its derivatives.
pub struct Pipeline<'a> {
    config: &'a PhotoConfig,
    store: &'a dyn ObjectStore,
    resizer: &'a dyn Resizer,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a PhotoConfig,
        store: &'a dyn ObjectStore,
        resizer: &'a dyn Resizer,
    ) -> Self {
        Self {
            config,
            store,
            resizer,
        }
    }

    /// Upload `file` and every configured size.
    ///
    /// Never fails as a whole: the first error is recorded in the report
    /// and logged, and the caller moves on to the next file.
    pub async fn process_file(
        &self,
        file: &Path,
        rule: &DirectoryRule,
        secret: Option<&str>,
    ) -> FileReport {
        let prefix = KeyPrefix::for_file(file, rule, secret);
        let basename = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut report = FileReport {
            file: file.to_path_buf(),
            base_key: prefix.to_string(),
            uploaded: Vec::new(),
            error: None,
        };

        let original_key = prefix.original(&basename);
        let content_type = self.original_content_type(file);
        if let Err(err) = self
            .store
            .upload(UploadBody::File(file.to_path_buf()), &original_key, content_type)
            .await
        {
            let err = PipelineError::Original(err);
            log!("error"; "{}: {}", file.display(), error_chain(&err));
            report.error = Some(err);
            return report;
        }
        log!("upload"; "original size -> {}", original_key);
        report.uploaded.push(original_key);

        let (prefix, basename) = (&prefix, basename.as_str());
        let outcome = series(self.config.sizes.iter().copied(), move |size| {
            self.derive(file, prefix, basename, size)
        })
        .await;

        report.uploaded.extend(outcome.completed);
        if let Some(err) = outcome.error {
            log!("error"; "{}: {}", file.display(), error_chain(&err));
            report.error = Some(err);
        }
        report
    }

    /// Resize, encode and upload one size. Returns the written key.
    async fn derive(
        &self,
        file: &Path,
        prefix: &KeyPrefix,
        basename: &str,
        size: SizeSpec,
    ) -> Result<String, PipelineError> {
        let data = self
            .resizer
            .resize(file, size, self.config.quality)
            .await
            .map_err(|source| PipelineError::Resize { size, source })?;
        debug!("resize"; "{} {} -> {} bytes", basename, size, data.len());

        let key = prefix.derivative(&size, basename);
        self.store
            .upload(UploadBody::Bytes(data), &key, self.config.format.content_type())
            .await
            .map_err(|source| PipelineError::SizeUpload { size, source })?;

        log!("upload"; "{} -> {}", size, key);
        Ok(key)
    }

    /// Image type from the file's extension, falling back to the output format.
    fn original_content_type(&self, file: &Path) -> &'static str {
        let guessed = mime::from_path(file);
        if mime::is_image(guessed) {
            guessed
        } else {
            self.config.format.content_type()
        }
    }
}
