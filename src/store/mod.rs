//! Object store collaborator.
//!
//! The pipeline talks to [`ObjectStore`] only. [`S3Store`] is the production
//! implementation; tests use an in-memory recorder.

mod s3;

pub use self::s3::S3Store;

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// What gets uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadBody {
    /// Streamed from disk.
    File(PathBuf),
    /// Already in memory (encoded derivatives).
    Bytes(Vec<u8>),
}

impl UploadBody {
    /// Short description for progress lines.
    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Bytes(bytes) => format!("{} bytes", bytes.len()),
        }
    }
}

/// Errors from the object store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("can't open `{0}` for upload")]
    Open(PathBuf, #[source] std::io::Error),

    #[error("upload of `{key}` failed")]
    Upload {
        key: String,
        #[source]
        source: ::s3::error::S3Error,
    },

    #[error("upload of `{key}` rejected with status {status}")]
    Status { key: String, status: u16 },

    #[error("missing S3 credentials: set `access_key_id`/`secret_access_key` under `[s3]` or AWS_ACCESS_KEY_ID/AWS_SECRET_ACCESS_KEY")]
    Credentials(#[source] ::s3::creds::error::CredentialsError),

    #[error("invalid S3 configuration: {0}")]
    Setup(String),
}

/// Upload target for originals and derivatives.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `body` under `key` with the given content type.
    async fn upload(&self, body: UploadBody, key: &str, content_type: &str)
    -> Result<(), StoreError>;
}
