//! `[s3]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [s3]
//! bucket = "my-photos"              # Target bucket (required)
//! region = "eu-west-1"              # Bucket region (required)
//! endpoint = "http://localhost:9000" # Optional: MinIO, R2, Wasabi, ...
//! path_style = true                 # Optional: path-style addressing (MinIO)
//! access_key_id = "..."             # Optional: falls back to AWS_ACCESS_KEY_ID
//! secret_access_key = "..."         # Optional: falls back to AWS_SECRET_ACCESS_KEY
//! ```

use serde::Deserialize;

use crate::config::{ConfigDiagnostics, FieldPath};

/// Object store connection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct S3Config {
    /// Bucket name.
    pub bucket: String,
    /// Region name, e.g. `eu-west-1`.
    pub region: String,
    /// Custom endpoint for S3-compatible stores.
    pub endpoint: Option<String>,
    /// Use path-style instead of virtual-host addressing.
    pub path_style: bool,
    /// Access key id. Credentials from the environment are used when unset.
    pub access_key_id: Option<String>,
    /// Secret access key.
    pub secret_access_key: Option<String>,
    /// Session token for temporary credentials.
    pub session_token: Option<String>,
}

impl S3Config {
    pub const BUCKET: FieldPath = FieldPath::new("s3.bucket");
    pub const REGION: FieldPath = FieldPath::new("s3.region");
    pub const ACCESS_KEY_ID: FieldPath = FieldPath::new("s3.access_key_id");

    /// Whether both halves of a static key pair are configured.
    pub fn has_static_credentials(&self) -> bool {
        self.access_key_id.as_deref().is_some_and(|s| !s.is_empty())
            && self.secret_access_key.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Validate required connection fields.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.bucket.trim().is_empty() {
            diag.error_with_hint(
                Self::BUCKET,
                "configuration file should contain an S3 bucket",
                "add `bucket = \"...\"` under `[s3]`",
            );
        }
        if self.region.trim().is_empty() {
            diag.error_with_hint(
                Self::REGION,
                "configuration file should contain an S3 region",
                "add `region = \"...\"` under `[s3]`",
            );
        }

        let has_key = self.access_key_id.as_deref().is_some_and(|s| !s.is_empty());
        let has_secret = self
            .secret_access_key
            .as_deref()
            .is_some_and(|s| !s.is_empty());
        if has_key != has_secret {
            diag.error(
                Self::ACCESS_KEY_ID,
                "`access_key_id` and `secret_access_key` must be set together",
            );
        }
    }
}
