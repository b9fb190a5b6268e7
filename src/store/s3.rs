//! S3 (and S3-compatible) object store via `rust-s3`.

use ::s3::Region;
use ::s3::bucket::Bucket;
use ::s3::creds::Credentials;
use async_trait::async_trait;

use super::{ObjectStore, StoreError, UploadBody};
use crate::config::S3Config;
use crate::debug;

/// Uploads into a single bucket.
pub struct S3Store {
    bucket: Box<Bucket>,
}

impl S3Store {
    /// Build the bucket client. Fails when no credentials can be found.
    pub fn from_config(config: &S3Config) -> Result<Self, StoreError> {
        let credentials = Self::credentials(config)?;
        let region = Self::region(config)?;

        let bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| StoreError::Setup(e.to_string()))?;

        let bucket = if config.path_style {
            bucket.with_path_style()
        } else {
            bucket
        };

        Ok(Self { bucket })
    }

    /// Static keys from the config, otherwise the standard AWS environment variables.
    fn credentials(config: &S3Config) -> Result<Credentials, StoreError> {
        let credentials = if config.has_static_credentials() {
            Credentials::new(
                config.access_key_id.as_deref(),
                config.secret_access_key.as_deref(),
                None,
                config.session_token.as_deref(),
                None,
            )
        } else {
            Credentials::from_env()
        };
        credentials.map_err(StoreError::Credentials)
    }

    fn region(config: &S3Config) -> Result<Region, StoreError> {
        match config.endpoint.as_deref() {
            Some(endpoint) if !endpoint.is_empty() => Ok(Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.trim_end_matches('/').to_string(),
            }),
            _ => config
                .region
                .parse()
                .map_err(|e| StoreError::Setup(format!("bad region `{}`: {e}", config.region))),
        }
    }

    fn check_status(key: &str, status: u16) -> Result<(), StoreError> {
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(StoreError::Status {
                key: key.to_string(),
                status,
            })
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn upload(
        &self,
        body: UploadBody,
        key: &str,
        content_type: &str,
    ) -> Result<(), StoreError> {
        debug!("s3"; "put {} <- {}", key, body.describe());

        let upload_error = |source| StoreError::Upload {
            key: key.to_string(),
            source,
        };

        let status = match body {
            UploadBody::File(path) => {
                let mut file = tokio::fs::File::open(&path)
                    .await
                    .map_err(|e| StoreError::Open(path.clone(), e))?;
                self.bucket
                    .put_object_stream_with_content_type(&mut file, key, content_type)
                    .await
                    .map_err(upload_error)?
                    .status_code()
            }
            UploadBody::Bytes(bytes) => self
                .bucket
                .put_object_with_content_type(key, &bytes, content_type)
                .await
                .map_err(upload_error)?
                .status_code(),
        };

        Self::check_status(key, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> S3Config {
        S3Config {
            bucket: "photos".into(),
            region: "eu-west-1".into(),
            access_key_id: Some("AKIDEXAMPLE".into()),
            secret_access_key: Some("secret".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_config_with_static_keys() {
        assert!(S3Store::from_config(&config()).is_ok());
    }

    #[test]
    fn test_custom_endpoint_region() {
        let mut config = config();
        config.endpoint = Some("http://localhost:9000/".into());
        match S3Store::region(&config).unwrap() {
            Region::Custom { region, endpoint } => {
                assert_eq!(region, "eu-west-1");
                assert_eq!(endpoint, "http://localhost:9000");
            }
            other => panic!("expected custom region, got {other:?}"),
        }
    }

    #[test]
    fn test_check_status() {
        assert!(S3Store::check_status("k", 200).is_ok());
        assert!(matches!(
            S3Store::check_status("k", 403),
            Err(StoreError::Status { status: 403, .. })
        ));
    }
}
