//! Derivative rendering.
//!
//! # Modules
//!
//! - [`dimensions`]: aspect-fit target size (never enlarges)
//! - [`encode`]: JPEG / PNG / WebP encoding
//!
//! The pipeline only sees the [`Resizer`] trait; [`ImageResizer`] is the
//! implementation backed by the `image` crate.

pub mod dimensions;
pub mod encode;

use ::image::DynamicImage;
use ::image::imageops::FilterType;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{OutputFormat, SizeSpec};

pub use dimensions::fit_within;
pub use encode::encode_image;

/// Errors while producing a derivative.
#[derive(Debug, Error)]
pub enum ResizeError {
    #[error("can't read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("can't decode image")]
    Decode(#[source] ::image::ImageError),

    #[error("can't encode image")]
    Encode(#[source] ::image::ImageError),

    #[error("resize task failed")]
    Task(#[from] tokio::task::JoinError),
}

/// Produces the encoded bytes of one derivative.
#[async_trait]
pub trait Resizer: Send + Sync {
    /// Scale `source` to fit inside `size` and encode it at `quality`.
    async fn resize(
        &self,
        source: &Path,
        size: SizeSpec,
        quality: u8,
    ) -> Result<Vec<u8>, ResizeError>;
}

/// [`Resizer`] backed by the `image` crate (Lanczos3).
///
/// Decoding and encoding run on tokio's blocking pool; the caller awaits the
/// result before doing anything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageResizer {
    format: OutputFormat,
}

impl ImageResizer {
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

#[async_trait]
impl Resizer for ImageResizer {
    async fn resize(
        &self,
        source: &Path,
        size: SizeSpec,
        quality: u8,
    ) -> Result<Vec<u8>, ResizeError> {
        let source = source.to_path_buf();
        let format = self.format;
        tokio::task::spawn_blocking(move || render(&source, size, quality, format)).await?
    }
}

/// Decode, fit and encode synchronously.
pub fn render(
    source: &Path,
    size: SizeSpec,
    quality: u8,
    format: OutputFormat,
) -> Result<Vec<u8>, ResizeError> {
    let bytes = std::fs::read(source).map_err(|e| ResizeError::Io(source.to_path_buf(), e))?;
    let img = ::image::load_from_memory(&bytes).map_err(ResizeError::Decode)?;
    let resized = fit(&img, size);
    encode_image(&resized, format, quality)
}

/// Scale `img` to fit inside `size`, keeping aspect ratio.
fn fit(img: &DynamicImage, size: SizeSpec) -> DynamicImage {
    let (w, h) = fit_within(img.width(), img.height(), size);
    if (w, h) == (img.width(), img.height()) {
        return img.clone();
    }
    img.resize_exact(w, h, FilterType::Lanczos3)
}
