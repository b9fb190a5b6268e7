use ::image::codecs::jpeg::JpegEncoder;
use ::image::codecs::webp::WebPEncoder;
use ::image::{DynamicImage, ImageFormat};
use std::io::Cursor;

use super::ResizeError;
use crate::config::OutputFormat;

/// Encode `img` in `format`.
///
/// `quality` applies to JPEG only; PNG is lossless and the WebP encoder in
/// `image` only writes lossless output.
pub fn encode_image(
    img: &DynamicImage,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, ResizeError> {
    let mut buf = Cursor::new(Vec::new());

    match format {
        OutputFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
            img.to_rgb8()
                .write_with_encoder(encoder)
                .map_err(ResizeError::Encode)?;
        }
        OutputFormat::Png => {
            img.write_to(&mut buf, ImageFormat::Png)
                .map_err(ResizeError::Encode)?;
        }
        OutputFormat::Webp => {
            let encoder = WebPEncoder::new_lossless(&mut buf);
            img.to_rgba8()
                .write_with_encoder(encoder)
                .map_err(ResizeError::Encode)?;
        }
    }

    Ok(buf.into_inner())
}
