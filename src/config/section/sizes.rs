//! Derivative sizes and output encoding.
//!
//! # Example
//!
//! ```toml
//! quality = 80                       # Encoder quality, 0-100
//! format = "jpeg"                    # jpeg | png | webp
//! sizes = [[200, 200], [1024, 768]]  # Bounding boxes, uploaded in this order
//! ```

use serde::Deserialize;
use std::fmt;

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::mime;

/// Bounding box for one derivative, written as `[width, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "[u32; 2]")]
pub struct SizeSpec {
    pub width: u32,
    pub height: u32,
}

impl SizeSpec {
    #[cfg(test)]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Key segment identifying this size, e.g. `200x200`.
    pub fn id(&self) -> String {
        self.to_string()
    }
}

impl From<[u32; 2]> for SizeSpec {
    fn from([width, height]: [u32; 2]) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Encoding used for derivatives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    #[serde(alias = "jpg")]
    Jpeg,
    Png,
    Webp,
}

impl OutputFormat {
    /// Content type sent with every upload.
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Jpeg => mime::types::JPEG,
            Self::Png => mime::types::PNG,
            Self::Webp => mime::types::WEBP,
        }
    }
}

pub const QUALITY: FieldPath = FieldPath::new("quality");

/// Validate size list and quality.
pub fn validate(sizes: &[SizeSpec], quality: u8, diag: &mut ConfigDiagnostics) {
    if quality > 100 {
        diag.error_with_hint(
            QUALITY,
            format!("quality {quality} is out of range"),
            "use a value between 0 and 100",
        );
    }

    for (i, size) in sizes.iter().enumerate() {
        if size.width == 0 || size.height == 0 {
            diag.error(
                FieldPath::indexed("sizes", i, "dimensions"),
                format!("size {size} must have non-zero width and height"),
            );
        }
    }

    if sizes.is_empty() {
        diag.warn(
            FieldPath::new("sizes"),
            "no sizes configured, only originals will be uploaded",
        );
    }
}
