//! MIME type detection utilities.
//!
//! Content types sent with every upload come from here.

use std::path::Path;

/// Image MIME type constants.
pub mod types {
    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
    pub const GIF: &str = "image/gif";
    pub const WEBP: &str = "image/webp";
    pub const AVIF: &str = "image/avif";
    pub const BMP: &str = "image/bmp";
    pub const TIFF: &str = "image/tiff";

    pub const OCTET_STREAM: &str = "application/octet-stream";
}

/// Guess MIME type from file extension.
pub fn from_path(path: &Path) -> &'static str {
    from_extension(path.extension().and_then(|e| e.to_str()))
}

/// Guess MIME type from file extension string (case-insensitive).
pub fn from_extension(ext: Option<&str>) -> &'static str {
    let Some(ext) = ext else {
        return types::OCTET_STREAM;
    };
    match ext.to_ascii_lowercase().as_str() {
        "png" => types::PNG,
        "jpg" | "jpeg" => types::JPEG,
        "gif" => types::GIF,
        "webp" => types::WEBP,
        "avif" => types::AVIF,
        "bmp" => types::BMP,
        "tif" | "tiff" => types::TIFF,
        _ => types::OCTET_STREAM,
    }
}

/// Check if the MIME type represents an image.
pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_path() {
        assert_eq!(from_path(&PathBuf::from("photo.jpg")), types::JPEG);
        assert_eq!(from_path(&PathBuf::from("photo.JPEG")), types::JPEG);
        assert_eq!(from_path(&PathBuf::from("logo.png")), types::PNG);
        assert_eq!(from_path(&PathBuf::from("x.webp")), types::WEBP);
        assert_eq!(from_path(&PathBuf::from("notes.txt")), types::OCTET_STREAM);
        assert_eq!(from_path(&PathBuf::from("README")), types::OCTET_STREAM);
    }

    #[test]
    fn test_is_image() {
        assert!(is_image(types::JPEG));
        assert!(!is_image(types::OCTET_STREAM));
    }
}
