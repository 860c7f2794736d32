use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    PNG,
    JPEG,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::PNG => "image/png",
            ImageFormat::JPEG => "image/jpeg",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            ImageFormat::PNG => "png",
            ImageFormat::JPEG => "jpg",
        }
    }

    pub fn from_file_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::PNG),
            "jpg" | "jpeg" | "jpe" | "jfif" => Some(ImageFormat::JPEG),
            _ => None,
        }
    }

    /// Sniffs the encoded bytes; only the two formats the uploader accepts are recognised.
    pub fn detect_from_bytes(bytes: &[u8]) -> Option<Self> {
        match ::image::guess_format(bytes).ok()? {
            ::image::ImageFormat::Png => Some(ImageFormat::PNG),
            ::image::ImageFormat::Jpeg => Some(ImageFormat::JPEG),
            _ => None,
        }
    }
}
