use anyhow::{Context, Result};
use base64::Engine;
use std::path::Path;

use super::ImageFormat;

/// Encoded image bytes tagged with their MIME type. Never mutated once built.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageBlob {
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageBlob")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("byte_len", &self.bytes.len())
            .finish()
    }
}

impl ImageBlob {
    pub fn build(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        let mime_type = mime_type.into();

        if !is_image_mime_type(&mime_type) {
            anyhow::bail!("'{}' is not an image MIME type", mime_type);
        }
        if bytes.is_empty() {
            anyhow::bail!("Image '{}' has no content", file_name);
        }

        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    pub fn build_with_format(file_name: impl Into<String>, format: ImageFormat, bytes: Vec<u8>) -> Result<Self> {
        Self::build(file_name, format.mime_type(), bytes)
    }

    /// Reads a JPEG or PNG file from disk, trusting the magic bytes over the extension.
    pub async fn load_from_file(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image file {:?}", path))?;

        let format = ImageFormat::detect_from_bytes(&bytes)
            .or_else(|| {
                path.extension()
                    .and_then(|extension| extension.to_str())
                    .and_then(ImageFormat::from_file_extension)
            })
            .ok_or_else(|| anyhow::anyhow!("{:?} is not a PNG or JPEG image", path))?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("upload.{}", format.file_extension()));

        log::debug!(
            "[IMAGE_BLOB] loaded {} ({} bytes, {})",
            file_name,
            bytes.len(),
            format.mime_type()
        );

        Self::build_with_format(file_name, format, bytes)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    pub fn to_data_url(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.mime_type, encoded)
    }
}

pub fn is_image_mime_type(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_rejects_non_image_mime_type() {
        let result = ImageBlob::build("notes.txt", "text/plain", b"hello".to_vec());

        assert!(result.is_err());
    }

    #[test]
    fn test_build_rejects_empty_content() {
        let result = ImageBlob::build("empty.png", "image/png", Vec::new());

        assert!(result.is_err());
    }

    #[test]
    fn test_build_with_format_uses_format_mime_type() {
        let blob = ImageBlob::build_with_format("photo.jpg", ImageFormat::JPEG, vec![1, 2, 3]).unwrap();

        assert_eq!(blob.mime_type(), "image/jpeg");
        assert_eq!(blob.file_name(), "photo.jpg");
        assert_eq!(blob.byte_len(), 3);
    }

    #[test]
    fn test_to_data_url_encodes_bytes_with_mime_prefix() {
        let blob = ImageBlob::build("a.png", "image/png", b"abc".to_vec()).unwrap();

        assert_eq!(blob.to_data_url(), "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_debug_output_omits_raw_bytes() {
        let blob = ImageBlob::build("a.png", "image/png", vec![7u8; 64]).unwrap();

        let rendered = format!("{:?}", blob);

        assert!(rendered.contains("byte_len: 64"));
        assert!(!rendered.contains("7, 7"));
    }

    #[tokio::test]
    async fn test_load_from_file_detects_format_from_content() {
        let temp_dir = std::env::temp_dir().join("doppelganger-blob-test");
        std::fs::create_dir_all(&temp_dir).unwrap();
        let path = temp_dir.join("misnamed.txt");
        let png_header = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        std::fs::write(&path, &png_header).unwrap();

        let blob = ImageBlob::load_from_file(&path).await.unwrap();

        assert_eq!(blob.mime_type(), "image/png");
        assert_eq!(blob.file_name(), "misnamed.txt");
        assert_eq!(blob.bytes(), png_header.as_slice());

        std::fs::remove_dir_all(&temp_dir).ok();
    }

    #[tokio::test]
    async fn test_load_from_file_rejects_unknown_content() {
        let temp_dir = std::env::temp_dir().join("doppelganger-blob-reject-test");
        std::fs::create_dir_all(&temp_dir).unwrap();
        let path = temp_dir.join("notes.txt");
        std::fs::write(&path, b"just some text").unwrap();

        let result = ImageBlob::load_from_file(&path).await;

        assert!(result.is_err());

        std::fs::remove_dir_all(&temp_dir).ok();
    }
}
