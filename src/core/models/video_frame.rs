use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;

/// One RGBA raster drawn from a live camera stream at its native resolution.
#[derive(Clone)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    raw_data: Vec<u8>,
}

impl std::fmt::Debug for VideoFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl VideoFrame {
    pub fn build_from_raw_data(width_pixels: u32, height_pixels: u32, raw_rgba_data: Vec<u8>) -> Result<Self> {
        let expected_len = width_pixels as usize * height_pixels as usize * 4;
        if width_pixels == 0 || height_pixels == 0 {
            anyhow::bail!("Frame dimensions must be greater than zero");
        }
        if raw_rgba_data.len() != expected_len {
            anyhow::bail!(
                "Frame data has {} bytes, expected {} for {}x{} RGBA",
                raw_rgba_data.len(),
                expected_len,
                width_pixels,
                height_pixels
            );
        }

        log::debug!(
            "[VIDEO_FRAME] building frame: {}x{}",
            width_pixels,
            height_pixels
        );

        Ok(Self {
            width: width_pixels,
            height: height_pixels,
            raw_data: raw_rgba_data,
        })
    }

    /// JPEG has no alpha channel, so the raster is flattened to RGB first.
    pub fn encode_as_jpeg(&self, quality: u8) -> Result<Vec<u8>> {
        let rgba = ::image::RgbaImage::from_raw(self.width, self.height, self.raw_data.clone())
            .ok_or_else(|| anyhow::anyhow!("Failed to create image from raw frame data"))?;
        let rgb = ::image::DynamicImage::ImageRgba8(rgba).to_rgb8();

        let mut encoded = Vec::new();
        JpegEncoder::new_with_quality(&mut encoded, quality)
            .encode_image(&rgb)
            .context("Failed to encode frame as JPEG")?;

        Ok(encoded)
    }
}
