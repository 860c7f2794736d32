use async_trait::async_trait;

use crate::core::interfaces::ports::{CameraAcquireError, CameraDevice, VideoStream};
use crate::global_constants::LOG_TAG_CAMERA;

/// The machine's webcam. Only V4L2 on Linux is wired up; elsewhere the camera
/// API reports itself unavailable and callers fall back to file upload.
pub struct SystemCameraDevice {
    device_path: String,
    width: u32,
    height: u32,
}

impl SystemCameraDevice {
    pub fn initialize(device_path: &str, width: u32, height: u32) -> Self {
        log::debug!("{} initializing camera device {}", LOG_TAG_CAMERA, device_path);
        Self {
            device_path: device_path.to_string(),
            width,
            height,
        }
    }
}

#[async_trait]
impl CameraDevice for SystemCameraDevice {
    fn is_api_available(&self) -> bool {
        cfg!(all(target_os = "linux", feature = "v4l2"))
    }

    async fn acquire_video_stream(&self) -> Result<Box<dyn VideoStream>, CameraAcquireError> {
        #[cfg(all(target_os = "linux", feature = "v4l2"))]
        {
            let (device_path, width, height) = (self.device_path.clone(), self.width, self.height);
            let stream = tokio::task::spawn_blocking(move || {
                v4l2::V4l2VideoStream::open(&device_path, width, height)
            })
            .await
            .map_err(|error| {
                CameraAcquireError::DeviceUnavailable(format!("camera open task failed: {}", error))
            })??;
            Ok(Box::new(stream))
        }

        #[cfg(not(all(target_os = "linux", feature = "v4l2")))]
        {
            log::warn!(
                "{} no camera backend compiled in for {} ({}x{})",
                LOG_TAG_CAMERA,
                self.device_path,
                self.width,
                self.height
            );
            Err(CameraAcquireError::DeviceUnavailable(
                "camera support was not compiled in (enable the `v4l2` feature)".to_string(),
            ))
        }
    }
}

#[cfg(all(target_os = "linux", feature = "v4l2"))]
mod v4l2 {
    use anyhow::Result;
    use v4l::buffer::Type;
    use v4l::format::FourCC;
    use v4l::io::traits::CaptureStream;
    use v4l::prelude::*;
    use v4l::video::Capture;

    use crate::core::interfaces::ports::{CameraAcquireError, VideoStream};
    use crate::core::models::VideoFrame;
    use crate::global_constants::LOG_TAG_CAMERA;

    pub struct V4l2VideoStream {
        _device: Device,
        stream: Option<MmapStream<'static>>,
        width: u32,
        height: u32,
        frames_seen: u64,
    }

    impl V4l2VideoStream {
        pub fn open(path: &str, width: u32, height: u32) -> Result<Self, CameraAcquireError> {
            let device = Device::with_path(path).map_err(|error| match error.kind() {
                std::io::ErrorKind::PermissionDenied => CameraAcquireError::PermissionDenied,
                _ => CameraAcquireError::DeviceUnavailable(format!("failed to open {}: {}", path, error)),
            })?;

            let mut format = device
                .format()
                .map_err(|error| CameraAcquireError::DeviceUnavailable(format!("failed to get format: {}", error)))?;
            format.width = width;
            format.height = height;
            format.fourcc = FourCC::new(b"YUYV");

            let format = device
                .set_format(&format)
                .map_err(|error| CameraAcquireError::DeviceUnavailable(format!("failed to set format: {}", error)))?;
            if format.fourcc != FourCC::new(b"YUYV") {
                return Err(CameraAcquireError::DeviceUnavailable(format!(
                    "device does not support YUYV, negotiated {}",
                    format.fourcc
                )));
            }

            let stream = MmapStream::with_buffers(&device, Type::VideoCapture, 4)
                .map_err(|error| CameraAcquireError::DeviceUnavailable(format!("failed to create stream: {}", error)))?;

            log::info!(
                "{} streaming {} at {}x{}",
                LOG_TAG_CAMERA,
                path,
                format.width,
                format.height
            );

            Ok(Self {
                _device: device,
                stream: Some(stream),
                width: format.width,
                height: format.height,
                frames_seen: 0,
            })
        }

        fn grab_yuyv(&mut self) -> Result<Vec<u8>> {
            let stream = self
                .stream
                .as_mut()
                .ok_or_else(|| anyhow::anyhow!("Stream already stopped"))?;
            let (data, _metadata) = stream.next()?;
            self.frames_seen += 1;
            Ok(data.to_vec())
        }
    }

    // Frame reads block on the driver. Snapshots are taken once per `find`
    // run, never from the relay's request path.
    impl VideoStream for V4l2VideoStream {
        fn natural_dimensions(&mut self) -> (u32, u32) {
            if self.frames_seen == 0 && self.grab_yuyv().is_err() {
                return (0, 0);
            }
            (self.width, self.height)
        }

        fn draw_current_frame(&mut self) -> Result<VideoFrame> {
            let yuyv = self.grab_yuyv()?;
            let rgba = convert_yuyv_to_rgba(&yuyv, self.width, self.height)?;
            VideoFrame::build_from_raw_data(self.width, self.height, rgba)
        }

        fn stop_all_tracks(&mut self) {
            self.stream = None;
        }
    }

    fn convert_yuyv_to_rgba(yuyv: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
        let pixel_count = width as usize * height as usize;
        if yuyv.len() < pixel_count * 2 {
            anyhow::bail!("Short YUYV frame: {} bytes for {}x{}", yuyv.len(), width, height);
        }

        let mut rgba = Vec::with_capacity(pixel_count * 4);
        for chunk in yuyv[..pixel_count * 2].chunks_exact(4) {
            let (y0, u, y1, v) = (chunk[0], chunk[1], chunk[2], chunk[3]);
            rgba.extend_from_slice(&yuv_to_rgba(y0, u, v));
            rgba.extend_from_slice(&yuv_to_rgba(y1, u, v));
        }
        Ok(rgba)
    }

    fn yuv_to_rgba(y: u8, u: u8, v: u8) -> [u8; 4] {
        let y = y as f32;
        let u = u as f32 - 128.0;
        let v = v as f32 - 128.0;

        let r = y + 1.402 * v;
        let g = y - 0.344_136 * u - 0.714_136 * v;
        let b = y + 1.772 * u;

        [
            r.clamp(0.0, 255.0) as u8,
            g.clamp(0.0, 255.0) as u8,
            b.clamp(0.0, 255.0) as u8,
            255,
        ]
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_convert_yuyv_to_rgba_maps_neutral_chroma_to_gray() {
            let yuyv = [100u8, 128, 200, 128];

            let rgba = convert_yuyv_to_rgba(&yuyv, 2, 1).unwrap();

            assert_eq!(rgba, vec![100, 100, 100, 255, 200, 200, 200, 255]);
        }

        #[test]
        fn test_convert_yuyv_to_rgba_rejects_short_frames() {
            assert!(convert_yuyv_to_rgba(&[0u8; 4], 4, 4).is_err());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(all(target_os = "linux", feature = "v4l2")))]
    #[tokio::test]
    async fn test_acquire_without_backend_reports_unavailable() {
        let device = SystemCameraDevice::initialize("/dev/video0", 640, 480);

        assert!(!device.is_api_available());
        let result = device.acquire_video_stream().await;
        assert!(matches!(result, Err(CameraAcquireError::DeviceUnavailable(_))));
    }
}
