use std::sync::Arc;

use crate::core::interfaces::ports::{CameraAcquireError, CameraDevice, VideoStream};
use crate::core::models::{CameraOpenResult, CameraState, ImageBlob, ImageFormat};
use crate::global_constants::{
    LOG_TAG_CAMERA, USER_MESSAGE_CAMERA_UNAVAILABLE, USER_MESSAGE_VIDEO_NOT_READY,
    WEBCAM_JPEG_QUALITY, WEBCAM_PHOTO_FILE_NAME,
};

/// Owns at most one live camera stream and walks it through
/// `Closed -> Opening -> Open -> Capturing -> Closed`.
pub struct CameraController {
    camera_device: Arc<dyn CameraDevice>,
    stream: Option<Box<dyn VideoStream>>,
    state: CameraState,
}

impl CameraController {
    pub fn build(camera_device: Arc<dyn CameraDevice>) -> Self {
        Self {
            camera_device,
            stream: None,
            state: CameraState::Closed,
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub async fn open_camera(&mut self) -> CameraOpenResult {
        if self.stream.is_some() {
            log::debug!("{} camera already open, reusing stream", LOG_TAG_CAMERA);
            return CameraOpenResult::Opened;
        }

        if !self.camera_device.is_api_available() {
            log::error!("{} webcam API not available", LOG_TAG_CAMERA);
            self.state = CameraState::Error(USER_MESSAGE_CAMERA_UNAVAILABLE.to_string());
            return CameraOpenResult::Unavailable;
        }

        log::info!("{} requesting video stream", LOG_TAG_CAMERA);
        self.state = CameraState::Opening;

        match self.camera_device.acquire_video_stream().await {
            Ok(stream) => {
                log::info!("{} video stream acquired", LOG_TAG_CAMERA);
                self.stream = Some(stream);
                self.state = CameraState::Open;
                CameraOpenResult::Opened
            }
            Err(error) => {
                log::error!("{} webcam error: {}", LOG_TAG_CAMERA, error);
                self.state = CameraState::Error(USER_MESSAGE_CAMERA_UNAVAILABLE.to_string());
                match error {
                    CameraAcquireError::PermissionDenied => CameraOpenResult::Denied,
                    CameraAcquireError::DeviceUnavailable(_) => CameraOpenResult::Unavailable,
                }
            }
        }
    }

    pub fn close_camera(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            log::info!("{} stopping all tracks", LOG_TAG_CAMERA);
            stream.stop_all_tracks();
        }
        self.state = CameraState::Closed;
    }

    /// Returns `None` rather than failing when no frame has been rendered yet,
    /// so the caller can simply try again.
    pub fn capture(&mut self) -> Option<ImageBlob> {
        if !self.state.is_open() {
            log::warn!(
                "{} capture requested while camera is {:?}",
                LOG_TAG_CAMERA,
                self.state
            );
            return None;
        }

        let stream = self.stream.as_mut()?;

        let (width, height) = stream.natural_dimensions();
        if width == 0 || height == 0 {
            log::warn!("{} {}", LOG_TAG_CAMERA, USER_MESSAGE_VIDEO_NOT_READY);
            return None;
        }

        self.state = CameraState::Capturing;

        let encoded = stream
            .draw_current_frame()
            .and_then(|frame| frame.encode_as_jpeg(WEBCAM_JPEG_QUALITY))
            .and_then(|bytes| {
                ImageBlob::build_with_format(WEBCAM_PHOTO_FILE_NAME, ImageFormat::JPEG, bytes)
            });

        match encoded {
            Ok(image) => {
                log::info!(
                    "{} captured {}x{} frame ({} bytes)",
                    LOG_TAG_CAMERA,
                    width,
                    height,
                    image.byte_len()
                );
                self.close_camera();
                Some(image)
            }
            Err(error) => {
                log::error!("{} failed to snapshot frame: {}", LOG_TAG_CAMERA, error);
                self.state = CameraState::Open;
                None
            }
        }
    }
}

impl Drop for CameraController {
    fn drop(&mut self) {
        self.close_camera();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::models::VideoFrame;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub(crate) struct MockVideoStream {
        pub dimensions: (u32, u32),
        pub stopped_tracks: Arc<AtomicUsize>,
        pub fail_draw: bool,
    }

    impl VideoStream for MockVideoStream {
        fn natural_dimensions(&mut self) -> (u32, u32) {
            self.dimensions
        }

        fn draw_current_frame(&mut self) -> anyhow::Result<VideoFrame> {
            if self.fail_draw {
                anyhow::bail!("frame buffer vanished");
            }
            let (width, height) = self.dimensions;
            VideoFrame::build_from_raw_data(width, height, vec![200u8; (width * height * 4) as usize])
        }

        fn stop_all_tracks(&mut self) {
            self.stopped_tracks.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub(crate) struct MockCameraDevice {
        pub api_available: bool,
        pub acquire_error: Option<CameraAcquireError>,
        pub dimensions: (u32, u32),
        pub fail_draw: bool,
        pub acquisitions: Arc<AtomicUsize>,
        pub stopped_tracks: Arc<AtomicUsize>,
    }

    impl MockCameraDevice {
        pub fn streaming(dimensions: (u32, u32)) -> Self {
            Self {
                api_available: true,
                acquire_error: None,
                dimensions,
                fail_draw: false,
                acquisitions: Arc::new(AtomicUsize::new(0)),
                stopped_tracks: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl CameraDevice for MockCameraDevice {
        fn is_api_available(&self) -> bool {
            self.api_available
        }

        async fn acquire_video_stream(&self) -> Result<Box<dyn VideoStream>, CameraAcquireError> {
            self.acquisitions.fetch_add(1, Ordering::SeqCst);
            if let Some(error) = &self.acquire_error {
                return Err(error.clone());
            }
            Ok(Box::new(MockVideoStream {
                dimensions: self.dimensions,
                stopped_tracks: Arc::clone(&self.stopped_tracks),
                fail_draw: self.fail_draw,
            }))
        }
    }

    #[tokio::test]
    async fn test_open_camera_transitions_to_open() {
        let device = Arc::new(MockCameraDevice::streaming((64, 48)));
        let mut controller = CameraController::build(device);

        let result = controller.open_camera().await;

        assert_eq!(result, CameraOpenResult::Opened);
        assert_eq!(controller.state(), &CameraState::Open);
    }

    #[tokio::test]
    async fn test_open_camera_twice_acquires_device_once() {
        let device = Arc::new(MockCameraDevice::streaming((64, 48)));
        let acquisitions = Arc::clone(&device.acquisitions);
        let mut controller = CameraController::build(device);

        controller.open_camera().await;
        let second = controller.open_camera().await;

        assert_eq!(second, CameraOpenResult::Opened);
        assert_eq!(acquisitions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_open_camera_when_permission_denied_reports_denied() {
        let mut device = MockCameraDevice::streaming((64, 48));
        device.acquire_error = Some(CameraAcquireError::PermissionDenied);
        let mut controller = CameraController::build(Arc::new(device));

        let result = controller.open_camera().await;

        assert_eq!(result, CameraOpenResult::Denied);
        assert_eq!(
            controller.state().last_error(),
            Some(USER_MESSAGE_CAMERA_UNAVAILABLE)
        );
        assert!(controller.capture().is_none());
    }

    #[tokio::test]
    async fn test_open_camera_without_api_never_acquires() {
        let mut device = MockCameraDevice::streaming((64, 48));
        device.api_available = false;
        let acquisitions = Arc::clone(&device.acquisitions);
        let mut controller = CameraController::build(Arc::new(device));

        let result = controller.open_camera().await;

        assert_eq!(result, CameraOpenResult::Unavailable);
        assert_eq!(acquisitions.load(Ordering::SeqCst), 0);
        assert!(matches!(controller.state(), CameraState::Error(_)));
    }

    #[tokio::test]
    async fn test_capture_before_first_frame_returns_none_and_keeps_state() {
        let device = Arc::new(MockCameraDevice::streaming((0, 0)));
        let mut controller = CameraController::build(device);
        controller.open_camera().await;

        let captured = controller.capture();

        assert!(captured.is_none());
        assert_eq!(controller.state(), &CameraState::Open);
    }

    #[tokio::test]
    async fn test_capture_produces_jpeg_and_closes_session() {
        let device = Arc::new(MockCameraDevice::streaming((32, 24)));
        let stopped_tracks = Arc::clone(&device.stopped_tracks);
        let mut controller = CameraController::build(device);
        controller.open_camera().await;

        let image = controller.capture().unwrap();

        assert_eq!(image.mime_type(), "image/jpeg");
        assert_eq!(image.file_name(), WEBCAM_PHOTO_FILE_NAME);
        assert_eq!(&image.bytes()[..2], &[0xFF, 0xD8]);
        assert_eq!(controller.state(), &CameraState::Closed);
        assert_eq!(stopped_tracks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_capture_draw_failure_returns_to_open() {
        let mut device = MockCameraDevice::streaming((32, 24));
        device.fail_draw = true;
        let mut controller = CameraController::build(Arc::new(device));
        controller.open_camera().await;

        assert!(controller.capture().is_none());
        assert_eq!(controller.state(), &CameraState::Open);
    }

    #[test]
    fn test_close_camera_when_never_opened_is_noop() {
        let device = Arc::new(MockCameraDevice::streaming((32, 24)));
        let mut controller = CameraController::build(device);

        controller.close_camera();
        controller.close_camera();

        assert_eq!(controller.state(), &CameraState::Closed);
    }

    #[tokio::test]
    async fn test_close_camera_twice_stops_tracks_once() {
        let device = Arc::new(MockCameraDevice::streaming((32, 24)));
        let stopped_tracks = Arc::clone(&device.stopped_tracks);
        let mut controller = CameraController::build(device);
        controller.open_camera().await;

        controller.close_camera();
        controller.close_camera();

        assert_eq!(controller.state(), &CameraState::Closed);
        assert_eq!(stopped_tracks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dropping_controller_releases_stream() {
        let device = Arc::new(MockCameraDevice::streaming((32, 24)));
        let stopped_tracks = Arc::clone(&device.stopped_tracks);
        let mut controller = CameraController::build(device);
        controller.open_camera().await;

        drop(controller);

        assert_eq!(stopped_tracks.load(Ordering::SeqCst), 1);
    }
}
