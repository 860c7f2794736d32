use anyhow::Result;
use async_trait::async_trait;

use crate::core::models::VideoFrame;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CameraAcquireError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("camera unavailable: {0}")]
    DeviceUnavailable(String),
}

#[async_trait]
pub trait CameraDevice: Send + Sync {
    fn is_api_available(&self) -> bool;

    /// Video only. Suspends while the user answers the permission prompt.
    async fn acquire_video_stream(&self) -> Result<Box<dyn VideoStream>, CameraAcquireError>;
}

pub trait VideoStream: Send {
    /// Zero until the device has produced its first real frame.
    fn natural_dimensions(&mut self) -> (u32, u32);

    fn draw_current_frame(&mut self) -> Result<VideoFrame>;

    fn stop_all_tracks(&mut self);
}
