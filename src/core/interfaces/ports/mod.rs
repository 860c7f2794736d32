mod camera_device;

pub use camera_device::{CameraAcquireError, CameraDevice, VideoStream};
