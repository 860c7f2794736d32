mod system_camera_device;

pub use system_camera_device::SystemCameraDevice;
