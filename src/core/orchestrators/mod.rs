pub mod camera_controller;
mod lookalike_flow;
mod uploader;

pub use camera_controller::CameraController;
pub use lookalike_flow::LookalikeFlow;
pub use uploader::{CaptureError, Uploader};
