mod camera_state;
mod image_blob;
mod image_format;
mod match_summary;
mod relay_result;
mod user_settings;
mod video_frame;
mod view_state;

pub use camera_state::{CameraOpenResult, CameraState};
pub use image_blob::{is_image_mime_type, ImageBlob};
pub use image_format::ImageFormat;
pub use match_summary::MatchSummary;
pub use relay_result::{RelayErrorBody, RelayResult};
pub use user_settings::{RelaySettings, UserSettings};
pub use video_frame::VideoFrame;
pub use view_state::{ResultView, ViewState};
