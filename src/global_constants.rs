pub const APPLICATION_NAME: &str = "Anime Doppelganger";
pub const APPLICATION_TAGLINE: &str = "Uncover Your Anime Alter Ego with AI";

pub const LOG_TAG_APP: &str = "[APP]";
pub const LOG_TAG_RELAY: &str = "[RELAY]";
pub const LOG_TAG_GRADIO: &str = "[GRADIO]";
pub const LOG_TAG_CAMERA: &str = "[CAMERA]";
pub const LOG_TAG_UPLOADER: &str = "[UPLOADER]";
pub const LOG_TAG_CLIENT: &str = "[CLIENT]";
pub const LOG_TAG_SETTINGS: &str = "[SETTINGS]";

pub const RELAY_FIND_PATH: &str = "/find";
pub const RELAY_LEGACY_FIND_PATH: &str = "/api/find";
pub const RELAY_IMAGE_FIELD_NAME: &str = "image";

pub const ERROR_NO_FILE_UPLOADED: &str = "No image file uploaded.";
pub const ERROR_REMOTE_CALL_FAILED: &str = "Failed to process the image.";
pub const ERROR_PAYLOAD_TOO_LARGE: &str = "Image is too large.";

pub const USER_MESSAGE_CAMERA_UNAVAILABLE: &str =
    "Could not access webcam. Please check permissions.";
pub const USER_MESSAGE_REQUEST_FAILED: &str = "Something went wrong. Please try another image.";
pub const USER_MESSAGE_NO_IMAGE_SELECTED: &str = "Please select an image first.";
pub const USER_MESSAGE_VIDEO_NOT_READY: &str = "Video not ready yet.";

pub const MATCH_LINE_PREFIX: &str = "Match: ";
pub const SCORE_LINE_PREFIX: &str = "Score: ";

pub const WEBCAM_PHOTO_FILE_NAME: &str = "webcam-photo.jpg";
pub const WEBCAM_JPEG_QUALITY: u8 = 92;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5001";
pub const DEFAULT_RELAY_URL: &str = "http://localhost:5001";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "*";
pub const DEFAULT_INFERENCE_URL: &str = "https://karthikgavini-anime-doppelganger.hf.space";
pub const DEFAULT_GRADIO_API_PREFIX: &str = "/gradio_api";
pub const DEFAULT_INFERENCE_FUNCTION_NAME: &str = "find_lookalike";
pub const DEFAULT_REMOTE_TIMEOUT_SECONDS: u64 = 60;
pub const DEFAULT_REMOTE_MAX_RETRIES: u32 = 0;
pub const DEFAULT_MAX_CONCURRENT_CALLS: usize = 4;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_CAMERA_DEVICE: &str = "/dev/video0";
pub const DEFAULT_CAMERA_WIDTH: u32 = 640;
pub const DEFAULT_CAMERA_HEIGHT: u32 = 480;

pub const CAMERA_CAPTURE_ATTEMPTS: u32 = 20;
pub const CAMERA_CAPTURE_RETRY_DELAY_MS: u64 = 100;

pub const ENV_RELAY_URL: &str = "DOPPELGANGER_RELAY_URL";
pub const ENV_ALLOWED_ORIGIN: &str = "DOPPELGANGER_ALLOWED_ORIGIN";
pub const ENV_BIND_ADDRESS: &str = "DOPPELGANGER_BIND_ADDRESS";
pub const ENV_INFERENCE_URL: &str = "DOPPELGANGER_INFERENCE_URL";
pub const ENV_REMOTE_TIMEOUT_SECONDS: &str = "DOPPELGANGER_REMOTE_TIMEOUT_SECONDS";
pub const ENV_REMOTE_MAX_RETRIES: &str = "DOPPELGANGER_REMOTE_MAX_RETRIES";
pub const ENV_MAX_CONCURRENT_CALLS: &str = "DOPPELGANGER_MAX_CONCURRENT_CALLS";
pub const ENV_CAMERA_DEVICE: &str = "DOPPELGANGER_CAMERA_DEVICE";

pub const SETTINGS_DIRECTORY_NAME: &str = "anime-doppelganger";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub const STARTUP_BANNER: &str = r#"
╔════════════════════════════════════════════════════════╗
║  Anime Doppelganger - Relay                            ║
║                                                        ║
║  POST a photo to /find to meet your anime twin         ║
║  Press Ctrl+C to stop the server                       ║
║                                                        ║
╚════════════════════════════════════════════════════════╝
"#;
