use crate::core::models::{is_image_mime_type, CameraOpenResult, ImageBlob};
use crate::core::orchestrators::CameraController;
use crate::global_constants::{
    LOG_TAG_UPLOADER, USER_MESSAGE_CAMERA_UNAVAILABLE, USER_MESSAGE_NO_IMAGE_SELECTED,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("{message}", message = USER_MESSAGE_NO_IMAGE_SELECTED)]
    NoImageSelected,
    #[error("{message}", message = USER_MESSAGE_CAMERA_UNAVAILABLE)]
    CameraUnavailable,
    #[error("Dropped file of type '{0}' is not an image")]
    NotAnImage(String),
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct DroppedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Funnels file selection, drag-and-drop and camera snapshots into one
/// selection callback.
pub struct Uploader<F>
where
    F: FnMut(ImageBlob),
{
    on_file_select: F,
    is_dragging: bool,
}

impl<F> Uploader<F>
where
    F: FnMut(ImageBlob),
{
    pub fn build(on_file_select: F) -> Self {
        Self {
            on_file_select,
            is_dragging: false,
        }
    }

    #[allow(dead_code)]
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn handle_file_selected(&mut self, file: Option<ImageBlob>) -> Result<(), CaptureError> {
        let image = file.ok_or(CaptureError::NoImageSelected)?;

        log::info!("{} file selected: {:?}", LOG_TAG_UPLOADER, image);
        (self.on_file_select)(image);
        Ok(())
    }

    #[allow(dead_code)]
    pub fn handle_drag_over(&mut self) {
        self.is_dragging = true;
    }

    #[allow(dead_code)]
    pub fn handle_drag_leave(&mut self) {
        self.is_dragging = false;
    }

    #[allow(dead_code)]
    pub fn handle_drop(&mut self, file: Option<DroppedFile>) -> Result<(), CaptureError> {
        self.is_dragging = false;

        let dropped = file.ok_or(CaptureError::NoImageSelected)?;
        if !is_image_mime_type(&dropped.mime_type) {
            log::warn!(
                "{} ignoring dropped file {} ({})",
                LOG_TAG_UPLOADER,
                dropped.file_name,
                dropped.mime_type
            );
            return Err(CaptureError::NotAnImage(dropped.mime_type));
        }

        let image = ImageBlob::build(dropped.file_name, dropped.mime_type, dropped.bytes).map_err(|error| {
            log::warn!("{} dropped file rejected: {}", LOG_TAG_UPLOADER, error);
            CaptureError::NoImageSelected
        })?;

        log::info!("{} file dropped: {:?}", LOG_TAG_UPLOADER, image);
        (self.on_file_select)(image);
        Ok(())
    }

    pub async fn handle_open_camera(&mut self, camera: &mut CameraController) -> Result<(), CaptureError> {
        match camera.open_camera().await {
            CameraOpenResult::Opened => Ok(()),
            CameraOpenResult::Denied | CameraOpenResult::Unavailable => Err(CaptureError::CameraUnavailable),
        }
    }

    pub fn handle_take_picture(&mut self, camera: &mut CameraController) -> Result<(), CaptureError> {
        let image = camera.capture().ok_or(CaptureError::NoImageSelected)?;

        log::info!("{} picture taken: {:?}", LOG_TAG_UPLOADER, image);
        (self.on_file_select)(image);
        camera.close_camera();
        Ok(())
    }
}
