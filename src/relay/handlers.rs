use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use super::RelayError;
use crate::core::interfaces::adapters::LookalikeInferenceService;
use crate::core::models::{is_image_mime_type, ImageBlob, ImageFormat, RelayResult};
use crate::global_constants::{
    APPLICATION_NAME, LOG_TAG_RELAY, RELAY_FIND_PATH, RELAY_IMAGE_FIELD_NAME,
};

#[derive(Clone)]
pub struct RelayState {
    pub inference_service: Arc<dyn LookalikeInferenceService>,
}

pub async fn handle_root() -> Json<Value> {
    Json(json!({
        "service": APPLICATION_NAME,
        "endpoint": RELAY_FIND_PATH,
    }))
}

pub async fn handle_find(
    State(state): State<RelayState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<RelayResult>, RelayError> {
    let request_id = Uuid::new_v4();
    log::info!("{} [{}] received a request to {}", LOG_TAG_RELAY, request_id, RELAY_FIND_PATH);

    let multipart = multipart.map_err(|rejection| {
        log::warn!("{} [{}] not a multipart request: {}", LOG_TAG_RELAY, request_id, rejection);
        RelayError::NoFileUploaded
    })?;

    let image = read_image_field(multipart).await.map_err(|error| {
        log::warn!("{} [{}] unreadable multipart body: {}", LOG_TAG_RELAY, request_id, error);
        if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
            RelayError::PayloadTooLarge
        } else {
            RelayError::NoFileUploaded
        }
    })?;

    let Some(image) = image else {
        log::warn!("{} [{}] no '{}' file field", LOG_TAG_RELAY, request_id, RELAY_IMAGE_FIELD_NAME);
        return Err(RelayError::NoFileUploaded);
    };

    log::info!("{} [{}] forwarding {:?} to the inference service", LOG_TAG_RELAY, request_id, image);

    let output = state
        .inference_service
        .find_lookalike(&image)
        .await
        .map_err(|error| {
            log::error!("{} [{}] remote call failed: {:#}", LOG_TAG_RELAY, request_id, error);
            RelayError::RemoteCallFailed
        })?;

    let result = RelayResult::from_positional_output(&output).map_err(|error| {
        log::error!(
            "{} [{}] malformed remote output {:?}: {:#}",
            LOG_TAG_RELAY,
            request_id,
            output,
            error
        );
        RelayError::RemoteCallFailed
    })?;

    log::info!("{} [{}] received response from the inference service", LOG_TAG_RELAY, request_id);
    Ok(Json(result))
}

/// Takes the first non-empty `image` file part. Plain text fields named
/// `image` carry no file name and are ignored like every other field.
async fn read_image_field(mut multipart: Multipart) -> Result<Option<ImageBlob>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(RELAY_IMAGE_FIELD_NAME) {
            continue;
        }

        let Some(file_name) = field.file_name().map(str::to_string) else {
            log::debug!("{} skipping non-file '{}' field", LOG_TAG_RELAY, RELAY_IMAGE_FIELD_NAME);
            continue;
        };
        let declared_mime_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            continue;
        }

        let mime_type = resolve_mime_type(declared_mime_type.as_deref(), &bytes);
        match ImageBlob::build(file_name, mime_type, bytes.to_vec()) {
            Ok(image) => return Ok(Some(image)),
            Err(error) => {
                log::warn!("{} skipping unusable image field: {}", LOG_TAG_RELAY, error);
            }
        }
    }

    Ok(None)
}

/// The relay does not judge image content; the remote model does. Anything
/// not declared or sniffed as an image is forwarded tagged as JPEG.
fn resolve_mime_type(declared: Option<&str>, bytes: &[u8]) -> String {
    if let Some(declared) = declared.filter(|mime_type| is_image_mime_type(mime_type)) {
        return declared.to_string();
    }

    let format = ImageFormat::detect_from_bytes(bytes).unwrap_or_else(|| {
        log::debug!(
            "{} unrecognised upload content ({:?}), forwarding as JPEG",
            LOG_TAG_RELAY,
            declared
        );
        ImageFormat::JPEG
    });
    format.mime_type().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_mime_type_prefers_declared_image_type() {
        assert_eq!(resolve_mime_type(Some("image/webp"), b"whatever"), "image/webp");
    }

    #[test]
    fn test_resolve_mime_type_sniffs_when_declared_type_is_generic() {
        let png_header = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

        assert_eq!(
            resolve_mime_type(Some("application/octet-stream"), &png_header),
            "image/png"
        );
    }

    #[test]
    fn test_resolve_mime_type_falls_back_to_jpeg() {
        assert_eq!(resolve_mime_type(None, b"opaque"), "image/jpeg");
    }
}
