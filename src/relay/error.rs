use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::core::models::RelayErrorBody;
use crate::global_constants::{
    ERROR_NO_FILE_UPLOADED, ERROR_PAYLOAD_TOO_LARGE, ERROR_REMOTE_CALL_FAILED,
};

/// Failures that cross the HTTP boundary. Each one renders a fixed message;
/// the underlying cause is logged where it happens and never sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    #[error("{message}", message = ERROR_NO_FILE_UPLOADED)]
    NoFileUploaded,
    #[error("{message}", message = ERROR_PAYLOAD_TOO_LARGE)]
    PayloadTooLarge,
    #[error("{message}", message = ERROR_REMOTE_CALL_FAILED)]
    RemoteCallFailed,
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::NoFileUploaded => StatusCode::BAD_REQUEST,
            RelayError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::RemoteCallFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(RelayErrorBody::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_match_error_kind() {
        assert_eq!(RelayError::NoFileUploaded.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(RelayError::PayloadTooLarge.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            RelayError::RemoteCallFailed.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_are_fixed_user_facing_strings() {
        assert_eq!(RelayError::NoFileUploaded.to_string(), ERROR_NO_FILE_UPLOADED);
        assert_eq!(RelayError::RemoteCallFailed.to_string(), ERROR_REMOTE_CALL_FAILED);
        assert_eq!(RelayError::PayloadTooLarge.to_string(), ERROR_PAYLOAD_TOO_LARGE);
    }
}
