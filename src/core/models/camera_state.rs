#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CameraState {
    #[default]
    Closed,
    Opening,
    Open,
    Capturing,
    Error(String),
}

impl CameraState {
    pub fn is_open(&self) -> bool {
        matches!(self, CameraState::Open)
    }

    pub fn last_error(&self) -> Option<&str> {
        match self {
            CameraState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Permission denial is an expected outcome, so it is a variant rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraOpenResult {
    Opened,
    Denied,
    Unavailable,
}
