use super::{ImageBlob, MatchSummary, RelayResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub original_image: ImageBlob,
    pub twin_image_url: Option<String>,
    pub message: String,
    pub summary: MatchSummary,
}

impl ResultView {
    pub fn build(original_image: ImageBlob, result: RelayResult) -> Self {
        let summary = MatchSummary::from_message(&result.message);

        Self {
            original_image,
            twin_image_url: result.image_url,
            message: result.message,
            summary,
        }
    }
}

/// Everything the presenter needs, in one value, so loading/result/error can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Success(ResultView),
    Error(String),
}

impl ViewState {
    #[allow(dead_code)]
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    #[allow(dead_code)]
    pub fn result(&self) -> Option<&ResultView> {
        match self {
            ViewState::Success(result_view) => Some(result_view),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_idle() {
        assert_eq!(ViewState::default(), ViewState::Idle);
    }

    #[test]
    fn test_result_view_derives_summary_from_message() {
        let image = ImageBlob::build("me.png", "image/png", vec![1]).unwrap();
        let result = RelayResult {
            message: "Match: Rin\nScore: 88%".to_string(),
            image_url: Some("https://example.com/rin.jpg".to_string()),
        };

        let view = ResultView::build(image, result);

        assert_eq!(view.summary.display_name, "Rin");
        assert_eq!(view.summary.score, "88%");
        assert_eq!(view.twin_image_url.as_deref(), Some("https://example.com/rin.jpg"));
    }

    #[test]
    fn test_accessors_only_answer_for_matching_variant() {
        let error_state = ViewState::Error("nope".to_string());

        assert_eq!(error_state.error_message(), Some("nope"));
        assert!(error_state.result().is_none());
        assert!(!error_state.is_loading());
        assert!(ViewState::Loading.is_loading());
    }
}
