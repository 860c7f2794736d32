use crate::core::models::ResultView;

const PREVIEW_CHARACTERS: usize = 48;

/// "You vs Your Twin" card: original image beside the twin, then score and name.
pub struct ResultDisplay<'a> {
    result_view: &'a ResultView,
}

impl<'a> ResultDisplay<'a> {
    pub fn build(result_view: &'a ResultView) -> Self {
        log::debug!(
            "[RESULT_VIEW] rendering match '{}' with score '{}'",
            result_view.summary.display_name,
            result_view.summary.score
        );
        Self { result_view }
    }

    pub fn render_ui(&self) -> String {
        let original = &self.result_view.original_image;
        let twin_image = self
            .result_view
            .twin_image_url
            .as_deref()
            .unwrap_or("(no image returned)");

        let lines = vec![
            format!(
                "You:       {} ({}, {} bytes) {}",
                original.file_name(),
                original.mime_type(),
                original.byte_len(),
                preview_of(&original.to_data_url())
            ),
            "           VS".to_string(),
            format!("Your Twin: {}", twin_image),
            String::new(),
            "Match Score".to_string(),
            self.result_view.summary.score.clone(),
            self.result_view.summary.display_name.clone(),
            String::new(),
            "[Try Again]".to_string(),
        ];
        lines.join("\n")
    }
}

/// Data URLs are pure ASCII, so byte slicing is safe.
fn preview_of(data_url: &str) -> String {
    if data_url.len() <= PREVIEW_CHARACTERS {
        return data_url.to_string();
    }
    format!("{}...", &data_url[..PREVIEW_CHARACTERS])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{ImageBlob, RelayResult};

    fn create_result_view(message: &str, image_url: Option<&str>) -> ResultView {
        let image = ImageBlob::build("me.jpg", "image/jpeg", vec![0xFF; 128]).unwrap();
        ResultView::build(
            image,
            RelayResult {
                message: message.to_string(),
                image_url: image_url.map(str::to_string),
            },
        )
    }

    #[test]
    fn test_render_ui_shows_score_name_and_twin_url() {
        let view = create_result_view("Match: Mikasa\nScore: 93.40%", Some("https://img/mikasa.jpg"));

        let rendered = ResultDisplay::build(&view).render_ui();

        assert!(rendered.contains("Your Twin: https://img/mikasa.jpg"));
        assert!(rendered.contains("Match Score\n93.40%\nMikasa"));
        assert!(rendered.contains("me.jpg (image/jpeg, 128 bytes) data:image/jpeg;base64,"));
    }

    #[test]
    fn test_render_ui_with_empty_message_does_not_panic() {
        let view = create_result_view("", None);

        let rendered = ResultDisplay::build(&view).render_ui();

        assert!(rendered.contains("(no image returned)"));
    }

    #[test]
    fn test_preview_of_truncates_long_data_urls() {
        let preview = preview_of(&"a".repeat(100));

        assert!(preview.ends_with("..."));
        assert!(preview.len() <= PREVIEW_CHARACTERS + 3);
    }
}
