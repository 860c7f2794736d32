use super::ResultDisplay;
use crate::core::models::ViewState;
use crate::global_constants::{APPLICATION_NAME, APPLICATION_TAGLINE};

pub fn render_header() -> String {
    format!("{}\n{}", APPLICATION_NAME, APPLICATION_TAGLINE)
}

pub fn render_view_state(state: &ViewState) -> String {
    match state {
        ViewState::Idle => render_uploader_prompt(),
        ViewState::Loading => "Finding your anime twin...".to_string(),
        ViewState::Error(message) => format!("Error: {}", message),
        ViewState::Success(result_view) => ResultDisplay::build(result_view).render_ui(),
    }
}

fn render_uploader_prompt() -> String {
    [
        "Drag & Drop Your Photo",
        "or",
        "[Select File]   [Take a Picture]",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{ImageBlob, RelayResult, ResultView};

    #[test]
    fn test_idle_renders_uploader_prompt() {
        let rendered = render_view_state(&ViewState::Idle);

        assert!(rendered.contains("Drag & Drop Your Photo"));
        assert!(rendered.contains("[Take a Picture]"));
    }

    #[test]
    fn test_loading_renders_loader_only() {
        let rendered = render_view_state(&ViewState::Loading);

        assert_eq!(rendered, "Finding your anime twin...");
    }

    #[test]
    fn test_error_renders_message() {
        let rendered = render_view_state(&ViewState::Error("Something broke".to_string()));

        assert_eq!(rendered, "Error: Something broke");
    }

    #[test]
    fn test_success_renders_result_display() {
        let image = ImageBlob::build("me.png", "image/png", vec![1, 2, 3]).unwrap();
        let result_view = ResultView::build(
            image,
            RelayResult {
                message: "Match: Levi\nScore: 77%".to_string(),
                image_url: Some("https://img/levi.jpg".to_string()),
            },
        );

        let rendered = render_view_state(&ViewState::Success(result_view));

        assert!(rendered.contains("Levi"));
        assert!(rendered.contains("77%"));
    }

    #[test]
    fn test_header_includes_application_name() {
        assert!(render_header().starts_with(APPLICATION_NAME));
    }
}
