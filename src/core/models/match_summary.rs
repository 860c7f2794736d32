use crate::global_constants::{MATCH_LINE_PREFIX, SCORE_LINE_PREFIX};

/// Display name and score pulled out of the two-line relay message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub display_name: String,
    pub score: String,
}

impl MatchSummary {
    pub fn from_message(message: &str) -> Self {
        let mut lines = message.lines();

        let display_name = strip_line_prefix(lines.next(), MATCH_LINE_PREFIX);
        let score = strip_line_prefix(lines.next(), SCORE_LINE_PREFIX);

        Self {
            display_name,
            score,
        }
    }
}

fn strip_line_prefix(line: Option<&str>, prefix: &str) -> String {
    match line {
        Some(line) => line.strip_prefix(prefix).unwrap_or(line).to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_message_extracts_name_and_score() {
        let summary = MatchSummary::from_message("Match: Abe Takaya.jpg\nScore: 97.12%");

        assert_eq!(summary.display_name, "Abe Takaya.jpg");
        assert_eq!(summary.score, "97.12%");
    }

    #[test]
    fn test_from_message_with_empty_string_yields_empty_fields() {
        let summary = MatchSummary::from_message("");

        assert_eq!(summary, MatchSummary::default());
    }

    #[test]
    fn test_from_message_with_single_line_has_empty_score() {
        let summary = MatchSummary::from_message("Match: Lone Wolf");

        assert_eq!(summary.display_name, "Lone Wolf");
        assert_eq!(summary.score, "");
    }

    #[test]
    fn test_from_message_keeps_lines_without_prefix() {
        let summary = MatchSummary::from_message("Please upload an image.");

        assert_eq!(summary.display_name, "Please upload an image.");
        assert_eq!(summary.score, "");
    }

    #[test]
    fn test_from_message_tolerates_crlf_line_endings() {
        let summary = MatchSummary::from_message("Match: X\r\nScore: 50%\r\n");

        assert_eq!(summary.display_name, "X");
        assert_eq!(summary.score, "50%");
    }
}
