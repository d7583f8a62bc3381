//! Markdown-ish to display markup rewriting for model output.
//!
//! Each rule is a multi-line regex applied over the whole text in a fixed
//! order. Heading detection must stay ahead of numbered-list detection.
//! The transform is total: unmatched lines pass through untouched.

use once_cell::sync::Lazy;
use regex::Regex;

/// Markup wrapped around heading text.
const HEADING_OPEN: &str = r#"<strong style="color: #2563eb; font-size: 1.1em;">"#;
const HEADING_CLOSE: &str = "</strong>";

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mR)^(#{1,3})\s*(.+)$").expect("heading pattern is valid"));
static STAR_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mR)^\* (.+)$").expect("star bullet pattern is valid"));
static DASH_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mR)^- (.+)$").expect("dash bullet pattern is valid"));
static NUMBERED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mR)^([0-9]+)\.\s+(.+)$").expect("numbered pattern is valid"));

/// Rewrite raw model output for display.
pub fn format_response(text: &str) -> String {
    let heading_replacement = format!("{HEADING_OPEN}$2{HEADING_CLOSE}");

    let formatted = HEADING.replace_all(text, heading_replacement.as_str());
    let formatted = STAR_BULLET.replace_all(&formatted, "• $1");
    let formatted = DASH_BULLET.replace_all(&formatted, "• $1");
    // Paragraph breaks are preserved as-is.
    let formatted = formatted.replace("\n\n", "\n\n");
    let formatted = NUMBERED.replace_all(&formatted, "<strong>$1.</strong> $2");

    formatted.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_becomes_styled_strong() {
        assert_eq!(
            format_response("# Intro"),
            r#"<strong style="color: #2563eb; font-size: 1.1em;">Intro</strong>"#
        );
    }

    #[test]
    fn up_to_three_hashes_are_headings() {
        assert_eq!(
            format_response("### Deep dive"),
            r#"<strong style="color: #2563eb; font-size: 1.1em;">Deep dive</strong>"#
        );
        assert_eq!(
            format_response("####Four"),
            r#"<strong style="color: #2563eb; font-size: 1.1em;">#Four</strong>"#
        );
    }

    #[test]
    fn star_and_dash_bullets() {
        assert_eq!(format_response("* learn fast"), "• learn fast");
        assert_eq!(format_response("- practice daily"), "• practice daily");
    }

    #[test]
    fn bullet_needs_a_space() {
        assert_eq!(format_response("*bold*"), "*bold*");
        assert_eq!(format_response("-1 degrees"), "-1 degrees");
    }

    #[test]
    fn numbered_lines_get_bold_number() {
        assert_eq!(
            format_response("1. Do the exercise"),
            "<strong>1.</strong> Do the exercise"
        );
        assert_eq!(format_response("12.   Review"), "<strong>12.</strong> Review");
    }

    #[test]
    fn only_ascii_digits_start_numbered_lines() {
        assert_eq!(format_response("\u{661}. step"), "\u{661}. step");
        assert_eq!(format_response("\u{ff11}. step"), "\u{ff11}. step");
    }

    #[test]
    fn multi_line_document() {
        let input = "## Objectives\n\n1. Understand loops\n2. Write one\n\n\
                     * Tip: start small\n- Practice\nPlain line";
        let expected = "<strong style=\"color: #2563eb; font-size: 1.1em;\">Objectives</strong>\n\n\
<strong>1.</strong> Understand loops\n\
<strong>2.</strong> Write one\n\n\
• Tip: start small\n\
• Practice\n\
Plain line";
        assert_eq!(format_response(input), expected);
    }

    #[test]
    fn crlf_line_endings_keep_carriage_returns_outside_markup() {
        assert_eq!(format_response("* one\r\n* two"), "• one\r\n• two");
        assert_eq!(
            format_response("# Title\r\nbody"),
            "<strong style=\"color: #2563eb; font-size: 1.1em;\">Title</strong>\r\nbody"
        );
    }

    #[test]
    fn unmatched_text_passes_through() {
        let inputs = [
            "",
            "\n\n",
            "plain sentence",
            "#",
            "1.",
            "\u{0}\u{1}\u{fffd}",
            "   # indented",
        ];
        for input in inputs {
            assert_eq!(format_response(input), input, "input: {input:?}");
        }
    }

    #[test]
    fn formatting_twice_is_same_as_once() {
        let samples = [
            "# Intro\n* a\n- b\n1. c",
            "### Heading with 1. number",
            "1.\n1. nested",
            "* - mixed\n- * mixed",
            "#\n\n## spanning",
            "no markup at all",
        ];

        for sample in samples {
            let once = format_response(sample);
            assert_eq!(format_response(&once), once, "sample: {sample:?}");
        }
    }
}
