//! Pure text formatting for chat messages.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Split a line of raw message text on `**` and emphasize every
/// odd-indexed segment. Unmatched delimiters degrade gracefully: trailing
/// text after an odd split is still emitted, just bold.
pub fn emphasis_spans(text: &str) -> Vec<Span<'static>> {
    text.split("**")
        .enumerate()
        .map(|(i, part)| {
            if i % 2 == 1 {
                Span::styled(
                    part.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(part.to_string())
            }
        })
        .collect()
}

/// Render message text into display lines, one per raw line.
pub fn message_lines(text: &str) -> Vec<Line<'static>> {
    text.lines().map(|l| Line::from(emphasis_spans(l))).collect()
}

/// Render a citation list as a labeled block beneath the message text.
/// Empty input renders nothing, equivalent to absent citations.
pub fn citation_lines(citations: &[String]) -> Vec<Line<'static>> {
    if citations.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![Line::from(Span::styled(
        "📖 Sources:",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for citation in citations {
        lines.push(Line::from(Span::styled(
            format!("  • {}", citation),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents<'a>(spans: &'a [Span<'a>]) -> Vec<&'a str> {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn is_bold(span: &Span) -> bool {
        span.style.add_modifier.contains(Modifier::BOLD)
    }

    #[test]
    fn splits_on_double_asterisk() {
        let spans = emphasis_spans("Hello **world**");
        assert_eq!(contents(&spans), ["Hello ", "world", ""]);
        assert!(!is_bold(&spans[0]));
        assert!(is_bold(&spans[1]));
        assert!(!is_bold(&spans[2]));
    }

    #[test]
    fn plain_text_stays_plain() {
        let spans = emphasis_spans("no markup here");
        assert_eq!(contents(&spans), ["no markup here"]);
        assert!(!is_bold(&spans[0]));
    }

    #[test]
    fn unmatched_delimiter_keeps_trailing_text() {
        let spans = emphasis_spans("start **unclosed");
        assert_eq!(contents(&spans), ["start ", "unclosed"]);
    }

    #[test]
    fn citations_render_in_order() {
        let citations = vec!["Ch.1".to_string(), "Ch.3".to_string()];
        let lines = citation_lines(&citations);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].spans[0].content, "📖 Sources:");
        assert_eq!(lines[1].spans[0].content, "  • Ch.1");
        assert_eq!(lines[2].spans[0].content, "  • Ch.3");
    }

    #[test]
    fn empty_citations_render_nothing() {
        assert!(citation_lines(&[]).is_empty());
    }
}
