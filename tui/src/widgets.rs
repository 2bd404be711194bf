//! Conversion of view trees into ratatui text.

use deckview_core::{NodeKind, ViewNode};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

pub const PREV_LABEL: &str = "[< Prev]";
pub const NEXT_LABEL: &str = "[Next >]";

pub fn slide_text(node: &ViewNode) -> Text<'static> {
    let mut lines = Vec::new();
    push_node(node, &mut lines);
    Text::from(lines)
}

fn push_node(node: &ViewNode, lines: &mut Vec<Line<'static>>) {
    let text = node.text.clone().unwrap_or_default();
    match node.kind {
        NodeKind::Slide => {
            for child in &node.children {
                push_node(child, lines);
            }
        }
        NodeKind::Heading => {
            lines.push(Line::styled(
                text,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::default());
        }
        NodeKind::Subtitle => {
            lines.push(Line::styled(
                text,
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            ));
            lines.push(Line::default());
        }
        NodeKind::BulletList => {
            for child in &node.children {
                push_node(child, lines);
            }
            lines.push(Line::default());
        }
        NodeKind::Bullet => {
            lines.push(Line::from(vec![
                Span::styled("  • ", Style::default().fg(Color::Yellow)),
                Span::raw(text),
            ]));
        }
        NodeKind::Example => {
            let style = Style::default().fg(Color::Green);
            for line in text.lines() {
                lines.push(Line::from(vec![
                    Span::styled("  │ ", style.add_modifier(Modifier::DIM)),
                    Span::styled(line.to_string(), style),
                ]));
            }
        }
        NodeKind::Message => {
            lines.push(Line::styled(text, Style::default().fg(Color::Yellow)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckview_common::Slide;
    use deckview_core::render_slide;

    fn plain(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_slide_lines() {
        let slide = Slide {
            title: Some("Traits".to_string()),
            bullets: vec!["static".to_string(), "dynamic".to_string()],
            example: Some("fn f(x: impl Display)\nfn g(x: &dyn Display)".to_string()),
            ..Slide::default()
        };

        let lines = plain(&slide_text(&render_slide(&slide)));
        assert_eq!(
            lines,
            vec![
                "Traits",
                "",
                "  • static",
                "  • dynamic",
                "",
                "  │ fn f(x: impl Display)",
                "  │ fn g(x: &dyn Display)",
            ]
        );
    }

    #[test]
    fn test_message() {
        let lines = plain(&slide_text(&ViewNode::message("Failed to load content.json")));
        assert_eq!(lines, vec!["Failed to load content.json"]);
    }
}
