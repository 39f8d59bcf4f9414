// ABOUTME: Chat widget — renders transcript messages into styled ratatui Lines.
// ABOUTME: User and assistant messages get distinct prefixes; a typing line shows while composing.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::chat::{Message, Origin, QUICK_QUESTIONS};

/// Render a slice of transcript messages into styled Lines for display.
pub fn render_chat_lines(messages: &[Message], composing: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (idx, msg) in messages.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::from(""));
        }

        let time = msg.created_at.format("%H:%M").to_string();
        match msg.origin {
            Origin::User => {
                lines.push(Line::from(vec![
                    Span::styled(
                        "❯ ",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(msg.text.clone()),
                    Span::styled(format!("  {time}"), Style::default().fg(Color::DarkGray)),
                ]));
            }
            Origin::Assistant => {
                // First line gets the prefix, subsequent lines are plain.
                for (i, text) in msg.text.split('\n').enumerate() {
                    if i == 0 {
                        lines.push(Line::from(vec![
                            Span::styled(
                                "⏺ ",
                                Style::default()
                                    .fg(Color::Cyan)
                                    .add_modifier(Modifier::BOLD),
                            ),
                            Span::raw(text.to_string()),
                        ]));
                    } else {
                        lines.push(Line::from(Span::raw(format!("  {text}"))));
                    }
                }
                let tag = match &msg.intent {
                    Some(intent) => format!("  {time} · {intent}"),
                    None => format!("  {time}"),
                };
                lines.push(Line::from(Span::styled(
                    tag,
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
    }

    if composing {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "⏺ RewardBot is typing...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}

/// Numbered list of quick questions, shown above the chat input.
pub fn quick_question_line() -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = vec![Span::styled(" Try: ", dim)];
    for (i, q) in QUICK_QUESTIONS.iter().enumerate() {
        spans.push(Span::styled(
            format!("[{}] ", i + 1),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::styled(format!("{q}  "), dim));
    }
    Line::from(spans)
}
