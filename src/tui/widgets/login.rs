// ABOUTME: Login widget — prompt text for the mobile-number and verification-code steps.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::auth::LoginStep;
use crate::tui::state::Notice;

pub fn login_lines(step: &LoginStep, notice: Option<&Notice>) -> Vec<Line<'static>> {
    let title = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let hint = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(Span::styled(" Welcome to RewardBot", title)),
        Line::from(""),
    ];

    match step {
        LoginStep::EnterMobile => {
            lines.push(Line::from(" Enter your mobile number and press Enter."));
            lines.push(Line::from(Span::styled(" e.g. 9876543210 or +919876543210", hint)));
        }
        LoginStep::EnterCode { mobile_number } => {
            lines.push(Line::from(format!(
                " Enter the 6-digit code sent to {mobile_number}."
            )));
            lines.push(Line::from(Span::styled(
                " Demo code: 123456 · Esc to change number",
                hint,
            )));
        }
    }

    if let Some(notice) = notice {
        let color = if notice.is_error { Color::Red } else { Color::Green };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", notice.text),
            Style::default().fg(color),
        )));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.to_string()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn code_step_names_the_number() {
        let step = LoginStep::EnterCode {
            mobile_number: "9876543210".to_string(),
        };
        assert!(text(&login_lines(&step, None)).contains("sent to 9876543210"));
    }

    #[test]
    fn error_notice_is_red() {
        let notice = Notice {
            text: "bad code".to_string(),
            is_error: true,
        };
        let lines = login_lines(&LoginStep::EnterMobile, Some(&notice));
        let last = &lines.last().unwrap().spans[0];
        assert!(last.content.contains("bad code"));
        assert_eq!(last.style.fg, Some(Color::Red));
    }
}
