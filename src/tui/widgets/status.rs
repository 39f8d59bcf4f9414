// ABOUTME: Status bar widget — renders user, reply source, session time, and typing indicator.
// ABOUTME: Displayed at the bottom of the TUI as a single-line summary.

use std::time::Duration;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::tui::state::RemoteStatus;

pub struct StatusBarParams<'a> {
    pub user_name: Option<&'a str>,
    pub remote: RemoteStatus,
    pub elapsed: Duration,
    pub composing: bool,
}

/// Render the status bar line.
pub fn status_line(params: &StatusBarParams) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let (remote_text, remote_color) = match params.remote {
        RemoteStatus::Disabled => ("local replies", Color::DarkGray),
        RemoteStatus::Checking => ("checking service...", Color::Yellow),
        RemoteStatus::Online => ("service online", Color::Green),
        RemoteStatus::Offline => ("service offline, local replies", Color::Red),
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", params.user_name.unwrap_or("not logged in")),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled("| ", dim),
        Span::styled(format!("{remote_text} "), Style::default().fg(remote_color)),
        Span::styled("| ", dim),
        Span::styled(
            format!("{} ", format_elapsed(params.elapsed)),
            Style::default().fg(Color::White),
        ),
    ];

    if params.composing {
        spans.push(Span::styled("| ", dim));
        spans.push(Span::styled("typing... ", Style::default().fg(Color::Yellow)));
    }

    Line::from(spans)
}

/// Format a session duration: `42s`, `3m 07s`, `1h 05m`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs >= 3600 {
        format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{secs}s")
    }
}
