// ABOUTME: Main TUI rendering function — assembles header, body, input, and status bar.
// ABOUTME: Splits the terminal frame into vertical chunks and delegates the body to widgets.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::tui::state::{Screen, Tab, TuiState};
use crate::tui::widgets::analytics::analytics_lines;
use crate::tui::widgets::cards::overview_lines;
use crate::tui::widgets::chat::{quick_question_line, render_chat_lines};
use crate::tui::widgets::login::login_lines;
use crate::tui::widgets::status::{StatusBarParams, status_line};

/// Render the full TUI screen layout to the given frame.
pub fn render(frame: &mut Frame, state: &mut TuiState) {
    let area = frame.area();

    let has_input = state.screen == Screen::Login || state.tab == Tab::Chat;
    let show_quick = state.screen == Screen::Dashboard && state.tab == Tab::Chat;

    let mut constraints = vec![
        Constraint::Length(1), // Header
        Constraint::Min(3),    // Body
    ];
    if show_quick {
        constraints.push(Constraint::Length(1));
    }
    if has_input {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(1)); // Status bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    frame.render_widget(Paragraph::new(header_line(state)), chunks[0]);

    let body = chunks[1];
    match state.screen {
        Screen::Login => {
            let lines = login_lines(state.login.step(), state.notice.as_ref());
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body);
        }
        Screen::Dashboard => match state.tab {
            Tab::Overview => {
                let lines = overview_lines(&state.summary, &state.cards);
                frame.render_widget(Paragraph::new(lines), body);
            }
            Tab::Analytics => {
                frame.render_widget(Paragraph::new(analytics_lines(&state.analytics)), body);
            }
            Tab::Chat => render_chat(frame, state, body),
        },
    }

    let mut next = 2;
    if show_quick {
        frame.render_widget(Paragraph::new(quick_question_line()), chunks[next]);
        next += 1;
    }
    if has_input {
        render_input(frame, state, chunks[next]);
        next += 1;
    }

    let status = status_line(&StatusBarParams {
        user_name: state.user_name.as_deref(),
        remote: state.remote,
        elapsed: state.session_start.elapsed(),
        composing: state.composing,
    });
    frame.render_widget(Paragraph::new(status), chunks[next]);
}

fn header_line(state: &TuiState) -> Line<'static> {
    let mut spans = vec![Span::styled(
        " rewardbot",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    if state.screen == Screen::Dashboard {
        spans.push(Span::raw("  "));
        for tab in Tab::ALL {
            let style = if tab == state.tab {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!(" {} ", tab.title()), style));
        }
        spans.push(Span::styled(
            "  Tab: switch · Ctrl+L: log out",
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn render_chat(frame: &mut Frame, state: &mut TuiState, area: Rect) {
    let chat_lines = render_chat_lines(&state.messages, state.composing);

    // Use ratatui's own line_count() so the wrapped height matches rendering.
    let chat_paragraph = Paragraph::new(chat_lines).wrap(Wrap { trim: false });
    let total_lines = chat_paragraph.line_count(area.width) as u16;
    let max_scroll = total_lines.saturating_sub(area.height);

    // Cap scroll_offset so it can't go past the top of the content.
    if state.scroll_offset > max_scroll {
        state.scroll_offset = max_scroll;
    }

    // scroll_offset is lines scrolled up from the bottom (0 = at bottom)
    let scroll = max_scroll.saturating_sub(state.scroll_offset);
    frame.render_widget(chat_paragraph.scroll((scroll, 0)), area);
}

fn render_input(frame: &mut Frame, state: &mut TuiState, area: Rect) {
    let title = match state.screen {
        Screen::Login if state.awaiting_code() => " verification code ",
        Screen::Login => " mobile number ",
        Screen::Dashboard if state.composing => " waiting for reply... ",
        Screen::Dashboard => " ask about your rewards · Ctrl+K: clear ",
    };
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .title(Span::styled(title, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(state.input.clone()).block(block), area);

    if area.width > 0 && area.height > 1 {
        state.clamp_cursor();
        let prefix: String = state.input.chars().take(state.cursor_pos).collect();
        let visual_col = UnicodeWidthStr::width(prefix.as_str());
        let max_visual_col = area.width.saturating_sub(1) as usize;
        let cursor_x = area.x.saturating_add(visual_col.min(max_visual_col) as u16);
        // +1 for the top border.
        let cursor_y = area.y.saturating_add(1);
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}
