// ABOUTME: Analytics widget — lifetime point metrics and a horizontal earned/redeemed bar chart.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::rewards::{Analytics, format_points};

/// Width in cells of the longest bar.
const BAR_WIDTH: u64 = 30;

pub fn analytics_lines(analytics: &Analytics) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::DarkGray);
    let earned_style = Style::default().fg(Color::Blue);
    let redeemed_style = Style::default().fg(Color::Red);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(" Earned ", label),
            Span::raw(format_points(analytics.total_earned)),
            Span::styled("   Redeemed ", label),
            Span::raw(format_points(analytics.total_redeemed)),
            Span::styled("   This month ", label),
            Span::raw(format_points(analytics.this_month)),
            Span::styled("   Transactions ", label),
            Span::raw(format_points(analytics.total_transactions)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Monthly activity  ", label),
            Span::styled("█ earned ", earned_style),
            Span::styled("█ redeemed", redeemed_style),
        ]),
    ];

    let peak = analytics.peak_month_value();
    for month in &analytics.monthly_activity {
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<4}", month.month), label),
            Span::styled(bar(month.earned, peak), earned_style),
            Span::raw(format!(" {}", format_points(month.earned))),
        ]));
        lines.push(Line::from(vec![
            Span::raw("     "),
            Span::styled(bar(month.redeemed, peak), redeemed_style),
            Span::raw(format!(" {}", format_points(month.redeemed))),
        ]));
    }

    lines
}

/// A bar proportional to `value / peak`, at least one cell for non-zero values.
fn bar(value: u64, peak: u64) -> String {
    if peak == 0 || value == 0 {
        return String::new();
    }
    let cells = (value * BAR_WIDTH / peak).max(1);
    "█".repeat(cells as usize)
}
