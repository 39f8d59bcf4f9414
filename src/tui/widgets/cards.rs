// ABOUTME: Overview widget — reward summary figures followed by one block per card.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::rewards::{Card, RewardSummary, format_inr, format_points};

pub fn overview_lines(summary: &RewardSummary, cards: &[Card]) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(" Total points  ", label),
            Span::styled(format_points(summary.total_points), value),
            Span::styled("    Expiring soon  ", label),
            Span::styled(
                format_points(summary.points_expiring_soon),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Active cards  ", label),
            Span::styled(summary.active_cards.to_string(), value),
            Span::styled("    Cashback value  ", label),
            Span::styled(
                format_inr(summary.estimated_cashback_value),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(""),
    ];

    for card in cards {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", card.issuer),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{}  {}", card.card_type, card.masked_number), label),
        ]));
        lines.push(Line::from(format!(
            "   Balance {}   Cashback {:.1}%   Points {}",
            format_inr(card.balance),
            card.cashback_rate,
            format_points(card.total_points)
        )));
        if card.points_expiring_soon > 0 {
            lines.push(Line::from(Span::styled(
                format!(
                    "   ⚠ {} points expiring soon",
                    format_points(card.points_expiring_soon)
                ),
                Style::default().fg(Color::Yellow),
            )));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewards::mock_cards;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.to_string()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn overview_shows_totals_and_every_card() {
        let cards = mock_cards();
        let out = text(&overview_lines(&RewardSummary::from_cards(&cards), &cards));
        assert!(out.contains("47,910"));
        assert!(out.contains("1,700"));
        assert!(out.contains("HDFC Bank"));
        assert!(out.contains("Amazon Pay"));
        assert!(out.contains("Flipkart Axis Bank"));
        assert!(out.contains("₹25,000.50"));
    }

    #[test]
    fn expiry_warning_only_for_cards_with_expiring_points() {
        let cards = mock_cards();
        let out = text(&overview_lines(&RewardSummary::from_cards(&cards), &cards));
        assert_eq!(out.matches("expiring soon").count(), 2);
    }
}
