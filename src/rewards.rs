// ABOUTME: Reward dashboard data — demo cards, the points/balance summary, and analytics.
// ABOUTME: Also holds the number/currency formatting shared by the chat templates and widgets.

use serde::{Deserialize, Serialize};

/// Rupee value of a single reward point when converted to cashback.
pub const POINT_VALUE_INR: f64 = 0.5;

/// A card as shown on the dashboard. Never mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: u32,
    pub issuer: String,
    pub card_type: String,
    pub masked_number: String,
    pub balance: f64,
    /// Percent, e.g. `2.5` for 2.5%.
    pub cashback_rate: f64,
    pub total_points: u64,
    pub points_expiring_soon: u64,
}

/// Totals across all cards.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardSummary {
    pub total_points: u64,
    pub points_expiring_soon: u64,
    pub total_balance: f64,
    pub active_cards: usize,
    pub estimated_cashback_value: f64,
}

impl RewardSummary {
    pub fn from_cards(cards: &[Card]) -> Self {
        let total_points: u64 = cards.iter().map(|c| c.total_points).sum();
        Self {
            total_points,
            points_expiring_soon: cards.iter().map(|c| c.points_expiring_soon).sum(),
            total_balance: cards.iter().map(|c| c.balance).sum(),
            active_cards: cards.len(),
            estimated_cashback_value: total_points as f64 * POINT_VALUE_INR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyActivity {
    pub month: &'static str,
    pub earned: u64,
    pub redeemed: u64,
}

/// Lifetime and per-month point activity for the analytics tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analytics {
    pub total_earned: u64,
    pub total_redeemed: u64,
    pub this_month: u64,
    pub total_transactions: u64,
    pub monthly_activity: Vec<MonthlyActivity>,
}

impl Analytics {
    /// Largest single earned/redeemed figure, used to scale the bar chart.
    pub fn peak_month_value(&self) -> u64 {
        self.monthly_activity
            .iter()
            .map(|m| m.earned.max(m.redeemed))
            .max()
            .unwrap_or(0)
    }
}

/// The three demo cards every account sees.
pub fn mock_cards() -> Vec<Card> {
    vec![
        Card {
            id: 1,
            issuer: "HDFC Bank".to_string(),
            card_type: "CREDIT".to_string(),
            masked_number: "**** **** **** 9012".to_string(),
            balance: 25_000.50,
            cashback_rate: 2.5,
            total_points: 15_420,
            points_expiring_soon: 500,
        },
        Card {
            id: 2,
            issuer: "Amazon Pay".to_string(),
            card_type: "LOYALTY".to_string(),
            masked_number: "**** **** **** 1098".to_string(),
            balance: 1_250.75,
            cashback_rate: 5.0,
            total_points: 18_750,
            points_expiring_soon: 0,
        },
        Card {
            id: 3,
            issuer: "Flipkart Axis Bank".to_string(),
            card_type: "CREDIT".to_string(),
            masked_number: "**** **** **** 3456".to_string(),
            balance: 8_750.25,
            cashback_rate: 4.0,
            total_points: 13_740,
            points_expiring_soon: 1_200,
        },
    ]
}

pub fn mock_analytics() -> Analytics {
    let months = [
        ("Jul", 1150, 450),
        ("Aug", 850, 300),
        ("Sep", 1050, 200),
        ("Oct", 1300, 350),
        ("Nov", 1200, 150),
        ("Dec", 1100, 320),
    ];
    Analytics {
        total_earned: 6_745,
        total_redeemed: 1_800,
        this_month: 0,
        total_transactions: 30,
        monthly_activity: months
            .into_iter()
            .map(|(month, earned, redeemed)| MonthlyActivity {
                month,
                earned,
                redeemed,
            })
            .collect(),
    }
}

/// Group an integer with commas: `47910` → `47,910`.
pub fn format_points(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Rupee amount with grouping and two decimals: `₹25,000.50`.
pub fn format_inr(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let paise = (amount.abs() * 100.0).round() as u64;
    format!("{sign}₹{}.{:02}", format_points(paise / 100), paise % 100)
}
