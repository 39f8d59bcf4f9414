// ABOUTME: Local intent classifier — an ordered keyword table mapped to canned reply templates.
// ABOUTME: First matching rule wins; the table order is part of the behavior and must not change.

use std::fmt;

/// Coarse topic of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Points,
    Expiry,
    Balance,
    Cashback,
    Redemption,
    Travel,
    Dining,
    Shopping,
    Greeting,
    General,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Points => "points",
            Intent::Expiry => "expiry",
            Intent::Balance => "balance",
            Intent::Cashback => "cashback",
            Intent::Redemption => "redemption",
            Intent::Travel => "travel",
            Intent::Dining => "dining",
            Intent::Shopping => "shopping",
            Intent::Greeting => "greeting",
            Intent::General => "general",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the dispatch table.
///
/// `keywords` is a conjunction of alternatives: every inner slice must have
/// at least one keyword present in the lowercased query.
pub struct Rule {
    pub intent: Intent,
    pub keywords: &'static [&'static [&'static str]],
    pub template: &'static str,
}

impl Rule {
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords
            .iter()
            .all(|group| group.iter().any(|kw| lowered.contains(kw)))
    }
}

/// Reply chosen by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalReply {
    pub intent: Intent,
    pub text: String,
}

const POINTS_SUMMARY: &str = "\
You have a total of 47,910 reward points across all your cards:

• HDFC Bank: 15,420 points
• Amazon Pay: 18,750 points
• Flipkart Axis Bank: 13,740 points

You have 1,700 points expiring within 30 days. Consider redeeming them soon!";

const EXPIRY_SCHEDULE: &str = "\
Here are your points expiry details:

⚠️ Expiring Soon (within 30 days):
• HDFC Bank: 500 points (expires in 15 days)
• Flipkart Axis Bank: 1,200 points (expires in 28 days)

📅 Future Expiries:
• Amazon Pay: 18,750 points (expires in 8 months)
• HDFC Bank: 14,920 points (expires in 11 months)

I recommend redeeming the expiring points first!";

const BALANCE_SUMMARY: &str = "\
Your current card balances:

💳 Available Balances:
• HDFC Bank: ₹25,000.50
• Amazon Pay: ₹1,250.75
• Flipkart Axis Bank: ₹8,750.25

Total Available: ₹35,001.50

All cards are active and ready to use!";

const CASHBACK_RATES: &str = "\
Here are your cashback options by card:

💳 Current Cashback Rates:
• Amazon Pay: 5.0% (highest rate!)
• Flipkart Axis Bank: 4.0%
• HDFC Bank: 2.5%

💰 Estimated cashback value:
Your 47,910 points are worth approximately ₹23,955 in cashback value.

Would you like me to show you the best redemption options?";

const REDEMPTION_OPTIONS: &str = "\
Based on your 47,910 total points, here are my top recommendations:

🏆 Best Value Options:
1. Amazon Gift Voucher: ₹28,746 (20% bonus)
2. Flight Booking Credit: ₹26,000 value
3. Direct Bank Transfer: ₹23,955
4. Shopping Vouchers: ₹25,500-29,000

⚠️ Priority: Redeem your 1,700 expiring points first!

Would you like me to help you start the redemption process?";

const TRAVEL_OPTIONS: &str = "\
Great choice for vacation redemptions! 🏖️

🎫 Travel Options with your points:
• Flight vouchers: Up to ₹26,000 value
• Hotel bookings: 15-20% bonus on redemptions
• Travel packages: Special deals available
• Airport lounge access: 2,000 points per visit

💡 Pro tip: Amazon Pay offers the best travel booking bonuses!";

const DINING_OPTIONS: &str = "\
Delicious dining options with your rewards! 🍽️

🍴 Dining Redemptions:
• Zomato vouchers: 10% bonus (₹26,346 value)
• Swiggy credits: 15% bonus (₹27,596 value)
• Restaurant vouchers: Premium dining experiences
• Food delivery credits: Instant redemption

🔥 Special offer: Use Flipkart Axis for extra dining rewards!";

const SHOPPING_OPTIONS: &str = "\
Shop smart with your reward points! 🛍️

🛒 Shopping Options:
• Amazon vouchers: ₹28,746 value (20% bonus)
• Flipkart vouchers: ₹26,346 value (10% bonus)
• Brand vouchers: Nike, Adidas, Apple, Samsung
• Electronics: Direct purchase discounts

🎯 Best deal: Amazon vouchers give you maximum value!";

const CAPABILITIES: &str = "\
Hello! 👋 I'm your RewardBot assistant. I can help you with:

• Check your reward points balance
• Find points expiry dates
• Suggest best redemption options
• Show cashback opportunities
• Compare card benefits

What would you like to know about your rewards today?";

/// Evaluated top to bottom; the first rule that matches decides the reply.
pub const RULES: &[Rule] = &[
    Rule {
        intent: Intent::Points,
        keywords: &[&["points"], &["how many", "total"]],
        template: POINTS_SUMMARY,
    },
    Rule {
        intent: Intent::Expiry,
        keywords: &[&["expir"]],
        template: EXPIRY_SCHEDULE,
    },
    Rule {
        intent: Intent::Balance,
        keywords: &[&["balance", "money"]],
        template: BALANCE_SUMMARY,
    },
    Rule {
        intent: Intent::Cashback,
        keywords: &[&["cashback", "rates"]],
        template: CASHBACK_RATES,
    },
    Rule {
        intent: Intent::Redemption,
        keywords: &[&["redeem", "redemption", "buy"]],
        template: REDEMPTION_OPTIONS,
    },
    Rule {
        intent: Intent::Travel,
        keywords: &[&["vacation", "travel"]],
        template: TRAVEL_OPTIONS,
    },
    Rule {
        intent: Intent::Dining,
        keywords: &[&["dining", "food", "restaurant"]],
        template: DINING_OPTIONS,
    },
    Rule {
        intent: Intent::Shopping,
        keywords: &[&["shopping", "shop"]],
        template: SHOPPING_OPTIONS,
    },
    Rule {
        intent: Intent::Greeting,
        keywords: &[&["hello", "hi", "help"]],
        template: CAPABILITIES,
    },
];

/// Help text for queries no rule recognises. Echoes the query as typed.
pub fn fallback_reply(query: &str) -> String {
    format!(
        "I understand you're asking about \"{query}\". Here's what I can help you with:

• Points Balance: \"How many points do I have?\"
• Card Balances: \"What are my card balances?\"
• Expiry Info: \"When do my points expire?\"
• Cashback: \"Show me cashback options\"
• Redemption: \"Best redemption options\"

Try one of these questions for detailed information!"
    )
}

/// Pick a canned reply for `query` without any network access.
pub fn classify(query: &str) -> LocalReply {
    let lowered = query.to_lowercase();
    match RULES.iter().find(|rule| rule.matches(&lowered)) {
        Some(rule) => LocalReply {
            intent: rule.intent,
            text: rule.template.to_string(),
        },
        None => LocalReply {
            intent: Intent::General,
            text: fallback_reply(query),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_with_how_many_beats_later_rules() {
        // Also mentions expiry, balance, cashback, redeem, travel, and hello.
        let reply = classify("Hello, how many points before expiry? balance cashback redeem travel");
        assert_eq!(reply.intent, Intent::Points);
    }

    #[test]
    fn points_with_total_matches_points_rule() {
        assert_eq!(classify("What's my TOTAL points?").intent, Intent::Points);
    }

    #[test]
    fn points_alone_does_not_match_points_rule() {
        // "points" without "how many"/"total" falls through to later rules.
        assert_eq!(classify("do my points expire").intent, Intent::Expiry);
    }

    #[test]
    fn expiry_matches_any_expir_prefix() {
        for q in ["When do they expire?", "expiring soon", "EXPIRATION dates"] {
            assert_eq!(classify(q).intent, Intent::Expiry, "query: {q}");
        }
    }

    #[test]
    fn each_rule_reachable_by_its_keywords() {
        let cases = [
            ("what is my balance", Intent::Balance),
            ("how much money do I have", Intent::Balance),
            ("cashback please", Intent::Cashback),
            ("interest rates", Intent::Cashback),
            ("can I redeem", Intent::Redemption),
            ("redemption options", Intent::Redemption),
            ("what can I buy", Intent::Redemption),
            ("vacation ideas", Intent::Travel),
            ("travel deals", Intent::Travel),
            ("dining offers", Intent::Dining),
            ("food vouchers", Intent::Dining),
            ("a restaurant near me", Intent::Dining),
            ("shopping vouchers", Intent::Shopping),
            ("where to shop", Intent::Shopping),
            ("hello", Intent::Greeting),
            ("hi", Intent::Greeting),
            ("help", Intent::Greeting),
        ];
        for (query, expected) in cases {
            assert_eq!(classify(query).intent, expected, "query: {query}");
        }
    }

    #[test]
    fn balance_outranks_cashback() {
        assert_eq!(classify("cashback balance").intent, Intent::Balance);
    }

    #[test]
    fn points_summary_lists_every_card() {
        let reply = classify("How many points do I have?");
        assert_eq!(reply.intent, Intent::Points);
        assert!(reply.text.contains("points"));
        for line in [
            "HDFC Bank: 15,420 points",
            "Amazon Pay: 18,750 points",
            "Flipkart Axis Bank: 13,740 points",
        ] {
            assert!(reply.text.contains(line), "missing {line}");
        }
    }

    #[test]
    fn unmatched_query_echoes_input_verbatim() {
        let reply = classify("asdkjasdkj");
        assert_eq!(reply.intent, Intent::General);
        assert!(reply.text.contains("\"asdkjasdkj\""));
    }

    #[test]
    fn fallback_echo_keeps_original_case() {
        let reply = classify("XYZZY Plugh");
        assert!(reply.text.contains("\"XYZZY Plugh\""));
    }

    #[test]
    fn table_order_is_fixed() {
        let order: Vec<Intent> = RULES.iter().map(|r| r.intent).collect();
        assert_eq!(
            order,
            vec![
                Intent::Points,
                Intent::Expiry,
                Intent::Balance,
                Intent::Cashback,
                Intent::Redemption,
                Intent::Travel,
                Intent::Dining,
                Intent::Shopping,
                Intent::Greeting,
            ]
        );
    }
}
