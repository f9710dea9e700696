use chrono::{Datelike, Timelike};
use serde::Serialize;

use super::domain::Receipt;
use super::validation::is_pattern_whitespace;

const AFTERNOON_WINDOW_MINUTES: std::ops::RangeInclusive<u32> = 14 * 60..=16 * 60;

/// The fixed rules that make up a receipt's reward points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    RetailerName,
    RoundDollarTotal,
    QuarterMultipleTotal,
    ItemPairs,
    DescriptionLength,
    OddPurchaseDay,
    AfternoonPurchase,
}

impl ScoringRule {
    pub const ALL: [ScoringRule; 7] = [
        ScoringRule::RetailerName,
        ScoringRule::RoundDollarTotal,
        ScoringRule::QuarterMultipleTotal,
        ScoringRule::ItemPairs,
        ScoringRule::DescriptionLength,
        ScoringRule::OddPurchaseDay,
        ScoringRule::AfternoonPurchase,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScoringRule::RetailerName => "Retailer name",
            ScoringRule::RoundDollarTotal => "Round dollar total",
            ScoringRule::QuarterMultipleTotal => "Total is a multiple of 0.25",
            ScoringRule::ItemPairs => "Item pairs",
            ScoringRule::DescriptionLength => "Description length",
            ScoringRule::OddPurchaseDay => "Odd purchase day",
            ScoringRule::AfternoonPurchase => "Purchased 2:00pm-4:00pm",
        }
    }

    pub fn points(self, receipt: &Receipt) -> u64 {
        match self {
            ScoringRule::RetailerName => receipt
                .retailer()
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .count() as u64,
            ScoringRule::RoundDollarTotal => {
                if receipt.total().is_whole_dollars() {
                    50
                } else {
                    0
                }
            }
            ScoringRule::QuarterMultipleTotal => {
                if receipt.total().is_quarter_multiple() {
                    25
                } else {
                    0
                }
            }
            ScoringRule::ItemPairs => (receipt.items().len() as u64 / 2) * 5,
            ScoringRule::DescriptionLength => receipt
                .items()
                .iter()
                .filter(|item| description_length(item.short_description()) % 3 == 0)
                .map(|item| item.price().fifth_rounded_up())
                .fold(0, u64::saturating_add),
            ScoringRule::OddPurchaseDay => {
                if receipt.purchase_date().day() % 2 == 1 {
                    6
                } else {
                    0
                }
            }
            ScoringRule::AfternoonPurchase => {
                let time = receipt.purchase_time();
                let minutes = time.hour() * 60 + time.minute();
                if AFTERNOON_WINDOW_MINUTES.contains(&minutes) {
                    10
                } else {
                    0
                }
            }
        }
    }

    fn notes(self, receipt: &Receipt, points: u64) -> String {
        match self {
            ScoringRule::RetailerName => format!(
                "{points} alphanumeric character(s) in '{}'",
                receipt.retailer()
            ),
            ScoringRule::RoundDollarTotal | ScoringRule::QuarterMultipleTotal => {
                format!("total {}", receipt.total())
            }
            ScoringRule::ItemPairs => format!("{} item(s)", receipt.items().len()),
            ScoringRule::DescriptionLength => {
                let matching = receipt
                    .items()
                    .iter()
                    .filter(|item| description_length(item.short_description()) % 3 == 0)
                    .count();
                format!("{matching} description(s) with a length divisible by 3")
            }
            ScoringRule::OddPurchaseDay => format!("purchased on {}", receipt.purchase_date()),
            ScoringRule::AfternoonPurchase => {
                format!("purchased at {}", receipt.purchase_time().format("%H:%M"))
            }
        }
    }
}

/// Characters left once surrounding whitespace is trimmed.
fn description_length(description: &str) -> usize {
    description.trim_matches(is_pattern_whitespace).chars().count()
}

/// Points for a validated receipt: the sum of every [`ScoringRule`], saturating at `u64::MAX`.
pub fn score(receipt: &Receipt) -> u64 {
    ScoringRule::ALL
        .iter()
        .map(|rule| rule.points(receipt))
        .fold(0, u64::saturating_add)
}

/// Discrete contribution to a score, kept for audits and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub rule: ScoringRule,
    pub points: u64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub components: Vec<ScoreComponent>,
    pub total: u64,
}

/// Per-rule view of [`score`]; `total` always matches it.
pub fn breakdown(receipt: &Receipt) -> ScoreBreakdown {
    let components: Vec<ScoreComponent> = ScoringRule::ALL
        .iter()
        .map(|&rule| {
            let points = rule.points(receipt);
            ScoreComponent {
                rule,
                points,
                notes: rule.notes(receipt, points),
            }
        })
        .collect();
    let total = components
        .iter()
        .map(|component| component.points)
        .fold(0, u64::saturating_add);

    ScoreBreakdown { components, total }
}
