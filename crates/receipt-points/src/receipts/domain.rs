use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize, Serializer};

/// Opaque handle returned on submission and used to look up points later.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(pub String);

impl ReceiptId {
    /// Fresh identifier backed by a random (v4) UUID.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ReceiptId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Non-negative money amount exactly as written: whole dollars (any number of digits) and cents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Amount {
    dollars: String,
    cents: u8,
}

impl Amount {
    pub fn from_cents(cents: u64) -> Self {
        Self {
            dollars: (cents / 100).to_string(),
            cents: (cents % 100) as u8,
        }
    }

    /// Total value in cents, when it fits in a `u128`.
    pub fn cents(&self) -> Option<u128> {
        let dollars = self.dollars.parse::<u128>().ok()?;
        dollars.checked_mul(100)?.checked_add(u128::from(self.cents))
    }

    pub fn is_whole_dollars(&self) -> bool {
        self.cents == 0
    }

    /// Multiples of 0.25 depend only on the cents since 100 is itself a multiple of 25.
    pub fn is_quarter_multiple(&self) -> bool {
        self.cents % 25 == 0
    }

    /// `ceil(amount * 0.2)` in whole points, saturating at `u64::MAX`.
    pub fn fifth_rounded_up(&self) -> u64 {
        match self.cents() {
            Some(cents) => u64::try_from(cents.div_ceil(500)).unwrap_or(u64::MAX),
            None => u64::MAX,
        }
    }

    /// Parses `<digits>.<two digits>`; anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let (dollars, cents) = raw.split_once('.')?;
        if dollars.is_empty()
            || cents.len() != 2
            || !dollars.bytes().all(|b| b.is_ascii_digit())
            || !cents.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let dollars = dollars.trim_start_matches('0');
        Some(Self {
            dollars: if dollars.is_empty() { "0" } else { dollars }.to_string(),
            cents: cents.parse().ok()?,
        })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.dollars, self.cents)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One purchased line on a receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    short_description: String,
    price: Amount,
}

impl Item {
    pub(crate) fn new(short_description: String, price: Amount) -> Self {
        Self {
            short_description,
            price,
        }
    }

    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    pub fn price(&self) -> &Amount {
        &self.price
    }
}

/// A purchase event that has passed validation.
///
/// Only [`parse_receipt`](super::validation::parse_receipt) builds these, so every accessor
/// returns data that already satisfies the field patterns, and `items` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    retailer: String,
    purchase_date: NaiveDate,
    purchase_time: NaiveTime,
    items: Vec<Item>,
    total: Amount,
}

impl Receipt {
    pub(crate) fn new(
        retailer: String,
        purchase_date: NaiveDate,
        purchase_time: NaiveTime,
        items: Vec<Item>,
        total: Amount,
    ) -> Self {
        debug_assert!(!items.is_empty(), "validated receipts carry at least one item");
        Self {
            retailer,
            purchase_date,
            purchase_time,
            items,
            total,
        }
    }

    pub fn retailer(&self) -> &str {
        &self.retailer
    }

    pub fn purchase_date(&self) -> NaiveDate {
        self.purchase_date
    }

    pub fn purchase_time(&self) -> NaiveTime {
        self.purchase_time
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn total(&self) -> &Amount {
        &self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_parses_two_decimal_values() {
        assert_eq!(Amount::parse("6.49"), Some(Amount::from_cents(649)));
        assert_eq!(Amount::parse("0.00"), Some(Amount::from_cents(0)));
        assert_eq!(Amount::parse("0012.30"), Some(Amount::from_cents(1230)));
    }

    #[test]
    fn amount_rejects_malformed_values() {
        for raw in ["", "6", "6.4", "6.499", ".49", "-1.00", "6,49", "1.2a", " 1.00", "+1.00"] {
            assert_eq!(Amount::parse(raw), None, "{raw:?} should not parse");
        }
    }

    #[test]
    fn amount_keeps_values_beyond_integer_range() {
        let huge = Amount::parse("99999999999999999999999999999999999999999.75").expect("parses");
        assert_eq!(huge.to_string(), "99999999999999999999999999999999999999999.75");
        assert_eq!(huge.cents(), None);
        assert!(huge.is_quarter_multiple());
        assert!(!huge.is_whole_dollars());
        assert_eq!(huge.fifth_rounded_up(), u64::MAX);

        let past_u64 = Amount::parse("184467440737095516.16").expect("parses");
        assert_eq!(past_u64.cents(), Some(u128::from(u64::MAX) + 1));
        assert_eq!(past_u64.fifth_rounded_up(), 36_893_488_147_419_104);
    }

    #[test]
    fn fifth_rounds_up_per_amount() {
        for (raw, expected) in [("0.00", 0), ("0.01", 1), ("5.00", 1), ("5.01", 2), ("12.25", 3)] {
            let amount = Amount::parse(raw).expect("parses");
            assert_eq!(amount.fifth_rounded_up(), expected, "{raw}");
        }
    }

    #[test]
    fn amount_renders_with_two_decimals() {
        assert_eq!(Amount::from_cents(675).to_string(), "6.75");
        assert_eq!(Amount::from_cents(5).to_string(), "0.05");
        assert_eq!(
            serde_json::to_value(Amount::from_cents(1000)).expect("serialize"),
            serde_json::json!("10.00")
        );
    }

    #[test]
    fn generated_ids_are_distinct_uuids() {
        let first = ReceiptId::generate();
        let second = ReceiptId::generate();
        assert_ne!(first, second);
        assert!(uuid::Uuid::parse_str(first.as_str()).is_ok());
    }
}
