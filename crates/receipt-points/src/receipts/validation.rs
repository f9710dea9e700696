use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde_json::{Map, Value};

use super::domain::{Amount, Item, Receipt};

/// Rejected payload. The message is fixed; `violations` is for logs and the CLI only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("The receipt is invalid")]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub const MESSAGE: &'static str = "The receipt is invalid";
}

/// Names one failed check on the inbound payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    NotAnObject,
    Items,
    Retailer,
    PurchaseDate,
    PurchaseTime,
    Total,
    ItemNotAnObject { index: usize },
    ItemShortDescription { index: usize },
    ItemPrice { index: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NotAnObject => f.write_str("payload must be a JSON object"),
            Violation::Items => f.write_str("items must be a non-empty array"),
            Violation::Retailer => f.write_str("retailer"),
            Violation::PurchaseDate => f.write_str("purchaseDate"),
            Violation::PurchaseTime => f.write_str("purchaseTime"),
            Violation::Total => f.write_str("total"),
            Violation::ItemNotAnObject { index } => write!(f, "items[{index}] must be an object"),
            Violation::ItemShortDescription { index } => {
                write!(f, "items[{index}].shortDescription")
            }
            Violation::ItemPrice { index } => write!(f, "items[{index}].price"),
        }
    }
}

/// True when `payload` would be accepted as a receipt.
pub fn validate(payload: &Value) -> bool {
    parse_receipt(payload).is_ok()
}

/// Checks every field of `payload` and builds a [`Receipt`] only if all of them pass.
pub fn parse_receipt(payload: &Value) -> Result<Receipt, ValidationError> {
    let Some(fields) = payload.as_object() else {
        return Err(ValidationError {
            violations: vec![Violation::NotAnObject],
        });
    };

    let mut violations = Vec::new();

    let items = match fields.get("items").and_then(Value::as_array) {
        Some(entries) if !entries.is_empty() => parse_items(entries, &mut violations),
        _ => {
            violations.push(Violation::Items);
            Vec::new()
        }
    };

    let retailer = string_field(fields, "retailer")
        .filter(|value| matches_retailer(value))
        .map(str::to_string);
    if retailer.is_none() {
        violations.push(Violation::Retailer);
    }

    let purchase_date = string_field(fields, "purchaseDate").and_then(parse_date);
    if purchase_date.is_none() {
        violations.push(Violation::PurchaseDate);
    }

    let purchase_time = string_field(fields, "purchaseTime").and_then(parse_time);
    if purchase_time.is_none() {
        violations.push(Violation::PurchaseTime);
    }

    let total = string_field(fields, "total").and_then(Amount::parse);
    if total.is_none() {
        violations.push(Violation::Total);
    }

    match (retailer, purchase_date, purchase_time, total) {
        (Some(retailer), Some(date), Some(time), Some(total)) if violations.is_empty() => {
            Ok(Receipt::new(retailer, date, time, items, total))
        }
        _ => Err(ValidationError { violations }),
    }
}

fn parse_items(entries: &[Value], violations: &mut Vec<Violation>) -> Vec<Item> {
    let mut items = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let Some(fields) = entry.as_object() else {
            violations.push(Violation::ItemNotAnObject { index });
            continue;
        };

        let description = string_field(fields, "shortDescription")
            .filter(|value| matches_description(value));
        let price = string_field(fields, "price").and_then(Amount::parse);

        match (description, price) {
            (Some(description), Some(price)) => {
                items.push(Item::new(description.to_string(), price));
            }
            (description, price) => {
                if description.is_none() {
                    violations.push(Violation::ItemShortDescription { index });
                }
                if price.is_none() {
                    violations.push(Violation::ItemPrice { index });
                }
            }
        }
    }

    items
}

fn string_field<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    fields.get(name).and_then(Value::as_str)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// The `\s` class of the field patterns: Unicode `Zs`, the ASCII controls
/// `\t \n \v \f \r`, the line and paragraph separators, and U+FEFF.
/// Unlike `char::is_whitespace` it excludes U+0085 and includes U+FEFF.
pub(crate) fn is_pattern_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// `^[\w\s\-]+$`
fn matches_description(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| is_word_char(c) || is_pattern_whitespace(c) || c == '-')
}

/// `^[\w\s\-&]+$`
fn matches_retailer(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| is_word_char(c) || is_pattern_whitespace(c) || c == '-' || c == '&')
}

fn fixed_digits(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// `YYYY-MM-DD` that also names a real calendar day.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split('-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || year.len() != 4 || month.len() != 2 || day.len() != 2 {
        return None;
    }

    let year = i32::try_from(fixed_digits(year)?).ok()?;
    NaiveDate::from_ymd_opt(year, fixed_digits(month)?, fixed_digits(day)?)
}

/// 24-hour `HH:mm`.
fn parse_time(value: &str) -> Option<NaiveTime> {
    let (hour, minute) = value.split_once(':')?;
    if hour.len() != 2 || minute.len() != 2 {
        return None;
    }

    let (hour, minute) = (fixed_digits(hour)?, fixed_digits(minute)?);
    if hour > 23 || minute > 59 {
        return None;
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}
