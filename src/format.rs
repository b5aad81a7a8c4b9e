//! Display formatting for dashboard values.
//!
//! These never change the canonical decimal strings stored in the records;
//! they only produce text for UI surfaces. Formatting is fixed to US English.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::number::parse_decimal;

/// Rendered in place of values that are missing or unparseable.
pub const NOT_AVAILABLE: &str = "N/A";

/// Anything that can be shown as a number: decimals, floats, integers and
/// the decimal strings the backend sends.
pub trait DisplayValue {
    fn to_decimal(&self) -> Option<Decimal>;
}

impl DisplayValue for Decimal {
    fn to_decimal(&self) -> Option<Decimal> {
        Some(*self)
    }
}

impl DisplayValue for f64 {
    fn to_decimal(&self) -> Option<Decimal> {
        if self.is_finite() {
            Decimal::from_f64(*self)
        } else {
            None
        }
    }
}

impl DisplayValue for i64 {
    fn to_decimal(&self) -> Option<Decimal> {
        Some(Decimal::from(*self))
    }
}

impl DisplayValue for u64 {
    fn to_decimal(&self) -> Option<Decimal> {
        Some(Decimal::from(*self))
    }
}

impl DisplayValue for i32 {
    fn to_decimal(&self) -> Option<Decimal> {
        Some(Decimal::from(*self))
    }
}

impl DisplayValue for str {
    fn to_decimal(&self) -> Option<Decimal> {
        parse_decimal(self)
    }
}

impl DisplayValue for String {
    fn to_decimal(&self) -> Option<Decimal> {
        parse_decimal(self)
    }
}

impl<T: DisplayValue + ?Sized> DisplayValue for &T {
    fn to_decimal(&self) -> Option<Decimal> {
        (**self).to_decimal()
    }
}

fn group_int_digits(int_part: &str) -> String {
    // Insert commas every 3 digits.
    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3);
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        out.push(ch);
        let remaining = len.saturating_sub(i + 1);
        if remaining > 0 && remaining % 3 == 0 {
            out.push(',');
        }
    }
    out
}

fn pad_fraction_to_dp(s: &str, dp: usize) -> String {
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
    let mut frac: String = frac_part.chars().take(dp).collect();
    while frac.len() < dp {
        frac.push('0');
    }
    format!("{int_part}.{frac}")
}

/// Whole-dollar currency, e.g. `$1,234,567` or `-$1,234`.
///
/// Rounds half away from zero. Unparseable input renders [`NOT_AVAILABLE`].
pub fn format_currency(value: impl DisplayValue) -> String {
    let Some(value) = value.to_decimal() else {
        return NOT_AVAILABLE.to_string();
    };
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let mut out = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push('$');
    out.push_str(&group_int_digits(&rounded.abs().trunc().to_string()));
    out
}

/// Unit price with cents and no grouping, e.g. `$310.25`.
pub fn format_price(value: impl DisplayValue) -> String {
    let Some(value) = value.to_decimal() else {
        return NOT_AVAILABLE.to_string();
    };
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!(
        "{sign}${}",
        pad_fraction_to_dp(&rounded.abs().to_string(), 2)
    )
}

/// Share counts with grouping and up to three fraction digits, e.g. `1,250.5`.
pub fn format_quantity(value: impl DisplayValue) -> String {
    let Some(value) = value.to_decimal() else {
        return NOT_AVAILABLE.to_string();
    };
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let s = rounded.abs().to_string();
    match s.split_once('.') {
        Some((int_part, frac)) => format!("{sign}{}.{frac}", group_int_digits(int_part)),
        None => format!("{sign}{}", group_int_digits(&s)),
    }
}

fn format_signed_percent(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return "+0.00%".to_string();
    }
    let sign = if rounded.is_sign_negative() { "-" } else { "+" };
    format!("{sign}{}%", pad_fraction_to_dp(&rounded.abs().to_string(), 2))
}

/// Percentage with an explicit sign and two decimals, e.g. `+3.50%`.
///
/// `None` and non-finite values render [`NOT_AVAILABLE`].
pub fn format_percent(value: Option<f64>) -> String {
    match value.and_then(|v| v.to_decimal()) {
        Some(d) => format_signed_percent(d),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Like [`format_percent`] for percentages sent as decimal strings.
pub fn format_percent_str(value: Option<&str>) -> String {
    match value.and_then(parse_decimal) {
        Some(d) => format_signed_percent(d),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Parse the calendar date out of an ISO date or timestamp, as written.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local().date());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|dt| dt.date())
}

/// Long date, e.g. `Jan 5, 2024`. Unparseable input is returned unchanged.
pub fn format_date(value: &str) -> String {
    match parse_iso_date(value) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => value.to_string(),
    }
}

/// Axis label without the year, e.g. `Jan 5`.
pub fn format_short_date(value: &str) -> String {
    match parse_iso_date(value) {
        Some(date) => date.format("%b %-d").to_string(),
        None => value.to_string(),
    }
}

/// Human label for a strategy slug: `sector_specific` -> `Sector specific`.
pub fn strategy_label(strategy: &str) -> String {
    let spaced = strategy.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Title-cased label for a category slug: `large_cap_growth` -> `Large Cap Growth`.
pub fn category_label(category: &str) -> String {
    category
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
