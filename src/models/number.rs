//! Lenient numeric field handling.
//!
//! The backend serializes decimals either as JSON strings (`"1234.50"`) or as
//! bare numbers (`1234.5`) depending on the field and serializer version. The
//! records keep monetary amounts as strings and return fields as `f64`; the
//! deserializers here accept both wire forms for either.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    String(String),
}

/// Parse a decimal string as sent by the backend.
///
/// Returns `None` for empty or malformed input. Scientific notation
/// (`"1e3"`) is accepted since some serializers emit it for large values.
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Deserialize a decimal amount that may arrive as a string or a number,
/// keeping its textual form.
pub fn deserialize_decimal_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n.to_string()),
        NumberOrString::String(s) => Ok(s),
    }
}

/// Like [`deserialize_decimal_string`] but allows `null` and missing fields.
pub fn deserialize_optional_decimal_string<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<NumberOrString>::deserialize(deserializer)?.map(|value| match value {
            NumberOrString::Number(n) => n.to_string(),
            NumberOrString::String(s) => s,
        }),
    )
}

/// Deserialize a nullable numeric field that may arrive as a number or a
/// numeric string. Strings that do not parse are rejected.
pub fn deserialize_optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("number out of range: {n}"))),
        Some(NumberOrString::String(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid numeric value: {s:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "deserialize_decimal_string")]
        amount: String,
        #[serde(default, deserialize_with = "deserialize_optional_f64")]
        ret: Option<f64>,
        #[serde(default, deserialize_with = "deserialize_optional_decimal_string")]
        maybe: Option<String>,
    }

    #[test]
    fn accepts_string_and_number_amounts() {
        let a: Sample = serde_json::from_str(r#"{"amount": "100.50"}"#).unwrap();
        assert_eq!(a.amount, "100.50");
        assert_eq!(a.ret, None);
        assert_eq!(a.maybe, None);

        let b: Sample = serde_json::from_str(r#"{"amount": 250, "maybe": 1.5}"#).unwrap();
        assert_eq!(b.amount, "250");
        assert_eq!(b.maybe.as_deref(), Some("1.5"));
    }

    #[test]
    fn return_fields_accept_numeric_strings() {
        let s: Sample = serde_json::from_str(r#"{"amount": "1", "ret": "3.25"}"#).unwrap();
        assert_eq!(s.ret, Some(3.25));

        let s: Sample = serde_json::from_str(r#"{"amount": "1", "ret": null}"#).unwrap();
        assert_eq!(s.ret, None);

        let err = serde_json::from_str::<Sample>(r#"{"amount": "1", "ret": "abc"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn parse_decimal_handles_blank_and_scientific() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("  "), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal(" 12.5 "), Some(Decimal::new(125, 1)));
        assert_eq!(parse_decimal("1e3"), Some(Decimal::from(1000)));
    }
}
