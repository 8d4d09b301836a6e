//! Tolerant decoding of the scalar fields the catalog service sends.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

pub fn id_from_json(pk: &JsonValue) -> Option<String> {
    if let Some(s) = pk.as_str() {
        return Some(s.trim().to_string());
    }
    if let Some(i) = pk.as_i64() {
        return Some(i.to_string());
    }
    if let Some(u) = pk.as_u64() {
        return Some(u.to_string());
    }
    None
}

/// Parses a calendar date in any of the shapes the service has been seen to emit:
/// `2024-01-05`, RFC 3339 (`2024-01-05T00:00:00Z`) or RFC 2822 (`Fri, 05 Jan 2024 00:00:00 GMT`).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.date_naive());
    }
    // Naive timestamps without offset: keep the date part.
    s.get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}

/// Parses a decimal amount typed by an operator or sent as a string.
pub fn parse_decimal(s: &str) -> Option<f64> {
    let v = s.trim().parse::<f64>().ok()?;
    v.is_finite().then_some(v)
}

pub fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<JsonValue>::deserialize(deserializer)?;
    match raw {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => Ok(n.as_f64()),
        Some(JsonValue::String(s)) if s.trim().is_empty() => Ok(None),
        Some(JsonValue::String(s)) => parse_decimal(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("expected decimal price, got {:?}", s))),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected decimal price, got {}",
            other
        ))),
    }
}

/// Unparseable dates decode as missing rather than failing the whole collection.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(match raw {
        Some(JsonValue::String(s)) => parse_date(&s),
        _ => None,
    })
}
