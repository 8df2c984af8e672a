//! Total readers for loosely typed JSON fields.
//!
//! Each reader returns `None` for anything it cannot use; none of them fail.
use chrono::NaiveDate;
use serde_json::{Map, Value};
use trip_state::Currency;

const ISO_DATE: &str = "%Y-%m-%d";

/// A non-blank string, or an integer rendered as one.
pub(crate) fn id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}

/// A non-blank string with inner whitespace collapsed.
pub(crate) fn text(value: Option<&Value>) -> Option<String> {
    let raw = value?.as_str()?;
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}

/// A finite, non-negative amount from a JSON number or numeric string.
pub(crate) fn amount(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (parsed.is_finite() && parsed >= 0.0).then_some(parsed)
}

/// An ISO date, also accepting a full timestamp whose date part is ISO.
pub(crate) fn day(value: Option<&Value>) -> Option<NaiveDate> {
    parse_day(value?.as_str()?)
}

pub(crate) fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = match raw.split_once('T') {
        Some((date, _)) => date,
        None => raw,
    };
    NaiveDate::parse_from_str(date_part, ISO_DATE).ok()
}

pub(crate) fn format_day(day: NaiveDate) -> String {
    day.format(ISO_DATE).to_string()
}

pub(crate) fn currency(value: Option<&Value>) -> Option<Currency> {
    Currency::try_from(value?.as_str()?).ok()
}

pub(crate) fn list(value: Option<&Value>) -> &[Value] {
    match value {
        Some(Value::Array(items)) => items,
        _ => &[],
    }
}

pub(crate) fn object(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value?.as_object()
}

/// `true` for values a legacy `{id: flag}` set treats as membership.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}
