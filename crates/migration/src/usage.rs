//! Sanitizer for `usageCosts`.
//!
//! Sets are accepted as arrays of ids or as legacy `{id: flag}` objects, and
//! `days` either as a map keyed by date or as a legacy array of day objects
//! carrying their own `date` (or `id`).
use std::collections::BTreeMap;

use serde_json::{Map, Value};
use trip_state::{Assignments, DayUsage, TravelerSet, UsageCosts};

use crate::fields;

fn traveler_set(value: &Value) -> TravelerSet {
    match value {
        Value::Array(items) => items.iter().filter_map(|item| fields::id(Some(item))).collect(),
        Value::Object(map) => map
            .iter()
            .filter(|(_, flag)| fields::truthy(flag))
            .filter_map(|(id, _)| {
                let trimmed = id.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .collect(),
        _ => TravelerSet::new(),
    }
}

fn assignments(value: Option<&Value>) -> Assignments {
    let Some(map) = fields::object(value) else {
        return Assignments::new();
    };

    let mut out = Assignments::new();
    for (expense, raw) in map {
        let expense = expense.trim();
        if expense.is_empty() {
            continue;
        }
        let set = traveler_set(raw);
        if !set.is_empty() {
            out.entry(expense.to_string()).or_default().extend(set);
        }
    }
    out
}

fn merge(into: &mut Assignments, from: Assignments) {
    for (expense, set) in from {
        into.entry(expense).or_default().extend(set);
    }
}

fn day_usage(raw: &Value) -> DayUsage {
    DayUsage {
        daily_shared: assignments(raw.get("dailyShared")),
        daily_personal: assignments(raw.get("dailyPersonal")),
    }
}

fn insert_day(days: &mut BTreeMap<String, DayUsage>, key: &str, usage: DayUsage) {
    let Some(day) = fields::parse_day(key) else {
        tracing::debug!(day = key, "dropping usage for unparseable day");
        return;
    };
    if usage.is_empty() {
        return;
    }
    let entry = days.entry(fields::format_day(day)).or_default();
    merge(&mut entry.daily_shared, usage.daily_shared);
    merge(&mut entry.daily_personal, usage.daily_personal);
}

fn days_from_map(map: &Map<String, Value>, usage: &mut UsageCosts) {
    for (key, raw) in map {
        insert_day(&mut usage.days, key, day_usage(raw));
    }
}

fn days_from_list(items: &[Value], usage: &mut UsageCosts) {
    for raw in items {
        let key = raw
            .get("date")
            .and_then(Value::as_str)
            .or_else(|| raw.get("id").and_then(Value::as_str));
        match key {
            Some(key) => insert_day(&mut usage.days, key, day_usage(raw)),
            None => tracing::debug!("dropping usage day without a date"),
        }
    }
}

/// Sanitizes the shape only; dangling references are pruned by the caller
/// once the roster and catalogs are known.
pub(crate) fn usage_costs(value: Option<&Value>) -> UsageCosts {
    let mut usage = UsageCosts {
        one_time_shared: assignments(value.and_then(|v| v.get("oneTimeShared"))),
        one_time_personal: assignments(value.and_then(|v| v.get("oneTimePersonal"))),
        days: BTreeMap::new(),
    };

    match value.and_then(|v| v.get("days")) {
        Some(Value::Object(map)) => days_from_map(map, &mut usage),
        Some(Value::Array(items)) => days_from_list(items, &mut usage),
        _ => {}
    }

    usage
}
