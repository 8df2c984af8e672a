//! Calendar helpers over ISO `YYYY-MM-DD` strings.
//!
//! Ranges are half-open `[start, end)`. Unparseable or inverted ranges are
//! not errors: they count as zero days.
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use trip_state::DatedExpense;

const ISO_DATE: &str = "%Y-%m-%d";

pub(crate) fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE).ok()
}

fn format_day(day: NaiveDate) -> String {
    day.format(ISO_DATE).to_string()
}

/// Whole days in `[start, end)`, clamped to `0`.
pub fn day_count(start: &str, end: &str) -> i64 {
    match (parse_day(start), parse_day(end)) {
        (Some(start), Some(end)) if end > start => (end - start).num_days(),
        _ => 0,
    }
}

/// Every day key in `[start, end)`, in order.
pub fn enumerate_days(start: &str, end: &str) -> Vec<String> {
    let (Some(first), Some(last)) = (parse_day(start), parse_day(end)) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|day| *day < last)
        .map(format_day)
        .collect()
}

/// Entries of `days` keyed inside `[start, end)`.
///
/// Only the recorded keys are visited, however long the range is. Keys are
/// compared as canonical `YYYY-MM-DD` strings, which migration guarantees.
pub(crate) fn days_in_range<'a, V>(
    days: &'a BTreeMap<String, V>,
    start: &str,
    end: &str,
) -> impl Iterator<Item = (&'a String, &'a V)> + use<'a, V> {
    let bounds = match (parse_day(start), parse_day(end)) {
        (Some(first), Some(last)) if last > first => Some(format_day(first)..format_day(last)),
        _ => None,
    };
    bounds.into_iter().flat_map(move |bounds| days.range(bounds))
}

/// Per-day share of `total` over `[start, end)`.
///
/// An empty range counts as a single day, so the whole amount is returned.
pub fn daily_amortized_cost(total: f64, start: &str, end: &str) -> f64 {
    let days = day_count(start, end);
    if days <= 0 {
        total
    } else {
        total / days as f64
    }
}

/// Implied span of a trip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

impl DateRange {
    pub fn day_count(&self) -> i64 {
        day_count(&self.start_date, &self.end_date)
    }
}

/// Earliest start and latest end among the given expenses.
///
/// Returns `None` when no expense has parseable dates.
pub fn trip_date_range<'a, I>(expenses: I) -> Option<DateRange>
where
    I: IntoIterator<Item = &'a dyn DatedExpense>,
{
    let mut span: Option<(NaiveDate, NaiveDate)> = None;
    for expense in expenses {
        let (Some(start), Some(end)) = (
            parse_day(expense.start_date()),
            parse_day(expense.end_date()),
        ) else {
            continue;
        };
        span = Some(match span {
            Some((min, max)) => (min.min(start), max.max(end)),
            None => (start, end),
        });
    }

    span.map(|(start, end)| DateRange {
        start_date: format_day(start),
        end_date: format_day(end),
    })
}

#[cfg(test)]
mod tests {
    use trip_state::{Currency, DailyPersonalExpense, DailySharedExpense, SplitMode};

    use super::*;

    #[test]
    fn day_count_is_clamped() {
        assert_eq!(day_count("2024-01-01", "2024-01-04"), 3);
        assert_eq!(day_count("2024-01-01", "2024-01-01"), 0);
        assert_eq!(day_count("2024-01-04", "2024-01-01"), 0);
        assert_eq!(day_count("not a date", "2024-01-01"), 0);
        assert_eq!(day_count("2024-02-28", "2024-03-01"), 2);
    }

    #[test]
    fn enumerate_days_is_half_open() {
        assert_eq!(
            enumerate_days("2023-12-30", "2024-01-02"),
            vec!["2023-12-30", "2023-12-31", "2024-01-01"]
        );
        assert!(enumerate_days("2024-01-02", "2024-01-02").is_empty());
        assert!(enumerate_days("2024-01-02", "2024-01-01").is_empty());
        assert!(enumerate_days("2024-01-01", "garbage").is_empty());
    }

    #[test]
    fn days_in_range_visits_recorded_keys_only() {
        let days = BTreeMap::from([
            ("2023-12-31".to_string(), 1),
            ("2024-01-01".to_string(), 2),
            ("2024-01-03".to_string(), 3),
            ("2024-01-04".to_string(), 4),
        ]);

        let keys: Vec<_> = days_in_range(&days, "2024-01-01", "2024-01-04")
            .map(|(key, value)| (key.as_str(), *value))
            .collect();
        assert_eq!(keys, vec![("2024-01-01", 2), ("2024-01-03", 3)]);

        assert_eq!(days_in_range(&days, "0001-01-01", "9999-12-31").count(), 4);
        assert_eq!(days_in_range(&days, "2024-01-04", "2024-01-01").count(), 0);
        assert_eq!(days_in_range(&days, "garbage", "2024-01-04").count(), 0);
    }

    #[test]
    fn amortized_cost_falls_back_to_total() {
        assert_eq!(daily_amortized_cost(300.0, "2024-01-01", "2024-01-04"), 100.0);
        assert_eq!(daily_amortized_cost(80.0, "2024-01-01", "2024-01-01"), 80.0);
    }

    #[test]
    fn trip_range_spans_all_dated_expenses() {
        let hotel = DailySharedExpense {
            id: "hotel".into(),
            name: "Hotel".into(),
            currency: Currency::Usd,
            total_cost: 300.0,
            start_date: "2024-01-02".into(),
            end_date: "2024-01-05".into(),
            split_mode: SplitMode::DailyOccupancy,
        };
        let meals = DailyPersonalExpense {
            id: "meals".into(),
            name: "Meals".into(),
            currency: Currency::Usd,
            daily_cost: 20.0,
            start_date: "2024-01-01".into(),
            end_date: "2024-01-03".into(),
        };

        let range =
            trip_date_range([&hotel as &dyn DatedExpense, &meals as &dyn DatedExpense]).unwrap();
        assert_eq!(range.start_date, "2024-01-01");
        assert_eq!(range.end_date, "2024-01-05");
        assert_eq!(range.day_count(), 4);

        assert_eq!(trip_date_range(std::iter::empty()), None);
    }
}
