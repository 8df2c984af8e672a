//! Element-wise sanitizers for the roster and the expense catalogs.
//!
//! A malformed entry is dropped on its own; the rest of the list is kept.
use std::collections::BTreeSet;

use serde_json::Value;
use trip_state::{
    Currency, DailyPersonalExpense, DailySharedExpense, OneTimePersonalExpense,
    OneTimeSharedExpense, SplitMode, Traveler, name_key,
};

use crate::fields;

/// Collects sanitized entries, skipping duplicates of an already kept id.
struct Catalog<T> {
    kind: &'static str,
    seen: BTreeSet<String>,
    items: Vec<T>,
    dropped: usize,
}

impl<T> Catalog<T> {
    fn new(kind: &'static str) -> Self {
        Self {
            kind,
            seen: BTreeSet::new(),
            items: Vec::new(),
            dropped: 0,
        }
    }

    fn push(&mut self, index: usize, id: &str, item: Option<T>) {
        match item {
            Some(item) if self.seen.insert(id.to_string()) => self.items.push(item),
            Some(_) => self.reject(index, "duplicate id"),
            None => self.reject(index, "malformed entry"),
        }
    }

    fn reject(&mut self, index: usize, reason: &str) {
        tracing::debug!(kind = self.kind, index, reason, "dropping entry");
        self.dropped += 1;
    }

    fn finish(self) -> (Vec<T>, usize) {
        (self.items, self.dropped)
    }
}

pub(crate) fn travelers(value: Option<&Value>) -> (Vec<Traveler>, usize) {
    let mut catalog = Catalog::new("traveler");
    let mut names = BTreeSet::new();

    for (index, raw) in fields::list(value).iter().enumerate() {
        let Some(id) = fields::id(raw.get("id")) else {
            catalog.reject(index, "missing id");
            continue;
        };
        let traveler = fields::text(raw.get("name"))
            .and_then(|name| name_key(&name).map(|key| (name, key)))
            .map(|(name, key)| (Traveler { id: id.clone(), name }, key));

        match traveler {
            Some((_, key)) if names.contains(&key) => catalog.reject(index, "duplicate name"),
            Some((traveler, key)) => {
                if !catalog.seen.contains(&id) {
                    names.insert(key);
                }
                catalog.push(index, &id, Some(traveler));
            }
            None => catalog.push(index, &id, None),
        }
    }

    catalog.finish()
}

/// Fields every expense kind shares.
struct Common {
    id: String,
    name: String,
    currency: Currency,
}

fn common(raw: &Value, fallback: Currency) -> Option<Common> {
    Some(Common {
        id: fields::id(raw.get("id"))?,
        name: fields::text(raw.get("name"))?,
        currency: fields::currency(raw.get("currency")).unwrap_or(fallback),
    })
}

/// `(start, end)` as ISO strings, only if both parse and `start < end`.
fn date_range(raw: &Value) -> Option<(String, String)> {
    let start = fields::day(raw.get("startDate"))?;
    let end = fields::day(raw.get("endDate"))?;
    (start < end).then(|| (fields::format_day(start), fields::format_day(end)))
}

fn sanitize_list<T>(
    kind: &'static str,
    value: Option<&Value>,
    build: impl Fn(&Value) -> Option<T>,
) -> (Vec<T>, usize) {
    let mut catalog = Catalog::new(kind);
    for (index, raw) in fields::list(value).iter().enumerate() {
        let Some(id) = fields::id(raw.get("id")) else {
            catalog.reject(index, "missing id");
            continue;
        };
        catalog.push(index, &id, build(raw));
    }
    catalog.finish()
}

pub(crate) fn daily_shared(
    value: Option<&Value>,
    fallback: Currency,
) -> (Vec<DailySharedExpense>, usize) {
    sanitize_list("daily shared expense", value, |raw| {
        let common = common(raw, fallback)?;
        let total_cost = fields::amount(raw.get("totalCost"))?;
        let (start_date, end_date) = date_range(raw)?;
        Some(DailySharedExpense {
            id: common.id,
            name: common.name,
            currency: common.currency,
            total_cost,
            start_date,
            end_date,
            split_mode: SplitMode::parse_lenient(raw.get("splitMode").and_then(Value::as_str)),
        })
    })
}

pub(crate) fn daily_personal(
    value: Option<&Value>,
    fallback: Currency,
) -> (Vec<DailyPersonalExpense>, usize) {
    sanitize_list("daily personal expense", value, |raw| {
        let common = common(raw, fallback)?;
        let daily_cost = fields::amount(raw.get("dailyCost"))?;
        let (start_date, end_date) = date_range(raw)?;
        Some(DailyPersonalExpense {
            id: common.id,
            name: common.name,
            currency: common.currency,
            daily_cost,
            start_date,
            end_date,
        })
    })
}

pub(crate) fn one_time_shared(
    value: Option<&Value>,
    fallback: Currency,
) -> (Vec<OneTimeSharedExpense>, usize) {
    sanitize_list("one-time shared expense", value, |raw| {
        let common = common(raw, fallback)?;
        Some(OneTimeSharedExpense {
            id: common.id,
            name: common.name,
            currency: common.currency,
            total_cost: fields::amount(raw.get("totalCost"))?,
        })
    })
}

pub(crate) fn one_time_personal(
    value: Option<&Value>,
    fallback: Currency,
) -> (Vec<OneTimePersonalExpense>, usize) {
    sanitize_list("one-time personal expense", value, |raw| {
        let common = common(raw, fallback)?;
        Some(OneTimePersonalExpense {
            id: common.id,
            name: common.name,
            currency: common.currency,
            total_cost: fields::amount(raw.get("totalCost"))?,
        })
    })
}
