//! Allocation of a single daily shared expense.
//!
//! The result is sparse: a traveler who owes nothing has no entry, and callers
//! must read a missing key as zero.
use std::collections::BTreeMap;

use trip_state::{DailySharedExpense, DayUsage, SplitMode};

use crate::{
    Amount, ResultEngine,
    currency::Converter,
    dates::{daily_amortized_cost, days_in_range},
};

/// Traveler id to the amount owed. Absent means zero.
pub type Allocation = BTreeMap<String, Amount>;

/// Splits `expense` among the travelers recorded in `days`.
///
/// Only day keys inside the expense's half-open range count.
pub fn allocate_daily_shared(
    expense: &DailySharedExpense,
    days: &BTreeMap<String, DayUsage>,
    converter: &Converter<'_>,
) -> ResultEngine<Allocation> {
    let allocation = match expense.split_mode {
        SplitMode::DailyOccupancy => daily_occupancy(expense, days, converter)?,
        SplitMode::StayWeighted => stay_weighted(expense, days, converter)?,
    };
    tracing::debug!(
        expense = %expense.id,
        mode = expense.split_mode.as_str(),
        travelers = allocation.len(),
        "daily shared expense allocated"
    );
    Ok(allocation)
}

/// Each day's amortized cost goes evenly to whoever was there that day.
///
/// A day nobody was assigned to contributes nothing: its share of the cost is
/// dropped, not moved to other days.
fn daily_occupancy(
    expense: &DailySharedExpense,
    days: &BTreeMap<String, DayUsage>,
    converter: &Converter<'_>,
) -> ResultEngine<Allocation> {
    let mut allocation = Allocation::new();
    let per_day = daily_amortized_cost(expense.total_cost, &expense.start_date, &expense.end_date);
    let per_day = converter.to_target(per_day, expense.currency)?;

    for (_, usage) in days_in_range(days, &expense.start_date, &expense.end_date) {
        let Some(present) = usage
            .daily_shared
            .get(&expense.id)
            .filter(|present| !present.is_empty())
        else {
            continue;
        };

        let share = per_day.divide(present.len() as f64);
        for traveler in present {
            *allocation.entry(traveler.clone()).or_default() += share;
        }
    }

    Ok(allocation)
}

/// One rate per person-night over the whole expense.
///
/// `perNight = total / nights` where `nights` counts every (day, traveler)
/// slot in range; each traveler owes `perNight * their nights`.
fn stay_weighted(
    expense: &DailySharedExpense,
    days: &BTreeMap<String, DayUsage>,
    converter: &Converter<'_>,
) -> ResultEngine<Allocation> {
    let mut nights: BTreeMap<&str, u32> = BTreeMap::new();
    for (_, usage) in days_in_range(days, &expense.start_date, &expense.end_date) {
        let Some(present) = usage.daily_shared.get(&expense.id) else {
            continue;
        };
        for traveler in present {
            *nights.entry(traveler.as_str()).or_default() += 1;
        }
    }

    let total_nights: u32 = nights.values().sum();
    if total_nights == 0 {
        return Ok(Allocation::new());
    }

    let per_night = converter
        .to_target(expense.total_cost, expense.currency)?
        .divide(f64::from(total_nights));

    Ok(nights
        .into_iter()
        .map(|(traveler, count)| (traveler.to_string(), per_night.scale(f64::from(count))))
        .collect())
}
