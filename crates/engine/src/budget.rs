//! Per-traveler cost breakdown of a whole trip.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use trip_state::{Currency, TripState};

use crate::{
    Amount, ResultEngine,
    currency::{Converter, RateTable},
    dates::days_in_range,
    split::allocate_daily_shared,
};

/// Daily and one-time amounts of one side (shared or personal) of a breakdown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCosts {
    pub daily: Amount,
    pub one_time: Amount,
}

/// What one traveler owes, by category.
///
/// `total` is accumulated alongside every category addition, in the same
/// order, rather than summed from the categories afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerBreakdown {
    pub shared: CategoryCosts,
    pub personal: CategoryCosts,
    pub total: Amount,
}

impl TravelerBreakdown {
    fn add_shared_daily(&mut self, amount: Amount) {
        self.shared.daily += amount;
        self.total += amount;
    }

    fn add_personal_daily(&mut self, amount: Amount) {
        self.personal.daily += amount;
        self.total += amount;
    }

    fn add_shared_one_time(&mut self, amount: Amount) {
        self.shared.one_time += amount;
        self.total += amount;
    }

    fn add_personal_one_time(&mut self, amount: Amount) {
        self.personal.one_time += amount;
        self.total += amount;
    }
}

/// Result of [`aggregate`].
///
/// `traveler_costs` holds an entry for every traveler in the roster, even
/// those who owe nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripBudget {
    pub currency: Currency,
    pub traveler_costs: BTreeMap<String, TravelerBreakdown>,
    /// Sum of every traveler's `total`.
    pub grand_total: Amount,
    /// Expense-level daily shared plus daily personal cost.
    pub total_daily_cost: Amount,
    /// Expense-level one-time shared plus one-time personal cost.
    pub total_one_time_cost: Amount,
}

impl TripBudget {
    /// Expense-level cost that no traveler was charged for: daily-occupancy
    /// days with nobody present and one-time shared expenses with nobody
    /// assigned.
    pub fn unallocated(&self) -> Amount {
        let expense_level = self.total_daily_cost + self.total_one_time_cost;
        Amount::new(
            expense_level.amount - self.grand_total.amount,
            expense_level.is_approximate || self.grand_total.is_approximate,
        )
    }
}

/// Expense-level totals, computed apart from the per-traveler path.
#[derive(Default)]
struct CategoryTotals {
    daily_shared: Amount,
    daily_personal: Amount,
    one_time_shared: Amount,
    one_time_personal: Amount,
}

/// Computes the cost breakdown of `trip` in `display_currency`.
///
/// `trip` must already have gone through migration. Every currency used by an
/// expense must be convertible with `rates`, otherwise the whole call fails
/// with [`EngineError::MissingRate`] before anything is computed.
///
///  [`EngineError::MissingRate`]: crate::EngineError::MissingRate
pub fn aggregate(
    trip: &TripState,
    rates: &RateTable,
    display_currency: Currency,
) -> ResultEngine<TripBudget> {
    let converter = Converter::new(rates, display_currency);
    for currency in trip.currencies_in_use() {
        converter.ensure_convertible(currency)?;
    }

    let mut traveler_costs: BTreeMap<String, TravelerBreakdown> = trip
        .traveler_ids()
        .into_iter()
        .map(|id| (id.to_string(), TravelerBreakdown::default()))
        .collect();
    let mut totals = CategoryTotals::default();
    let usage = &trip.usage_costs;

    for expense in &trip.daily_shared_expenses {
        let allocation = allocate_daily_shared(expense, &usage.days, &converter)?;
        for (traveler, amount) in allocation {
            if let Some(breakdown) = traveler_costs.get_mut(&traveler) {
                breakdown.add_shared_daily(amount);
            }
        }
        totals.daily_shared += converter.to_target(expense.total_cost, expense.currency)?;
    }

    for expense in &trip.daily_personal_expenses {
        let per_day = converter.to_target(expense.daily_cost, expense.currency)?;
        for (_, day_usage) in days_in_range(&usage.days, &expense.start_date, &expense.end_date) {
            let Some(assigned) = day_usage.daily_personal.get(&expense.id) else {
                continue;
            };
            for traveler in assigned {
                totals.daily_personal += per_day;
                if let Some(breakdown) = traveler_costs.get_mut(traveler) {
                    breakdown.add_personal_daily(per_day);
                }
            }
        }
    }

    for expense in &trip.one_time_shared_expenses {
        let cost = converter.to_target(expense.total_cost, expense.currency)?;
        totals.one_time_shared += cost;

        let Some(assigned) = usage
            .one_time_shared
            .get(&expense.id)
            .filter(|assigned| !assigned.is_empty())
        else {
            continue;
        };
        let share = cost.divide(assigned.len() as f64);
        for traveler in assigned {
            if let Some(breakdown) = traveler_costs.get_mut(traveler) {
                breakdown.add_shared_one_time(share);
            }
        }
    }

    for expense in &trip.one_time_personal_expenses {
        let cost = converter.to_target(expense.total_cost, expense.currency)?;
        let Some(assigned) = usage.one_time_personal.get(&expense.id) else {
            continue;
        };
        for traveler in assigned {
            totals.one_time_personal += cost;
            if let Some(breakdown) = traveler_costs.get_mut(traveler) {
                breakdown.add_personal_one_time(cost);
            }
        }
    }

    let grand_total = traveler_costs
        .values()
        .fold(Amount::ZERO, |sum, breakdown| sum + breakdown.total);

    tracing::debug!(
        travelers = traveler_costs.len(),
        grand_total = grand_total.amount,
        currency = %display_currency,
        "trip budget aggregated"
    );

    Ok(TripBudget {
        currency: display_currency,
        traveler_costs,
        grand_total,
        total_daily_cost: totals.daily_shared + totals.daily_personal,
        total_one_time_cost: totals.one_time_shared + totals.one_time_personal,
    })
}
