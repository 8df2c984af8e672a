//! The trip-state document.
//!
//! A [`TripState`] is the only persisted artifact of a trip: the roster, the
//! four expense catalogs, the usage records tying travelers to expenses, and
//! the display currency. It serializes to plain JSON with camelCase keys and a
//! top-level `version`.
//!
//! Documents coming from outside (files, links, old local state) must go
//! through the `migration` crate before they are handed to the engine.
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use currency::Currency;
pub use error::StateError;
pub use expenses::{
    DailyPersonalExpense, DailySharedExpense, DatedExpense, OneTimePersonalExpense,
    OneTimeSharedExpense, SplitMode,
};
pub use roster::name_key;
pub use usage::{Assignments, DayUsage, KnownExpenses, TravelerSet, UsageCosts};

mod currency;
mod error;
mod expenses;
mod roster;
mod usage;

/// Schema version stamped on every migrated document.
pub const CURRENT_VERSION: u32 = 2;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traveler {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripState {
    pub version: u32,
    pub display_currency: Currency,
    #[serde(default)]
    pub travelers: Vec<Traveler>,
    #[serde(default)]
    pub daily_shared_expenses: Vec<DailySharedExpense>,
    #[serde(default)]
    pub daily_personal_expenses: Vec<DailyPersonalExpense>,
    #[serde(default)]
    pub one_time_shared_expenses: Vec<OneTimeSharedExpense>,
    #[serde(default)]
    pub one_time_personal_expenses: Vec<OneTimePersonalExpense>,
    #[serde(default)]
    pub usage_costs: UsageCosts,
}

impl Default for TripState {
    fn default() -> Self {
        Self::empty(Currency::default())
    }
}

impl TripState {
    /// A fresh document at the current version.
    pub fn empty(display_currency: Currency) -> Self {
        Self {
            version: CURRENT_VERSION,
            display_currency,
            travelers: Vec::new(),
            daily_shared_expenses: Vec::new(),
            daily_personal_expenses: Vec::new(),
            one_time_shared_expenses: Vec::new(),
            one_time_personal_expenses: Vec::new(),
            usage_costs: UsageCosts::default(),
        }
    }

    /// Every currency some expense is quoted in.
    pub fn currencies_in_use(&self) -> BTreeSet<Currency> {
        self.daily_shared_expenses
            .iter()
            .map(|e| e.currency)
            .chain(self.daily_personal_expenses.iter().map(|e| e.currency))
            .chain(self.one_time_shared_expenses.iter().map(|e| e.currency))
            .chain(self.one_time_personal_expenses.iter().map(|e| e.currency))
            .collect()
    }

    /// Drops usage references to travelers and expenses that no longer
    /// exist.
    ///
    /// Returns `(traveler references, expense entries)` pruned.
    pub fn prune_usage(&mut self) -> (usize, usize) {
        let Self {
            travelers,
            daily_shared_expenses,
            daily_personal_expenses,
            one_time_shared_expenses,
            one_time_personal_expenses,
            usage_costs,
            ..
        } = self;

        let known_travelers = travelers.iter().map(|t| t.id.as_str()).collect();
        let pruned_travelers = usage_costs.retain_travelers(&known_travelers);

        let known_expenses = KnownExpenses {
            daily_shared: daily_shared_expenses.iter().map(|e| e.id.as_str()).collect(),
            daily_personal: daily_personal_expenses
                .iter()
                .map(|e| e.id.as_str())
                .collect(),
            one_time_shared: one_time_shared_expenses
                .iter()
                .map(|e| e.id.as_str())
                .collect(),
            one_time_personal: one_time_personal_expenses
                .iter()
                .map(|e| e.id.as_str())
                .collect(),
        };
        let pruned_expenses = usage_costs.retain_expenses(&known_expenses);

        (pruned_travelers, pruned_expenses)
    }

    /// Dated expenses of both daily catalogs.
    pub fn dated_expenses(&self) -> impl Iterator<Item = &dyn DatedExpense> {
        self.daily_shared_expenses
            .iter()
            .map(|e| e as &dyn DatedExpense)
            .chain(
                self.daily_personal_expenses
                    .iter()
                    .map(|e| e as &dyn DatedExpense),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut trip = TripState::empty(Currency::Eur);
        trip.one_time_shared_expenses.push(OneTimeSharedExpense {
            id: "taxi".into(),
            name: "Taxi".into(),
            currency: Currency::Eur,
            total_cost: 40.0,
        });

        let value = serde_json::to_value(&trip).unwrap();
        assert_eq!(value["version"], CURRENT_VERSION);
        assert_eq!(value["displayCurrency"], "EUR");
        assert_eq!(value["oneTimeSharedExpenses"][0]["totalCost"], 40.0);
        assert!(value["usageCosts"]["days"].as_object().unwrap().is_empty());
    }

    #[test]
    fn currencies_in_use_spans_all_catalogs() {
        let mut trip = TripState::empty(Currency::Usd);
        trip.one_time_personal_expenses.push(OneTimePersonalExpense {
            id: "gift".into(),
            name: "Gift".into(),
            currency: Currency::Jpy,
            total_cost: 1000.0,
        });
        trip.daily_personal_expenses.push(DailyPersonalExpense {
            id: "meals".into(),
            name: "Meals".into(),
            currency: Currency::Eur,
            daily_cost: 20.0,
            start_date: "2024-01-01".into(),
            end_date: "2024-01-03".into(),
        });

        let used = trip.currencies_in_use();
        assert_eq!(used, BTreeSet::from([Currency::Eur, Currency::Jpy]));
    }
}
