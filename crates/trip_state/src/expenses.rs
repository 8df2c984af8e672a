//! The four expense catalogs of a trip.
//!
//! Every expense carries an `id`, a display `name` and the `currency` its
//! amount is quoted in. They differ in how the amount is attributed:
//!
//! | kind                       | amount      | attributed per        |
//! |----------------------------|-------------|-----------------------|
//! | [`DailySharedExpense`]     | `totalCost` | day, split by mode    |
//! | [`DailyPersonalExpense`]   | `dailyCost` | day, owed in full     |
//! | [`OneTimeSharedExpense`]   | `totalCost` | trip, split evenly    |
//! | [`OneTimePersonalExpense`] | `totalCost` | trip, owed in full    |
//!
//! Dates are ISO `YYYY-MM-DD` strings and the range is half-open: `endDate` is
//! the checkout day and never an active day.
use serde::{Deserialize, Serialize};

use crate::Currency;

/// How a daily shared expense is divided among the travelers present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SplitMode {
    /// Each day's amortized cost is split evenly among that day's travelers.
    #[default]
    DailyOccupancy,
    /// One rate per person-night over the whole expense, times each
    /// traveler's nights.
    StayWeighted,
}

impl SplitMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DailyOccupancy => "dailyOccupancy",
            Self::StayWeighted => "stayWeighted",
        }
    }

    /// Parses a persisted mode, falling back to [`SplitMode::DailyOccupancy`].
    #[must_use]
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("stayWeighted") => Self::StayWeighted,
            _ => Self::DailyOccupancy,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySharedExpense {
    pub id: String,
    pub name: String,
    pub currency: Currency,
    pub total_cost: f64,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub split_mode: SplitMode,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPersonalExpense {
    pub id: String,
    pub name: String,
    pub currency: Currency,
    /// Already a per-day rate; never amortized further.
    pub daily_cost: f64,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneTimeSharedExpense {
    pub id: String,
    pub name: String,
    pub currency: Currency,
    pub total_cost: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneTimePersonalExpense {
    pub id: String,
    pub name: String,
    pub currency: Currency,
    pub total_cost: f64,
}

/// Expenses bound to a `[start_date, end_date)` range.
pub trait DatedExpense {
    fn start_date(&self) -> &str;
    fn end_date(&self) -> &str;
}

impl DatedExpense for DailySharedExpense {
    fn start_date(&self) -> &str {
        &self.start_date
    }

    fn end_date(&self) -> &str {
        &self.end_date
    }
}

impl DatedExpense for DailyPersonalExpense {
    fn start_date(&self) -> &str {
        &self.start_date
    }

    fn end_date(&self) -> &str {
        &self.end_date
    }
}
