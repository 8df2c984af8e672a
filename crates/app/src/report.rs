//! Text and JSON rendering of a [`TripBudget`].
//!
//! This is the only place amounts get rounded, to two decimals.
use std::fmt::Write;

use engine::{Amount, DateRange, TravelerBreakdown, TripBudget};
use serde::Serialize;
use trip_state::TripState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerReport<'a> {
    pub id: &'a str,
    pub name: &'a str,
    #[serde(flatten)]
    pub breakdown: &'a TravelerBreakdown,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport<'a> {
    pub currency: &'a str,
    pub date_range: Option<DateRange>,
    pub travelers: Vec<TravelerReport<'a>>,
    pub grand_total: Amount,
    pub total_daily_cost: Amount,
    pub total_one_time_cost: Amount,
    pub unallocated: Amount,
}

/// Travelers in roster order, paired with their breakdown.
fn rows<'a>(trip: &'a TripState, budget: &'a TripBudget) -> Vec<TravelerReport<'a>> {
    trip.travelers
        .iter()
        .filter_map(|traveler| {
            budget
                .traveler_costs
                .get(&traveler.id)
                .map(|breakdown| TravelerReport {
                    id: &traveler.id,
                    name: &traveler.name,
                    breakdown,
                })
        })
        .collect()
}

pub fn json<'a>(trip: &'a TripState, budget: &'a TripBudget) -> JsonReport<'a> {
    JsonReport {
        currency: budget.currency.code(),
        date_range: engine::trip_date_range(trip),
        travelers: rows(trip, budget),
        grand_total: budget.grand_total,
        total_daily_cost: budget.total_daily_cost,
        total_one_time_cost: budget.total_one_time_cost,
        unallocated: budget.unallocated(),
    }
}

pub fn text(trip: &TripState, budget: &TripBudget) -> String {
    let mut out = String::new();

    match engine::trip_date_range(trip) {
        Some(range) => {
            let _ = writeln!(
                out,
                "Trip {} to {} ({} days), amounts in {}",
                range.start_date,
                range.end_date,
                range.day_count(),
                budget.currency
            );
        }
        None => {
            let _ = writeln!(out, "Trip without dated expenses, amounts in {}", budget.currency);
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<20} {:>14} {:>14} {:>14} {:>14} {:>14}",
        "Traveler", "Shared daily", "Shared once", "Personal daily", "Personal once", "Total"
    );

    for row in rows(trip, budget) {
        let b = row.breakdown;
        let _ = writeln!(
            out,
            "{:<20} {:>14} {:>14} {:>14} {:>14} {:>14}",
            row.name,
            b.shared.daily.to_string(),
            b.shared.one_time.to_string(),
            b.personal.daily.to_string(),
            b.personal.one_time.to_string(),
            b.total.to_string()
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{:<20} {:>14}", "Grand total", budget.grand_total.to_string());
    let unallocated = budget.unallocated();
    if unallocated.amount.abs() >= 0.005 {
        let _ = writeln!(out, "{:<20} {:>14}", "Unallocated", unallocated.to_string());
    }
    if budget.grand_total.is_approximate {
        let _ = writeln!(out, "\n~ converted at current rates, approximate");
    }

    out
}

#[cfg(test)]
mod tests {
    use engine::RateTable;
    use trip_state::{Currency, OneTimeSharedExpense};

    use super::*;

    fn trip() -> TripState {
        let mut trip = TripState::empty(Currency::Usd);
        let anna = trip.add_traveler("Anna").unwrap();
        trip.add_traveler("Bruno").unwrap();
        trip.one_time_shared_expenses.push(OneTimeSharedExpense {
            id: "taxi".into(),
            name: "Taxi".into(),
            currency: Currency::Eur,
            total_cost: 46.0,
        });
        trip.set_one_time_shared("taxi", &anna, true).unwrap();
        trip
    }

    #[test]
    fn text_marks_converted_amounts() {
        let trip = trip();
        let rates = RateTable::new().with_rate(Currency::Eur, 0.92);
        let budget = engine::aggregate(&trip, &rates, Currency::Usd).unwrap();

        let rendered = text(&trip, &budget);
        assert!(rendered.contains("Trip without dated expenses, amounts in USD"));
        assert!(rendered.contains("~50.00"));
        assert!(rendered.lines().any(|line| line.starts_with("Bruno")));
        assert!(!rendered.contains("Unallocated"));
    }

    #[test]
    fn json_lists_travelers_in_roster_order() {
        let trip = trip();
        let rates = RateTable::new().with_rate(Currency::Eur, 0.92);
        let budget = engine::aggregate(&trip, &rates, Currency::Usd).unwrap();

        let value = serde_json::to_value(json(&trip, &budget)).unwrap();
        assert_eq!(value["travelers"][0]["name"], "Anna");
        assert_eq!(value["travelers"][1]["total"]["amount"], 0.0);
        assert_eq!(value["currency"], "USD");
        assert!(value["dateRange"].is_null());
    }
}
