//! Cost-allocation engine for shared trips.
//!
//! Given a migrated [`TripState`], a [`RateTable`] and a display currency,
//! [`aggregate`] returns what every traveler owes, split into shared/personal
//! and daily/one-time costs, with each amount flagged when it crossed
//! currencies.
//!
//! The engine is pure: it never mutates its inputs and keeps no state between
//! calls, so the same snapshot can be aggregated from several threads.
//!
//! ```rust
//! use engine::{RateTable, aggregate};
//! use trip_state::{Currency, OneTimeSharedExpense, TripState};
//!
//! let mut trip = TripState::empty(Currency::Usd);
//! let anna = trip.add_traveler("Anna").unwrap();
//! let bruno = trip.add_traveler("Bruno").unwrap();
//! trip.one_time_shared_expenses.push(OneTimeSharedExpense {
//!     id: "taxi".into(),
//!     name: "Taxi".into(),
//!     currency: Currency::Usd,
//!     total_cost: 40.0,
//! });
//! trip.set_one_time_shared("taxi", &anna, true).unwrap();
//! trip.set_one_time_shared("taxi", &bruno, true).unwrap();
//!
//! let budget = aggregate(&trip, &RateTable::new(), Currency::Usd).unwrap();
//! assert_eq!(budget.traveler_costs[&anna].shared.one_time.amount, 20.0);
//! assert_eq!(budget.grand_total.amount, 40.0);
//! ```
//!
//!  [`TripState`]: trip_state::TripState

pub use budget::{CategoryCosts, TravelerBreakdown, TripBudget, aggregate};
pub use currency::{Converter, RateTable, convert, is_approximate};
pub use dates::{DateRange, daily_amortized_cost, day_count, enumerate_days};
pub use error::EngineError;
pub use money::Amount;
pub use split::{Allocation, allocate_daily_shared};

mod budget;
mod currency;
mod dates;
mod error;
mod money;
mod split;

type ResultEngine<T> = Result<T, EngineError>;

/// Implied date span of a trip across both daily catalogs.
pub fn trip_date_range(trip: &trip_state::TripState) -> Option<DateRange> {
    dates::trip_date_range(trip.dated_expenses())
}
