//! Migration of persisted or imported trip documents.
//!
//! [`migrate`] is the only way untrusted input (an imported file, a decoded
//! share link, stale local state) becomes a [`TripState`]. It never fails:
//! malformed entries are dropped one by one, missing fields get defaults,
//! dangling references are pruned, and the result is always stamped with
//! [`CURRENT_VERSION`].
//!
//! Version history:
//!
//! - `1` (or no `version`): `currency` instead of `displayCurrency`, usage
//!   days stored as an array of day objects, sets stored as `{id: true}`.
//! - `2`: the current shape, see [`TripState`].
//!
//! Every version goes through the same sanitizers; a document claiming to be
//! current is not trusted more than an old one.
use serde_json::Value;
use trip_state::{CURRENT_VERSION, TripState};

mod entities;
mod fields;
mod usage;

/// Returns `true` when `raw` lacks a version or carries an older one.
pub fn needs_migration(raw: &Value) -> bool {
    match raw.get("version").and_then(Value::as_u64) {
        Some(version) => version < u64::from(CURRENT_VERSION),
        None => true,
    }
}

/// Parses and migrates a JSON document. Unparseable text yields an empty trip.
pub fn migrate_str(raw: &str) -> TripState {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => migrate(&value),
        Err(err) => {
            tracing::warn!("discarding unparseable trip document: {err}");
            TripState::default()
        }
    }
}

/// Turns any JSON value into a valid [`TripState`].
pub fn migrate(raw: &Value) -> TripState {
    if !raw.is_object() {
        tracing::warn!("trip document is not an object, starting empty");
        return TripState::default();
    }

    let display_currency = fields::currency(raw.get("displayCurrency"))
        .or_else(|| fields::currency(raw.get("currency")))
        .unwrap_or_default();

    let (travelers, dropped_travelers) = entities::travelers(raw.get("travelers"));
    let (daily_shared_expenses, dropped_daily_shared) =
        entities::daily_shared(raw.get("dailySharedExpenses"), display_currency);
    let (daily_personal_expenses, dropped_daily_personal) =
        entities::daily_personal(raw.get("dailyPersonalExpenses"), display_currency);
    let (one_time_shared_expenses, dropped_one_time_shared) =
        entities::one_time_shared(raw.get("oneTimeSharedExpenses"), display_currency);
    let (one_time_personal_expenses, dropped_one_time_personal) =
        entities::one_time_personal(raw.get("oneTimePersonalExpenses"), display_currency);

    let mut trip = TripState {
        version: CURRENT_VERSION,
        display_currency,
        travelers,
        daily_shared_expenses,
        daily_personal_expenses,
        one_time_shared_expenses,
        one_time_personal_expenses,
        usage_costs: usage::usage_costs(raw.get("usageCosts")),
    };

    let (pruned_travelers, pruned_expenses) = trip.prune_usage();
    let from_version = raw.get("version").and_then(Value::as_u64);

    tracing::info!(
        from_version = ?from_version,
        travelers = trip.travelers.len(),
        dropped_travelers,
        dropped_expenses = dropped_daily_shared
            + dropped_daily_personal
            + dropped_one_time_shared
            + dropped_one_time_personal,
        pruned_travelers,
        pruned_expenses,
        "trip document migrated"
    );

    trip
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use trip_state::Currency;

    use super::*;

    #[test]
    fn version_gate() {
        assert!(needs_migration(&json!({})));
        assert!(needs_migration(&json!({"version": 1})));
        assert!(needs_migration(&json!({"version": "2"})));
        assert!(!needs_migration(&json!({"version": CURRENT_VERSION})));
    }

    #[test]
    fn non_objects_become_empty_trips() {
        for raw in [json!(null), json!([1, 2]), json!("trip"), json!(42)] {
            let trip = migrate(&raw);
            assert_eq!(trip, TripState::default());
        }
        assert_eq!(migrate_str("{not json"), TripState::default());
    }

    #[test]
    fn legacy_currency_key_is_honoured() {
        let trip = migrate(&json!({"currency": "eur"}));
        assert_eq!(trip.display_currency, Currency::Eur);

        let trip = migrate(&json!({"displayCurrency": "nope", "currency": "GBP"}));
        assert_eq!(trip.display_currency, Currency::Gbp);
        assert_eq!(migrate(&json!({})).display_currency, Currency::Usd);
    }
}
