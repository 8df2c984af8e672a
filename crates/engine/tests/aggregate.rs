use engine::{Amount, EngineError, RateTable, aggregate, trip_date_range};
use serde_json::json;
use trip_state::{Currency, TripState};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn hotel_trip(split_mode: &str, days: serde_json::Value) -> TripState {
    migration::migrate(&json!({
        "version": 2,
        "displayCurrency": "USD",
        "travelers": [{"id": "a", "name": "Anna"}, {"id": "b", "name": "Bruno"}],
        "dailySharedExpenses": [{
            "id": "hotel", "name": "Hotel", "currency": "USD", "totalCost": 300,
            "startDate": "2024-01-01", "endDate": "2024-01-04", "splitMode": split_mode
        }],
        "usageCosts": {"days": days}
    }))
}

#[test]
fn stay_weighted_scenario() {
    let trip = hotel_trip(
        "stayWeighted",
        json!({
            "2024-01-01": {"dailyShared": {"hotel": ["a", "b"]}},
            "2024-01-02": {"dailyShared": {"hotel": ["a"]}},
            "2024-01-03": {"dailyShared": {"hotel": ["a"]}}
        }),
    );

    let budget = aggregate(&trip, &RateTable::new(), Currency::Usd).unwrap();
    assert_eq!(budget.traveler_costs["a"].shared.daily.amount, 225.0);
    assert_eq!(budget.traveler_costs["b"].shared.daily.amount, 75.0);
    assert_eq!(budget.grand_total.amount, 300.0);
    assert_eq!(budget.total_daily_cost.amount, 300.0);
}

#[test]
fn daily_occupancy_scenario() {
    let trip = hotel_trip(
        "dailyOccupancy",
        json!({
            "2024-01-01": {"dailyShared": {"hotel": ["a", "b"]}},
            "2024-01-02": {"dailyShared": {"hotel": ["a"]}},
            "2024-01-03": {"dailyShared": {"hotel": ["b"]}}
        }),
    );

    let budget = aggregate(&trip, &RateTable::new(), Currency::Usd).unwrap();
    assert_eq!(budget.traveler_costs["a"].shared.daily.amount, 150.0);
    assert_eq!(budget.traveler_costs["b"].shared.daily.amount, 150.0);
}

#[test]
fn split_modes_diverge_on_uneven_occupancy() {
    let days = json!({
        "2024-01-01": {"dailyShared": {"hotel": ["a", "b"]}},
        "2024-01-02": {"dailyShared": {"hotel": ["a"]}},
        "2024-01-03": {"dailyShared": {"hotel": ["a"]}}
    });
    let rates = RateTable::new();

    let occupancy = aggregate(&hotel_trip("dailyOccupancy", days.clone()), &rates, Currency::Usd)
        .unwrap();
    let weighted = aggregate(&hotel_trip("stayWeighted", days), &rates, Currency::Usd).unwrap();

    assert_eq!(occupancy.traveler_costs["b"].total.amount, 50.0);
    assert_eq!(weighted.traveler_costs["b"].total.amount, 75.0);
}

#[test]
fn empty_occupancy_day_is_dropped_not_redistributed() {
    let trip = hotel_trip(
        "dailyOccupancy",
        json!({
            "2024-01-01": {"dailyShared": {"hotel": ["a"]}},
            "2024-01-03": {"dailyShared": {"hotel": ["b"]}}
        }),
    );

    let budget = aggregate(&trip, &RateTable::new(), Currency::Usd).unwrap();
    assert_eq!(budget.grand_total.amount, 200.0);
    assert_eq!(budget.total_daily_cost.amount, 300.0);
    assert_eq!(budget.unallocated().amount, 100.0);
}

#[test]
fn full_trip_breakdown() {
    let trip = migration::migrate(&json!({
        "version": 2,
        "displayCurrency": "EUR",
        "travelers": [
            {"id": "a", "name": "Anna"},
            {"id": "b", "name": "Bruno"},
            {"id": "c", "name": "Carla"}
        ],
        "dailySharedExpenses": [{
            "id": "hotel", "name": "Hotel", "currency": "EUR", "totalCost": 200,
            "startDate": "2024-05-01", "endDate": "2024-05-03"
        }],
        "dailyPersonalExpenses": [{
            "id": "pass", "name": "Metro pass", "currency": "USD", "dailyCost": 10,
            "startDate": "2024-05-01", "endDate": "2024-05-03"
        }],
        "oneTimeSharedExpenses": [{
            "id": "dinner", "name": "Dinner", "currency": "EUR", "totalCost": 90
        }],
        "oneTimePersonalExpenses": [{
            "id": "museum", "name": "Museum", "currency": "EUR", "totalCost": 15
        }],
        "usageCosts": {
            "oneTimeShared": {"dinner": ["a", "b"]},
            "oneTimePersonal": {"museum": ["b"]},
            "days": {
                "2024-05-01": {
                    "dailyShared": {"hotel": ["a", "b"]},
                    "dailyPersonal": {"pass": ["a"]}
                },
                "2024-05-02": {
                    "dailyShared": {"hotel": ["a"]},
                    "dailyPersonal": {"pass": ["a"]}
                },
                "2024-05-03": {"dailyPersonal": {"pass": ["a"]}}
            }
        }
    }));
    let rates = RateTable::new().with_rate(Currency::Eur, 0.5);

    let budget = aggregate(&trip, &rates, trip.display_currency).unwrap();
    let a = &budget.traveler_costs["a"];
    let b = &budget.traveler_costs["b"];
    let c = &budget.traveler_costs["c"];

    assert_eq!(a.shared.daily, Amount::exact(150.0));
    // 10 USD a day at 0.5 EUR per USD, checkout day excluded.
    assert_eq!(a.personal.daily, Amount::new(10.0, true));
    assert_eq!(a.shared.one_time, Amount::exact(45.0));
    assert_eq!(a.total, Amount::new(205.0, true));

    assert_eq!(b.shared.daily, Amount::exact(50.0));
    assert_eq!(b.personal.one_time, Amount::exact(15.0));
    assert_eq!(b.total, Amount::exact(110.0));

    assert_eq!(*c, engine::TravelerBreakdown::default());

    assert_eq!(budget.currency, Currency::Eur);
    assert_eq!(budget.total_daily_cost, Amount::new(210.0, true));
    assert_eq!(budget.total_one_time_cost, Amount::exact(105.0));
    assert!(budget.grand_total.is_approximate);
}

#[test]
fn grand_total_is_the_sum_of_traveler_totals() {
    let trip = migration::migrate(&json!({
        "displayCurrency": "USD",
        "travelers": [
            {"id": "a", "name": "Anna"},
            {"id": "b", "name": "Bruno"},
            {"id": "c", "name": "Carla"}
        ],
        "dailySharedExpenses": [{
            "id": "hotel", "name": "Hotel", "currency": "GBP", "totalCost": 317.29,
            "startDate": "2024-01-01", "endDate": "2024-01-08"
        }],
        "oneTimeSharedExpenses": [{"id": "x", "name": "Tour", "currency": "JPY", "totalCost": 10001}],
        "usageCosts": {
            "oneTimeShared": {"x": ["a", "b", "c"]},
            "days": {
                "2024-01-01": {"dailyShared": {"hotel": ["a", "b", "c"]}},
                "2024-01-02": {"dailyShared": {"hotel": ["a", "c"]}},
                "2024-01-05": {"dailyShared": {"hotel": ["b"]}}
            }
        }
    }));
    let rates = RateTable::new()
        .with_rate(Currency::Gbp, 0.79)
        .with_rate(Currency::Jpy, 151.3);

    let budget = aggregate(&trip, &rates, Currency::Usd).unwrap();
    let sum = budget
        .traveler_costs
        .values()
        .fold(0.0, |sum, breakdown| sum + breakdown.total.amount);
    assert_eq!(budget.grand_total.amount, sum);
}

#[test]
fn missing_rate_is_reported() {
    let trip = migration::migrate(&json!({
        "displayCurrency": "EUR",
        "oneTimePersonalExpenses": [{"id": "x", "name": "Gift", "currency": "THB", "totalCost": 500}]
    }));

    let rates = RateTable::new().with_rate(Currency::Eur, 0.92);
    assert_eq!(
        aggregate(&trip, &rates, Currency::Eur),
        Err(EngineError::MissingRate(Currency::Thb))
    );

    let rates = rates.with_rate(Currency::Thb, 36.0);
    let budget = aggregate(&trip, &rates, Currency::Eur).unwrap();
    assert_close(budget.total_one_time_cost.amount, 0.0);
}

#[test]
fn display_currency_is_an_explicit_argument() {
    let trip = hotel_trip(
        "stayWeighted",
        json!({"2024-01-01": {"dailyShared": {"hotel": ["a"]}}}),
    );
    let rates = RateTable::new().with_rate(Currency::Eur, 0.9);

    let usd = aggregate(&trip, &rates, Currency::Usd).unwrap();
    let eur = aggregate(&trip, &rates, Currency::Eur).unwrap();

    assert_eq!(usd.traveler_costs["a"].total, Amount::exact(300.0));
    assert!(eur.traveler_costs["a"].total.is_approximate);
    assert_close(eur.traveler_costs["a"].total.amount, 270.0);
}

#[test]
fn aggregation_leaves_input_untouched_across_threads() {
    let trip = hotel_trip(
        "dailyOccupancy",
        json!({"2024-01-02": {"dailyShared": {"hotel": ["a", "b"]}}}),
    );
    let before = trip.clone();
    let rates = RateTable::new();

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| aggregate(&trip, &rates, Currency::Usd)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap().unwrap())
            .collect()
    });

    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(trip, before);
}

#[test]
fn trip_range_covers_daily_expenses() {
    let trip = hotel_trip("dailyOccupancy", json!({}));
    let range = trip_date_range(&trip).unwrap();
    assert_eq!(range.start_date, "2024-01-01");
    assert_eq!(range.end_date, "2024-01-04");

    assert_eq!(trip_date_range(&TripState::default()), None);
}
