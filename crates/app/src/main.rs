use std::fs;

use engine::RateTable;

mod error;
mod report;
mod settings;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "tripsplit={level},engine={level},migration={level},trip_state={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    run(settings)?;
    Ok(())
}

fn run(settings: settings::Settings) -> error::Result<()> {
    tracing::info!(state = %settings.state.display(), "loading trip document");
    let raw = fs::read_to_string(&settings.state)?;
    let trip = migration::migrate_str(&raw);

    let display_currency = settings.display_currency.unwrap_or(trip.display_currency);
    let rates = RateTable::from_codes(settings.rates);
    if rates.is_empty() {
        tracing::warn!("no exchange rates configured, only USD amounts can be converted");
    } else {
        tracing::debug!(rates = rates.len(), "exchange rates loaded");
    }
    let budget = match engine::aggregate(&trip, &rates, display_currency) {
        Ok(budget) => budget,
        Err(err) => {
            tracing::error!("failed to aggregate trip: {err}");
            return Err(err.into());
        }
    };

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&report::json(&trip, &budget))?);
    } else {
        print!("{}", report::text(&trip, &budget));
    }

    Ok(())
}
