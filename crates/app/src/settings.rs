//! Settings for the `tripsplit` binary.
//!
//! Values are layered: built-in defaults, then the TOML config file, then
//! `TRIPSPLIT_` environment variables, then command line flags.
use std::{collections::HashMap, fs, path::PathBuf};

use clap::Parser;
use serde::Deserialize;
use trip_state::Currency;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tripsplit.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub level: String,
    pub display_currency: Option<String>,
    /// Units of each currency per US dollar.
    pub rates: HashMap<String, f64>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            display_currency: None,
            rates: HashMap::new(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tripsplit")]
#[command(about = "Split trip expenses among travelers")]
struct Args {
    /// Trip document (JSON) to report on.
    #[arg(long)]
    state: PathBuf,
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// JSON object of currency code to units per US dollar.
    #[arg(long)]
    rates: Option<PathBuf>,
    /// Override the display currency of the document.
    #[arg(long)]
    display_currency: Option<String>,
    /// Override the log level.
    #[arg(long)]
    level: Option<String>,
    /// Print the breakdown as JSON.
    #[arg(long)]
    json: bool,
}

/// Everything a run needs, resolved.
#[derive(Debug)]
pub struct Settings {
    pub level: String,
    pub state: PathBuf,
    pub display_currency: Option<Currency>,
    pub rates: HashMap<String, f64>,
    pub json: bool,
}

pub fn load() -> Result<Settings> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("TRIPSPLIT"));
    let file: FileConfig = builder.build()?.try_deserialize()?;

    let mut rates = normalize_codes(file.rates);
    if let Some(path) = &args.rates {
        let content = fs::read_to_string(path)?;
        let overrides: HashMap<String, f64> = serde_json::from_str(&content)?;
        rates.extend(normalize_codes(overrides));
    }

    let display_currency = args
        .display_currency
        .or(file.display_currency)
        .map(|code| Currency::try_from(code.as_str()))
        .transpose()?;

    Ok(Settings {
        level: args.level.unwrap_or(file.level),
        state: args.state,
        display_currency,
        rates,
        json: args.json,
    })
}

/// Upper-cases rate codes so file and override entries for the same currency
/// collide.
fn normalize_codes(rates: HashMap<String, f64>) -> HashMap<String, f64> {
    rates
        .into_iter()
        .map(|(code, rate)| (code.trim().to_ascii_uppercase(), rate))
        .collect()
}
