//! Currency conversion through a USD pivot.
//!
//! A [`RateTable`] maps each currency to how many units of it one US dollar
//! buys. Converting `A -> B` goes `A -> USD -> B`; converting a currency to
//! itself never touches the table.
use std::collections::HashMap;

use trip_state::Currency;

use crate::{Amount, EngineError, ResultEngine};

/// Snapshot of exchange rates relative to USD.
///
/// USD is implicitly `1.0` and does not need an entry. The table is never
/// refreshed during an aggregation: callers fetch it before and pass it in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RateTable {
    rates: HashMap<Currency, f64>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`RateTable::insert`].
    #[must_use]
    pub fn with_rate(mut self, currency: Currency, rate: f64) -> Self {
        self.insert(currency, rate);
        self
    }

    pub fn insert(&mut self, currency: Currency, rate: f64) {
        self.rates.insert(currency, rate);
    }

    /// Builds a table from raw provider codes, skipping unsupported ones.
    pub fn from_codes<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for (code, rate) in entries {
            match Currency::try_from(code.as_ref()) {
                Ok(currency) => table.insert(currency, rate),
                Err(err) => tracing::warn!("skipping rate: {err}"),
            }
        }
        table
    }

    /// Units of `currency` per US dollar.
    pub fn rate(&self, currency: Currency) -> ResultEngine<f64> {
        if currency.is_pivot() {
            return Ok(1.0);
        }
        let rate = *self
            .rates
            .get(&currency)
            .ok_or(EngineError::MissingRate(currency))?;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(EngineError::InvalidRate { currency, rate });
        }
        Ok(rate)
    }

    pub fn contains(&self, currency: Currency) -> bool {
        currency.is_pivot() || self.rates.contains_key(&currency)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<(Currency, f64)> for RateTable {
    fn from_iter<T: IntoIterator<Item = (Currency, f64)>>(iter: T) -> Self {
        Self {
            rates: iter.into_iter().collect(),
        }
    }
}

/// Converts `amount` from `from` to `to`.
///
/// Same-currency conversion returns `amount` unchanged whatever the table
/// holds. A missing or unusable rate is an error; there is no fallback rate.
pub fn convert(amount: f64, from: Currency, to: Currency, rates: &RateTable) -> ResultEngine<f64> {
    if from == to {
        return Ok(amount);
    }
    let usd = if from.is_pivot() {
        amount
    } else {
        amount / rates.rate(from)?
    };
    if to.is_pivot() {
        Ok(usd)
    } else {
        Ok(usd * rates.rate(to)?)
    }
}

/// `true` iff the two currencies differ, whatever the rates say.
#[must_use]
pub fn is_approximate(from: Currency, to: Currency) -> bool {
    from != to
}

/// Explicit conversion context for one aggregation: the rates and the
/// currency everything is reported in.
#[derive(Clone, Copy, Debug)]
pub struct Converter<'a> {
    pub rates: &'a RateTable,
    pub target: Currency,
}

impl<'a> Converter<'a> {
    pub fn new(rates: &'a RateTable, target: Currency) -> Self {
        Self { rates, target }
    }

    /// Converts into the target currency and flags the crossing.
    pub fn to_target(&self, amount: f64, from: Currency) -> ResultEngine<Amount> {
        let converted = convert(amount, from, self.target, self.rates)?;
        Ok(Amount::new(converted, is_approximate(from, self.target)))
    }

    /// Checks up-front that `from` can be converted into the target.
    pub fn ensure_convertible(&self, from: Currency) -> ResultEngine<()> {
        if from == self.target {
            return Ok(());
        }
        self.rates.rate(from)?;
        self.rates.rate(self.target)?;
        Ok(())
    }
}
