use serde::{Deserialize, Serialize};

use crate::StateError;

/// ISO currency code accepted by a trip document and its expenses.
///
/// The set is closed: codes outside of it are rejected by [`Currency::try_from`]
/// and replaced by the document display currency during migration.
///
/// Rates are always expressed relative to [`Currency::Usd`], which is also the
/// default display currency of a fresh document.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Chf,
    Cad,
    Aud,
    Nzd,
    Cny,
    Hkd,
    Sgd,
    Krw,
    Inr,
    Thb,
    Mxn,
    Brl,
    Sek,
    Nok,
    Dkk,
    Pln,
    Czk,
    Huf,
    Try,
    Zar,
    Ils,
    Idr,
    Myr,
    Php,
    Vnd,
    Aed,
}

impl Currency {
    /// Every supported currency, in declaration order.
    pub const ALL: [Currency; 30] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Chf,
        Currency::Cad,
        Currency::Aud,
        Currency::Nzd,
        Currency::Cny,
        Currency::Hkd,
        Currency::Sgd,
        Currency::Krw,
        Currency::Inr,
        Currency::Thb,
        Currency::Mxn,
        Currency::Brl,
        Currency::Sek,
        Currency::Nok,
        Currency::Dkk,
        Currency::Pln,
        Currency::Czk,
        Currency::Huf,
        Currency::Try,
        Currency::Zar,
        Currency::Ils,
        Currency::Idr,
        Currency::Myr,
        Currency::Php,
        Currency::Vnd,
        Currency::Aed,
    ];

    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Chf => "CHF",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Nzd => "NZD",
            Currency::Cny => "CNY",
            Currency::Hkd => "HKD",
            Currency::Sgd => "SGD",
            Currency::Krw => "KRW",
            Currency::Inr => "INR",
            Currency::Thb => "THB",
            Currency::Mxn => "MXN",
            Currency::Brl => "BRL",
            Currency::Sek => "SEK",
            Currency::Nok => "NOK",
            Currency::Dkk => "DKK",
            Currency::Pln => "PLN",
            Currency::Czk => "CZK",
            Currency::Huf => "HUF",
            Currency::Try => "TRY",
            Currency::Zar => "ZAR",
            Currency::Ils => "ILS",
            Currency::Idr => "IDR",
            Currency::Myr => "MYR",
            Currency::Php => "PHP",
            Currency::Vnd => "VND",
            Currency::Aed => "AED",
        }
    }

    /// `true` for the pivot currency every rate is quoted against.
    #[must_use]
    pub const fn is_pivot(self) -> bool {
        matches!(self, Currency::Usd)
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = StateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let wanted = value.trim().to_ascii_uppercase();
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code() == wanted)
            .ok_or(StateError::UnsupportedCurrency(wanted))
    }
}

impl core::str::FromStr for Currency {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::try_from(s)
    }
}
