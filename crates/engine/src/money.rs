use std::{
    fmt,
    ops::{Add, AddAssign},
};

use serde::{Deserialize, Serialize};

/// An amount in the display currency, flagged when any part of it crossed
/// currencies on the way there.
///
/// Amounts are plain `f64` and never rounded by the engine; rounding to two
/// decimals is left to whoever prints them.
///
/// Adding two amounts ORs their flags: once an approximate contribution has
/// been added, the sum stays approximate.
///
/// # Examples
///
/// ```rust
/// use engine::Amount;
///
/// let mut total = Amount::exact(10.0);
/// total += Amount::new(5.0, true);
/// total += Amount::exact(1.0);
/// assert_eq!(total.amount, 16.0);
/// assert!(total.is_approximate);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amount {
    pub amount: f64,
    pub is_approximate: bool,
}

impl Amount {
    pub const ZERO: Amount = Amount {
        amount: 0.0,
        is_approximate: false,
    };

    #[must_use]
    pub const fn new(amount: f64, is_approximate: bool) -> Self {
        Self {
            amount,
            is_approximate,
        }
    }

    /// Amount that never crossed currencies.
    #[must_use]
    pub const fn exact(amount: f64) -> Self {
        Self::new(amount, false)
    }

    /// Same flag, amount divided by `divisor`.
    #[must_use]
    pub fn divide(self, divisor: f64) -> Self {
        Self::new(self.amount / divisor, self.is_approximate)
    }

    /// Same flag, amount multiplied by `factor`.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.amount * factor, self.is_approximate)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Self::Output {
        Amount::new(
            self.amount + rhs.amount,
            self.is_approximate || rhs.is_approximate,
        )
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.amount += rhs.amount;
        self.is_approximate |= rhs.is_approximate;
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.is_approximate { "~" } else { "" };
        write!(f, "{prefix}{:.2}", self.amount)
    }
}
