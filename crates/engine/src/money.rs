use std::fmt;

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Tolerance under which a balance is considered settled.
///
/// Amounts are currency-agnostic reals; the tolerance is two minor units
/// (one cent). The same constant drives both the balance consumers and the
/// settlement planner, so a member never ends up owing a rounding residue.
pub const SETTLE_EPSILON: f64 = 0.01;

/// Rounds an amount to two decimal places (currency precision).
///
/// Only transfer amounts are rounded; net balances stay unrounded because
/// rounding is a presentation concern.
///
/// # Examples
///
/// ```rust
/// use engine::round_cents;
///
/// assert_eq!(round_cents(33.333333), 33.33);
/// assert_eq!(round_cents(66.666666), 66.67);
/// ```
#[must_use]
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Returns `true` if the amount is within [`SETTLE_EPSILON`] of zero.
#[must_use]
pub fn is_settled(amount: f64) -> bool {
    amount.abs() <= SETTLE_EPSILON
}

/// Display currency for formatted output.
///
/// The engine itself is mono-unit and currency-agnostic; the symbol is a
/// presentation setting only and never enters any computation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencySymbol {
    #[default]
    Inr,
    Usd,
    Eur,
    Gbp,
    Jpy,
}

impl CurrencySymbol {
    /// The glyph shown before an amount.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            CurrencySymbol::Inr => "₹",
            CurrencySymbol::Usd => "$",
            CurrencySymbol::Eur => "€",
            CurrencySymbol::Gbp => "£",
            CurrencySymbol::Jpy => "¥",
        }
    }

    /// Formats an amount with the symbol and two fraction digits.
    #[must_use]
    pub fn format(self, amount: f64) -> String {
        format!("{}{:.2}", self.symbol(), amount)
    }
}

impl fmt::Display for CurrencySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl TryFrom<&str> for CurrencySymbol {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "₹" | "INR" | "inr" => Ok(CurrencySymbol::Inr),
            "$" | "USD" | "usd" => Ok(CurrencySymbol::Usd),
            "€" | "EUR" | "eur" => Ok(CurrencySymbol::Eur),
            "£" | "GBP" | "gbp" => Ok(CurrencySymbol::Gbp),
            "¥" | "JPY" | "jpy" => Ok(CurrencySymbol::Jpy),
            other => Err(EngineError::InvalidName(format!(
                "unsupported currency symbol: {other}"
            ))),
        }
    }
}
