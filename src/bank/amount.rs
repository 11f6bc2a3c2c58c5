use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of places kept past the decimal point.
const DECIMAL_DIGITS: usize = 4;
const SCALE: i64 = 10_000;

/// A monetary value with four places past the decimal.
/// Backed by an i64 so that balance arithmetic stays exact; floating point
/// would drift over repeated deposits and withdrawals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount {
    store: i64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount parsing error: {0}")]
    Parse(String),

    #[error("overflow while computing amount")]
    Overflow,

    #[error("underflow while computing amount")]
    Underflow,
}

impl Amount {
    pub const ZERO: Amount = Amount { store: 0 };

    /// An amount of `units` whole currency units.
    pub const fn from_units(units: i64) -> Self {
        Amount {
            store: units * SCALE,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.store == 0
    }

    pub fn is_positive(&self) -> bool {
        self.store > 0
    }

    pub fn checked_add(&self, other: Amount) -> Result<Amount, AmountError> {
        self.store
            .checked_add(other.store)
            .map(|store| Amount { store })
            .ok_or(AmountError::Overflow)
    }

    pub fn checked_sub(&self, other: Amount) -> Result<Amount, AmountError> {
        self.store
            .checked_sub(other.store)
            .map(|store| Amount { store })
            .ok_or(AmountError::Underflow)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountError::Parse(s.into()));
        }

        // Sign is handled up front so that forms like "-.05" parse; the
        // rest of the string must be an unsigned decimal.
        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if unsigned.is_empty() {
            return Err(AmountError::Parse(s.into()));
        }

        let (whole, decimal) = match unsigned.split_once('.') {
            None => (unsigned, ""),
            Some(parts) => parts,
        };

        // A second '.' or non-digit characters are malformed
        if decimal.contains('.') || !decimal.chars().all(|c| c.is_ascii_digit()) {
            return Err(AmountError::Parse(s.into()));
        }

        // Integer part may be empty, as in ".05"
        let whole = if whole.is_empty() { "0" } else { whole };
        if !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(AmountError::Parse(s.into()));
        }
        let units: i64 = whole.parse().map_err(|_| AmountError::Parse(s.into()))?;

        // Truncate past four decimal places, pad with zeros below
        let mut frac_digits = decimal.to_owned();
        frac_digits.truncate(DECIMAL_DIGITS);
        while frac_digits.len() < DECIMAL_DIGITS {
            frac_digits.push('0');
        }
        let frac: i64 = frac_digits
            .parse()
            .map_err(|_| AmountError::Parse(s.into()))?;

        let store = units.checked_mul(SCALE).ok_or(AmountError::Overflow)?;
        let store = store.checked_add(frac).ok_or(AmountError::Overflow)?;

        Ok(Amount {
            store: if negative { -store } else { store },
        })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.store < 0 { "-" } else { "" };
        let abs = self.store.unsigned_abs();
        write!(
            f,
            "{}{}.{:04}",
            sign,
            abs / SCALE as u64,
            abs % SCALE as u64
        )
    }
}
