//! Currency amounts and per-unit rates in fixed-point integer form.
//!
//! `Money` counts cents. `Rate` counts millionths of a currency unit so that
//! sub-cent rates survive until the final total is rounded to cents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ReservationError, Result};

const CENT_DIGITS: u32 = 2;
const RATE_DIGITS: u32 = 6;
const MICROS_PER_CENT: i128 = 10_000;

/// A currency amount in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    /// Round an amount in millionths half away from zero to whole cents.
    pub(crate) fn from_micros_rounded(micros: i128) -> Result<Self> {
        let half = MICROS_PER_CENT / 2;
        let rounded = if micros >= 0 {
            (micros + half) / MICROS_PER_CENT
        } else {
            (micros - half) / MICROS_PER_CENT
        };
        i64::try_from(rounded)
            .map(Money)
            .map_err(|_| ReservationError::Overflow)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = ReservationError;

    fn from_str(s: &str) -> Result<Self> {
        let cents = parse_fixed(s, CENT_DIGITS, ReservationError::InvalidAmount)?;
        i64::try_from(cents)
            .map(Money)
            .map_err(|_| ReservationError::Overflow)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = DecimalRepr::deserialize(deserializer)?;
        raw.as_string().parse().map_err(serde::de::Error::custom)
    }
}

/// A non-negative price per billing unit (night, hour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Rate {
    micros: i64,
}

impl Rate {
    pub fn from_micros(micros: i64) -> Result<Self> {
        if micros < 0 {
            return Err(ReservationError::InvalidRate(format!(
                "rate must not be negative ({})",
                micros
            )));
        }
        Ok(Rate { micros })
    }

    pub fn from_cents(cents: i64) -> Result<Self> {
        let micros = cents
            .checked_mul(MICROS_PER_CENT as i64)
            .ok_or(ReservationError::Overflow)?;
        Rate::from_micros(micros)
    }

    pub fn micros(self) -> i64 {
        self.micros
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.micros / 1_000_000;
        let frac = format!("{:06}", self.micros % 1_000_000);
        // Keep at least two decimals, drop the rest of the trailing zeros.
        let trimmed = frac.trim_end_matches('0');
        let shown = if trimmed.len() < 2 { &frac[..2] } else { trimmed };
        write!(f, "{}.{}", whole, shown)
    }
}

impl FromStr for Rate {
    type Err = ReservationError;

    fn from_str(s: &str) -> Result<Self> {
        let micros = parse_fixed(s, RATE_DIGITS, ReservationError::InvalidRate)?;
        let micros = i64::try_from(micros).map_err(|_| ReservationError::Overflow)?;
        Rate::from_micros(micros)
    }
}

impl Serialize for Rate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = DecimalRepr::deserialize(deserializer)?;
        raw.as_string().parse().map_err(serde::de::Error::custom)
    }
}

/// Decimal amounts arrive either as JSON strings (`"99.90"`) or numbers (`99.9`).
#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalRepr {
    Text(String),
    Number(serde_json::Number),
}

impl DecimalRepr {
    fn as_string(&self) -> String {
        match self {
            DecimalRepr::Text(s) => s.clone(),
            DecimalRepr::Number(n) => n.to_string(),
        }
    }
}

/// Parse a plain decimal string into an integer scaled by `10^digits`.
///
/// Accepts an optional leading `-`, digits, and at most `digits` fractional
/// digits. Exponents, separators and signs other than a leading `-` are rejected.
/// Malformed input is reported through `error`.
fn parse_fixed(s: &str, digits: u32, error: fn(String) -> ReservationError) -> Result<i128> {
    let invalid = || error(format!("not a decimal amount: '{}'", s));

    let trimmed = s.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let (whole, frac) = match body.split_once('.') {
        Some((w, f)) => (w, f),
        None => (body, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if frac.len() > digits as usize {
        return Err(error(format!(
            "'{}' has more than {} decimal places",
            s, digits
        )));
    }

    let scale = 10i128.pow(digits);
    let whole_value: i128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| ReservationError::Overflow)?
    };
    let frac_value: i128 = if frac.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac, width = digits as usize);
        padded.parse().map_err(|_| invalid())?
    };

    let value = whole_value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or(ReservationError::Overflow)?;

    Ok(if negative { -value } else { value })
}
