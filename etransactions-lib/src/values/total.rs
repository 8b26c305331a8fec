//! Payment amount (`PBX_TOTAL`).
//!
//! Uses `Decimal` so amounts are exact; floats from the raw input are read
//! through their shortest textual form, never through their binary value.

use super::WireValue;
use crate::errors::{ValueError, ValueErrorKind};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

const FIELD: &str = "total";

/// Maximum number of fractional digits the gateway accepts.
const MAX_SCALE: u32 = 2;

/// Non-negative amount rendered with exactly two decimals.
///
/// ```rust
/// use etransactions_lib::{TotalValue, WireValue};
///
/// let total = TotalValue::from_f64(10.0).unwrap();
/// assert_eq!(total.wire_value(), "10.00");
/// assert_eq!(total.as_cents(), Some(1000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TotalValue {
    value: Decimal,
}

impl TotalValue {
    pub const WIRE_KEY: &'static str = "PBX_TOTAL";

    pub fn new(value: Decimal) -> Result<Self, ValueError> {
        let value = value.normalize();
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValueError::new(FIELD, ValueErrorKind::Negative, value.to_string()));
        }
        if value.scale() > MAX_SCALE {
            return Err(ValueError::new(
                FIELD,
                ValueErrorKind::TooPrecise,
                format!("{} has more than {} decimal places", value, MAX_SCALE),
            ));
        }
        let mut fixed = value;
        fixed.rescale(MAX_SCALE);
        if fixed.scale() != MAX_SCALE {
            return Err(ValueError::new(
                FIELD,
                ValueErrorKind::OutOfRange,
                format!("{} cannot be rendered with {} decimal places", value, MAX_SCALE),
            ));
        }
        Ok(Self { value })
    }

    /// Amount in the currency's minor unit (cents for EUR).
    pub fn from_cents(cents: u32) -> Self {
        Self {
            value: Decimal::new(i64::from(cents), MAX_SCALE).normalize(),
        }
    }

    pub fn from_f64(value: f64) -> Result<Self, ValueError> {
        if !value.is_finite() {
            return Err(ValueError::new(FIELD, ValueErrorKind::NotNumeric, value.to_string()));
        }
        // f64's Display never uses exponents and prints the shortest
        // representation that round-trips.
        let decimal = Decimal::from_str(&value.to_string())
            .map_err(|e| ValueError::new(FIELD, ValueErrorKind::OutOfRange, e.to_string()))?;
        Self::new(decimal)
    }

    pub fn from_str_checked(s: &str) -> Result<Self, ValueError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValueError::new(FIELD, ValueErrorKind::Empty, "empty string"));
        }
        let decimal = Decimal::from_str(trimmed)
            .map_err(|_| ValueError::new(FIELD, ValueErrorKind::NotNumeric, trimmed))?;
        Self::new(decimal)
    }

    pub fn from_raw(raw: &Value) -> Result<Self, ValueError> {
        match raw {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::new(Decimal::from(i))
                } else if let Some(u) = n.as_u64() {
                    Self::new(Decimal::from(u))
                } else {
                    let f = n.as_f64().ok_or_else(|| {
                        ValueError::new(FIELD, ValueErrorKind::NotNumeric, n.to_string())
                    })?;
                    Self::from_f64(f)
                }
            }
            Value::String(s) => Self::from_str_checked(s),
            other => Err(ValueError::new(
                FIELD,
                ValueErrorKind::WrongType,
                format!("expected a number, got {}", super::json_type(other)),
            )),
        }
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Amount in minor units, `None` if it does not fit an `i64`.
    pub fn as_cents(&self) -> Option<i64> {
        self.value
            .checked_mul(Decimal::from(100))
            .and_then(|cents| cents.to_i64())
    }
}

impl WireValue for TotalValue {
    fn wire_key(&self) -> &'static str {
        Self::WIRE_KEY
    }

    fn wire_value(&self) -> String {
        let mut fixed = self.value;
        fixed.rescale(MAX_SCALE);
        fixed.to_string()
    }
}

impl fmt::Display for TotalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wire_value())
    }
}

impl FromStr for TotalValue {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_checked(s)
    }
}
