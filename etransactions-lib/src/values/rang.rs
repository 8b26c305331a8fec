//! Rank (`PBX_RANG`), the 3-digit sub-account index.

use super::{raw_integer, WireValue};
use crate::errors::{ValueError, ValueErrorKind};
use serde_json::Value;
use std::fmt;

const FIELD: &str = "rang";
const MAX_RANG: i64 = 999;

/// Rank normalized to exactly three digits, left-padded with zeros.
///
/// `7` and `"07"` both become `"007"`. Anything above 999 is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangValue(String);

impl RangValue {
    pub const WIRE_KEY: &'static str = "PBX_RANG";

    pub fn new(rang: u16) -> Result<Self, ValueError> {
        Self::from_integer(i64::from(rang))
    }

    pub fn from_raw(raw: &Value) -> Result<Self, ValueError> {
        let rang = raw_integer(FIELD, raw)?;
        Self::from_integer(rang)
    }

    fn from_integer(rang: i64) -> Result<Self, ValueError> {
        if rang < 0 {
            return Err(ValueError::new(FIELD, ValueErrorKind::Negative, rang.to_string()));
        }
        if rang > MAX_RANG {
            return Err(ValueError::new(
                FIELD,
                ValueErrorKind::OutOfRange,
                format!("{} does not fit in 3 digits", rang),
            ));
        }
        Ok(Self(format!("{:03}", rang)))
    }

    /// The zero-padded 3-digit string.
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl WireValue for RangValue {
    fn wire_key(&self) -> &'static str {
        Self::WIRE_KEY
    }

    fn wire_value(&self) -> String {
        self.0.clone()
    }
}

impl fmt::Display for RangValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
