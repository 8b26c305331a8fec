//! Merchant identifiers (`PBX_SITE`, `PBX_IDENTIFIANT`).

use super::{raw_integer, WireValue};
use crate::errors::{ValueError, ValueErrorKind};
use serde_json::Value;
use std::fmt;

fn positive(field: &'static str, value: i64) -> Result<u64, ValueError> {
    if value <= 0 {
        return Err(ValueError::new(
            field,
            ValueErrorKind::NotPositive,
            value.to_string(),
        ));
    }
    Ok(value as u64)
}

/// Merchant site number issued by the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SiteValue(u64);

impl SiteValue {
    pub const WIRE_KEY: &'static str = "PBX_SITE";
    const FIELD: &'static str = "site";

    pub fn new(site: u64) -> Result<Self, ValueError> {
        if site == 0 {
            return Err(ValueError::new(Self::FIELD, ValueErrorKind::NotPositive, "0"));
        }
        Ok(Self(site))
    }

    pub fn from_raw(raw: &Value) -> Result<Self, ValueError> {
        let value = raw_integer(Self::FIELD, raw)?;
        positive(Self::FIELD, value).map(Self)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl WireValue for SiteValue {
    fn wire_key(&self) -> &'static str {
        Self::WIRE_KEY
    }

    fn wire_value(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for SiteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Merchant identifier within the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdValue(u64);

impl IdValue {
    pub const WIRE_KEY: &'static str = "PBX_IDENTIFIANT";
    const FIELD: &'static str = "id";

    pub fn new(id: u64) -> Result<Self, ValueError> {
        if id == 0 {
            return Err(ValueError::new(Self::FIELD, ValueErrorKind::NotPositive, "0"));
        }
        Ok(Self(id))
    }

    pub fn from_raw(raw: &Value) -> Result<Self, ValueError> {
        let value = raw_integer(Self::FIELD, raw)?;
        positive(Self::FIELD, value).map(Self)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl WireValue for IdValue {
    fn wire_key(&self) -> &'static str {
        Self::WIRE_KEY
    }

    fn wire_value(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for IdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
