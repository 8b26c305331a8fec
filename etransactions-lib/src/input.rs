//! Raw factory input.
//!
//! The input is a JSON object keyed by lowercase names (`total`, `rang`,
//! ...). Presence of the required keys is checked first, across all of
//! them, before any value is constructed.

use crate::errors::{MissingFieldsError, ValueError};
use crate::values::{
    CommandValue, HolderValue, IdValue, RangValue, SecretValue, SiteValue, TotalValue,
};
use serde_json::{Map, Value};

/// Keys `from_data` requires, in reporting order.
pub const REQUIRED_KEYS: [&str; 7] = ["total", "rang", "site", "id", "command", "holder", "secret"];

/// Required keys absent from `data`. A key mapped to `null` is present; its
/// value is rejected later.
pub fn missing_required_keys(data: &Map<String, Value>) -> Vec<&'static str> {
    REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| !data.contains_key(*key))
        .collect()
}

pub fn are_required_keys_present(data: &Map<String, Value>) -> bool {
    missing_required_keys(data).is_empty()
}

/// Fails with every absent key at once.
pub fn check_required_keys(data: &Map<String, Value>) -> Result<(), MissingFieldsError> {
    let missing = missing_required_keys(data);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingFieldsError { missing })
    }
}

/// The validated required fields.
#[derive(Debug, Clone)]
pub struct RequiredFields {
    pub total: TotalValue,
    pub site: SiteValue,
    pub id: IdValue,
    pub rang: RangValue,
    pub command: CommandValue,
    pub holder: HolderValue,
    pub secret: SecretValue,
}

impl RequiredFields {
    /// Builds every required field. Callers check key presence first.
    pub fn from_map(data: &Map<String, Value>) -> Result<Self, ValueError> {
        static NULL: Value = Value::Null;
        // An absent key reads as null and is rejected.
        let get = |key: &str| data.get(key).unwrap_or(&NULL);
        Ok(Self {
            total: TotalValue::from_raw(get("total"))?,
            site: SiteValue::from_raw(get("site"))?,
            id: IdValue::from_raw(get("id"))?,
            rang: RangValue::from_raw(get("rang"))?,
            command: CommandValue::from_raw(get("command"))?,
            secret: SecretValue::from_raw(get("secret"))?,
            holder: HolderValue::from_raw(get("holder"))?,
        })
    }
}

/// Optional raw inputs, before defaults are applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalInput<'a> {
    pub devise: Option<&'a Value>,
    pub hash: Option<&'a Value>,
    pub time: Option<&'a Value>,
    pub feedback: Option<&'a Value>,
    pub callbacks: Option<&'a Value>,
}

impl<'a> OptionalInput<'a> {
    pub fn from_map(data: &'a Map<String, Value>) -> Self {
        Self {
            devise: data.get("devise"),
            hash: data.get("hash"),
            time: data.get("time"),
            feedback: data.get("feedback"),
            callbacks: data.get("callbacks"),
        }
    }
}
