//! Request timestamp (`PBX_TIME`).

use super::{raw_integer, WireValue};
use crate::errors::{ValueError, ValueErrorKind};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::fmt;

const FIELD: &str = "time";

/// Point in time, rendered once as ISO-8601 (`2020-09-18T10:26:12+00:00`).
///
/// The textual form is computed at construction so a value never changes
/// after it is built. Substituting "now" for an absent or zero timestamp is
/// done by [`TransactionDefaults`](crate::config::TransactionDefaults).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeValue {
    timestamp: i64,
    iso: String,
}

impl TimeValue {
    pub const WIRE_KEY: &'static str = "PBX_TIME";

    /// From unix epoch seconds.
    pub fn from_timestamp(secs: i64) -> Result<Self, ValueError> {
        if secs < 0 {
            return Err(ValueError::new(FIELD, ValueErrorKind::Negative, secs.to_string()));
        }
        let datetime = DateTime::<Utc>::from_timestamp(secs, 0)
            .ok_or_else(|| ValueError::new(FIELD, ValueErrorKind::OutOfRange, secs.to_string()))?;
        Ok(Self::from_datetime(datetime))
    }

    /// Sub-second precision is dropped.
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self {
            timestamp: datetime.timestamp(),
            iso: datetime.to_rfc3339_opts(SecondsFormat::Secs, false),
        }
    }

    pub fn from_raw(raw: &Value) -> Result<Self, ValueError> {
        raw_integer(FIELD, raw).and_then(Self::from_timestamp)
    }

    /// ISO-8601 representation.
    pub fn value(&self) -> &str {
        &self.iso
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

impl WireValue for TimeValue {
    fn wire_key(&self) -> &'static str {
        Self::WIRE_KEY
    }

    fn wire_value(&self) -> String {
        self.iso.clone()
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso)
    }
}
