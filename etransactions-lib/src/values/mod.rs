//! Validated field values.
//!
//! One immutable type per gateway parameter. Constructors normalize the raw
//! input and reject anything outside the field's domain, so a value that
//! exists is always valid for the wire.
//!
//! Each type offers a typed constructor (`new`) and `from_raw`, which
//! accepts the loosely typed JSON scalar used by
//! [`TransactionData::from_data`](crate::TransactionData::from_data).

use crate::errors::{ValueError, ValueErrorKind};
use crate::form::FormField;
use serde_json::Value;

mod callback;
mod devise;
mod feedback;
mod hash;
mod identifiers;
mod rang;
mod secret;
mod text;
mod time;
mod total;

pub use callback::{UrlKind, UrlValue};
pub use devise::{Devise, DeviseValue};
pub use feedback::FeedbackValue;
pub use hash::{HashAlgorithm, HashValue};
pub use identifiers::{IdValue, SiteValue};
pub use rang::RangValue;
pub use secret::SecretValue;
pub use text::{CommandValue, HolderValue};
pub use time::TimeValue;
pub use total::TotalValue;

/// A value that renders as one `KEY=value` gateway parameter.
pub trait WireValue {
    /// Fixed uppercase parameter name (`PBX_SITE`, ...).
    fn wire_key(&self) -> &'static str;

    /// Textual form sent to the gateway.
    fn wire_value(&self) -> String;

    /// `KEY=value`, as it appears in the signed string.
    fn to_parameter(&self) -> String {
        format!("{}={}", self.wire_key(), self.wire_value())
    }

    fn to_field(&self) -> FormField {
        FormField::new(self.wire_key(), self.wire_value())
    }
}

/// Reads a signed integer from a JSON number or a numeric string.
pub(crate) fn raw_integer(field: &'static str, raw: &Value) -> Result<i64, ValueError> {
    match raw {
        Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Ok(v)
            } else if n.is_u64() {
                Err(ValueError::new(field, ValueErrorKind::OutOfRange, n.to_string()))
            } else {
                Err(ValueError::new(
                    field,
                    ValueErrorKind::WrongType,
                    format!("expected an integer, got {}", n),
                ))
            }
        }
        Value::String(s) => parse_integer(field, s),
        other => Err(ValueError::new(
            field,
            ValueErrorKind::WrongType,
            format!("expected an integer, got {}", json_type(other)),
        )),
    }
}

pub(crate) fn parse_integer(field: &'static str, s: &str) -> Result<i64, ValueError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ValueError::new(field, ValueErrorKind::Empty, "empty string"));
    }
    trimmed.parse::<i64>().map_err(|e| {
        let digits = trimmed.trim_start_matches(['-', '+']);
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            ValueError::new(field, ValueErrorKind::OutOfRange, e.to_string())
        } else {
            ValueError::new(field, ValueErrorKind::NotNumeric, trimmed)
        }
    })
}

/// Reads a string scalar. Numbers are accepted and stringified, since
/// references like command ids are often numeric.
pub(crate) fn raw_string(field: &'static str, raw: &Value) -> Result<String, ValueError> {
    match raw {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ValueError::new(
            field,
            ValueErrorKind::WrongType,
            format!("expected a string, got {}", json_type(other)),
        )),
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
