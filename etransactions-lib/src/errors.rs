//! Error types for e-Transactions request building.
//!
//! Every value object validates at construction, so errors surface at the
//! exact point where raw input is turned into a field. The factory either
//! builds a complete container or fails with the first error it meets.

use std::fmt;

/// Stable error codes, usable across an FFI or logging boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    /// A single field value was rejected
    InvalidValue = 1000,
    /// Required input keys were absent
    MissingFields = 2000,
    /// The container lacks fields needed to sign
    Incomplete = 2001,
    /// Hash algorithm tag outside the supported set
    UnsupportedAlgorithm = 3000,
    /// MAC computation failed
    Crypto = 3001,
    /// Configuration could not be loaded
    Config = 4000,
}

/// The constraint a raw field value violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueErrorKind {
    /// The raw value has the wrong JSON type (e.g. an object for an amount).
    WrongType,
    /// A string that should hold a number does not.
    NotNumeric,
    /// A negative number where only non-negative values make sense.
    Negative,
    /// Zero or negative where a strictly positive integer is required.
    NotPositive,
    /// The number does not fit the field's width or range.
    OutOfRange,
    /// More fractional digits than the gateway accepts.
    TooPrecise,
    /// Not a member of the closed set of codes (currency, hash).
    UnknownCode,
    /// The URL does not parse or is not an absolute http(s) URL.
    MalformedUrl,
    /// Empty or whitespace-only string.
    Empty,
    /// The secret key is not an even-length hexadecimal string.
    NotHex,
}

impl fmt::Display for ValueErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::WrongType => "wrong type",
            Self::NotNumeric => "not numeric",
            Self::Negative => "negative",
            Self::NotPositive => "not a positive integer",
            Self::OutOfRange => "out of range",
            Self::TooPrecise => "too many decimal places",
            Self::UnknownCode => "unknown code",
            Self::MalformedUrl => "malformed url",
            Self::Empty => "empty",
            Self::NotHex => "not hexadecimal",
        };
        f.write_str(label)
    }
}

/// A single field's raw input failed its domain constraint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {kind} ({detail})")]
pub struct ValueError {
    /// Input key of the rejected field (`total`, `rang`, ...).
    pub field: &'static str,
    /// Which constraint was violated.
    pub kind: ValueErrorKind,
    /// Human readable detail, never containing secret material.
    pub detail: String,
}

impl ValueError {
    pub fn new(field: &'static str, kind: ValueErrorKind, detail: impl Into<String>) -> Self {
        let err = Self {
            field,
            kind,
            detail: detail.into(),
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(field = err.field, kind = %err.kind, "rejected field value");
        err
    }
}

/// The factory input lacks one or more required keys.
///
/// All missing keys are collected before failing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required keys: {}", .missing.join(", "))]
pub struct MissingFieldsError {
    pub missing: Vec<&'static str>,
}

impl MissingFieldsError {
    pub fn contains(&self, key: &str) -> bool {
        self.missing.iter().any(|k| *k == key)
    }
}

/// Every error the crate returns.
#[derive(Debug, thiserror::Error)]
pub enum EtransactionsError {
    #[error(transparent)]
    Value(#[from] ValueError),

    #[error(transparent)]
    MissingFields(#[from] MissingFieldsError),

    /// Signing or rendering was requested on a container missing fields.
    #[error("transaction is incomplete, unset: {}", .0.join(", "))]
    Incomplete(Vec<&'static str>),

    #[error("unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("cryptographic error: {0}")]
    Crypto(String),

    #[error("invalid configuration {key}: {reason}")]
    Config {
        /// Environment variable or config key
        key: String,
        reason: String,
    },
}

impl EtransactionsError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Value(_) => ErrorCode::InvalidValue,
            Self::MissingFields(_) => ErrorCode::MissingFields,
            Self::Incomplete(_) => ErrorCode::Incomplete,
            Self::UnsupportedAlgorithm(_) => ErrorCode::UnsupportedAlgorithm,
            Self::Crypto(_) => ErrorCode::Crypto,
            Self::Config { .. } => ErrorCode::Config,
        }
    }

    /// The rejected field, when this is a value error.
    pub fn as_value_error(&self) -> Option<&ValueError> {
        match self {
            Self::Value(err) => Some(err),
            _ => None,
        }
    }

    /// Missing keys, when this is a missing-fields error.
    pub fn missing_keys(&self) -> Option<&[&'static str]> {
        match self {
            Self::MissingFields(err) => Some(&err.missing),
            _ => None,
        }
    }

    pub fn config(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Config {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_display_lists_all_keys() {
        let err = MissingFieldsError {
            missing: vec!["total", "secret"],
        };
        assert_eq!(err.to_string(), "missing required keys: total, secret");
        assert!(err.contains("total"));
        assert!(!err.contains("rang"));
    }

    #[test]
    fn test_error_codes() {
        let err: EtransactionsError =
            ValueError::new("rang", ValueErrorKind::OutOfRange, "1000").into();
        assert_eq!(err.code(), ErrorCode::InvalidValue);
        assert_eq!(err.as_value_error().map(|e| e.field), Some("rang"));

        let err: EtransactionsError = MissingFieldsError {
            missing: vec!["id"],
        }
        .into();
        assert_eq!(err.code(), ErrorCode::MissingFields);
        assert_eq!(err.missing_keys(), Some(&["id"][..]));

        let err = EtransactionsError::UnsupportedAlgorithm("MD5".into());
        assert_eq!(err.code(), ErrorCode::UnsupportedAlgorithm);
    }

    #[test]
    fn test_value_error_display() {
        let err = ValueError::new("total", ValueErrorKind::Negative, "-1");
        assert_eq!(err.to_string(), "invalid total: negative (-1)");
    }
}
