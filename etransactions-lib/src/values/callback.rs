//! Return URLs the gateway redirects the customer to.

use super::{json_type, WireValue};
use crate::errors::{ValueError, ValueErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use url::Url;

/// Outcome a callback URL is used for. Decides the wire key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlKind {
    /// Payment accepted (`PBX_EFFECTUE`).
    Done,
    /// Payment refused (`PBX_REFUSE`).
    Denied,
    /// Customer canceled (`PBX_ANNULE`).
    Canceled,
}

impl UrlKind {
    /// Render order after the signed fields.
    pub const ALL: [UrlKind; 3] = [Self::Done, Self::Denied, Self::Canceled];

    pub fn wire_key(&self) -> &'static str {
        match self {
            Self::Done => "PBX_EFFECTUE",
            Self::Denied => "PBX_REFUSE",
            Self::Canceled => "PBX_ANNULE",
        }
    }

    /// Key under `callbacks` in the raw input.
    pub fn input_key(&self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::Denied => "denied",
            Self::Canceled => "canceled",
        }
    }
}

impl fmt::Display for UrlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.input_key())
    }
}

/// Absolute http(s) URL tagged with its callback kind.
///
/// The parsed form only validates; the wire carries the trimmed input as
/// given, so host case and a missing trailing slash are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlValue {
    raw: String,
    url: Url,
    kind: UrlKind,
}

impl UrlValue {
    const FIELD: &'static str = "callbacks";

    pub fn new(url: &str, kind: UrlKind) -> Result<Self, ValueError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(ValueError::new(Self::FIELD, ValueErrorKind::Empty, kind.input_key()));
        }
        let parsed = Url::parse(trimmed).map_err(|e| {
            ValueError::new(
                Self::FIELD,
                ValueErrorKind::MalformedUrl,
                format!("{}: {}", kind, e),
            )
        })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ValueError::new(
                Self::FIELD,
                ValueErrorKind::MalformedUrl,
                format!("{}: expected an absolute http(s) url", kind),
            ));
        }
        Ok(Self {
            raw: trimmed.to_string(),
            url: parsed,
            kind,
        })
    }

    pub fn from_raw(raw: &Value, kind: UrlKind) -> Result<Self, ValueError> {
        match raw {
            Value::String(s) => Self::new(s, kind),
            other => Err(ValueError::new(
                Self::FIELD,
                ValueErrorKind::WrongType,
                format!("{}: expected a url string, got {}", kind, json_type(other)),
            )),
        }
    }

    pub fn value(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn kind(&self) -> UrlKind {
        self.kind
    }
}

impl WireValue for UrlValue {
    fn wire_key(&self) -> &'static str {
        self.kind.wire_key()
    }

    fn wire_value(&self) -> String {
        self.raw.clone()
    }
}
