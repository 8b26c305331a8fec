//! Hash algorithm selection (`PBX_HASH`).

use super::WireValue;
use crate::errors::{ValueError, ValueErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

const FIELD: &str = "hash";

/// Digest used for the request HMAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HashAlgorithm {
    Sha224,
    Sha256,
    Sha384,
    #[default]
    Sha512,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 4] = [Self::Sha224, Self::Sha256, Self::Sha384, Self::Sha512];

    /// Tag used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha224 => "SHA224",
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
        }
    }

    /// Digest length in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            Self::Sha224 => 28,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Case-insensitive lookup of a wire tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|algo| algo.as_str().eq_ignore_ascii_case(tag))
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ValueError::new(FIELD, ValueErrorKind::Empty, "empty string"));
        }
        Self::from_tag(s).ok_or_else(|| ValueError::new(FIELD, ValueErrorKind::UnknownCode, s.trim()))
    }
}

/// Validated hash field, SHA512 unless told otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HashValue(HashAlgorithm);

impl HashValue {
    pub const WIRE_KEY: &'static str = "PBX_HASH";

    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self(algorithm)
    }

    pub fn from_raw(raw: &Value) -> Result<Self, ValueError> {
        match raw {
            Value::String(s) => s.parse().map(Self),
            other => Err(ValueError::new(
                FIELD,
                ValueErrorKind::WrongType,
                format!("expected an algorithm name, got {}", super::json_type(other)),
            )),
        }
    }

    pub fn value(&self) -> HashAlgorithm {
        self.0
    }
}

impl From<HashAlgorithm> for HashValue {
    fn from(algorithm: HashAlgorithm) -> Self {
        Self(algorithm)
    }
}

impl WireValue for HashValue {
    fn wire_key(&self) -> &'static str {
        Self::WIRE_KEY
    }

    fn wire_value(&self) -> String {
        self.0.as_str().to_string()
    }
}
