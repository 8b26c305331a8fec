//! Currency (`PBX_DEVISE`).
//!
//! The gateway expects the ISO 4217 numeric code. Only the currencies the
//! gateway settles are accepted.

use super::WireValue;
use crate::errors::{ValueError, ValueErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

const FIELD: &str = "devise";

/// ISO 4217 currency accepted by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Devise {
    Aud,
    Cad,
    Chf,
    Dkk,
    #[default]
    Eur,
    Gbp,
    Jpy,
    Nok,
    Nzd,
    Sek,
    Usd,
    Xof,
    Xpf,
}

impl Devise {
    pub const ALL: [Devise; 13] = [
        Self::Aud,
        Self::Cad,
        Self::Chf,
        Self::Dkk,
        Self::Eur,
        Self::Gbp,
        Self::Jpy,
        Self::Nok,
        Self::Nzd,
        Self::Sek,
        Self::Usd,
        Self::Xof,
        Self::Xpf,
    ];

    /// ISO 4217 numeric code.
    pub fn numeric_code(&self) -> u16 {
        match self {
            Self::Aud => 36,
            Self::Cad => 124,
            Self::Chf => 756,
            Self::Dkk => 208,
            Self::Eur => 978,
            Self::Gbp => 826,
            Self::Jpy => 392,
            Self::Nok => 578,
            Self::Nzd => 554,
            Self::Sek => 752,
            Self::Usd => 840,
            Self::Xof => 952,
            Self::Xpf => 953,
        }
    }

    /// ISO 4217 alphabetic code.
    pub fn alpha_code(&self) -> &'static str {
        match self {
            Self::Aud => "AUD",
            Self::Cad => "CAD",
            Self::Chf => "CHF",
            Self::Dkk => "DKK",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
            Self::Nok => "NOK",
            Self::Nzd => "NZD",
            Self::Sek => "SEK",
            Self::Usd => "USD",
            Self::Xof => "XOF",
            Self::Xpf => "XPF",
        }
    }

    pub fn from_numeric(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.numeric_code() == code)
    }

    pub fn from_alpha(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.alpha_code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Devise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alpha_code())
    }
}

impl FromStr for Devise {
    type Err = ValueError;

    /// Accepts `"EUR"` as well as `"978"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.is_empty() {
            return Err(ValueError::new(FIELD, ValueErrorKind::Empty, "empty string"));
        }
        let found = match code.parse::<u16>() {
            Ok(numeric) => Self::from_numeric(numeric),
            Err(_) => Self::from_alpha(code),
        };
        found.ok_or_else(|| ValueError::new(FIELD, ValueErrorKind::UnknownCode, code))
    }
}

/// Validated currency field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DeviseValue(Devise);

impl DeviseValue {
    pub const WIRE_KEY: &'static str = "PBX_DEVISE";

    pub fn new(devise: Devise) -> Self {
        Self(devise)
    }

    pub fn from_raw(raw: &Value) -> Result<Self, ValueError> {
        match raw {
            Value::String(s) => s.parse().map(Self),
            Value::Number(n) => n
                .as_u64()
                .and_then(|code| u16::try_from(code).ok())
                .and_then(Devise::from_numeric)
                .map(Self)
                .ok_or_else(|| ValueError::new(FIELD, ValueErrorKind::UnknownCode, n.to_string())),
            other => Err(ValueError::new(
                FIELD,
                ValueErrorKind::WrongType,
                format!("expected a currency code, got {}", super::json_type(other)),
            )),
        }
    }

    pub fn value(&self) -> Devise {
        self.0
    }
}

impl From<Devise> for DeviseValue {
    fn from(devise: Devise) -> Self {
        Self(devise)
    }
}

impl WireValue for DeviseValue {
    fn wire_key(&self) -> &'static str {
        Self::WIRE_KEY
    }

    fn wire_value(&self) -> String {
        format!("{:03}", self.0.numeric_code())
    }
}
