//! Opaque text fields: command reference and cardholder.

use super::{raw_string, WireValue};
use crate::errors::{ValueError, ValueErrorKind};
use serde_json::Value;
use std::fmt;

fn non_empty(field: &'static str, value: String) -> Result<String, ValueError> {
    if value.trim().is_empty() {
        return Err(ValueError::new(field, ValueErrorKind::Empty, "empty string"));
    }
    Ok(value)
}

/// Merchant's order reference (`PBX_CMD`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandValue(String);

impl CommandValue {
    pub const WIRE_KEY: &'static str = "PBX_CMD";
    const FIELD: &'static str = "command";

    pub fn new(command: impl Into<String>) -> Result<Self, ValueError> {
        non_empty(Self::FIELD, command.into()).map(Self)
    }

    pub fn from_raw(raw: &Value) -> Result<Self, ValueError> {
        raw_string(Self::FIELD, raw).and_then(Self::new)
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl WireValue for CommandValue {
    fn wire_key(&self) -> &'static str {
        Self::WIRE_KEY
    }

    fn wire_value(&self) -> String {
        self.0.clone()
    }
}

impl fmt::Display for CommandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cardholder identifier, usually an email address (`PBX_PORTEUR`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HolderValue(String);

impl HolderValue {
    pub const WIRE_KEY: &'static str = "PBX_PORTEUR";
    const FIELD: &'static str = "holder";

    pub fn new(holder: impl Into<String>) -> Result<Self, ValueError> {
        non_empty(Self::FIELD, holder.into()).map(Self)
    }

    pub fn from_raw(raw: &Value) -> Result<Self, ValueError> {
        raw_string(Self::FIELD, raw).and_then(Self::new)
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl WireValue for HolderValue {
    fn wire_key(&self) -> &'static str {
        Self::WIRE_KEY
    }

    fn wire_value(&self) -> String {
        self.0.clone()
    }
}

impl fmt::Display for HolderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
