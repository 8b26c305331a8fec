//! Feedback template (`PBX_RETOUR`).
//!
//! The template lists the variables the gateway appends to the return URLs,
//! as `name:code` pairs separated by `;` (e.g. `Mt:M;Ref:R;Erreur:E`).

use super::{raw_string, WireValue};
use crate::errors::ValueError;
use serde_json::Value;

const FIELD: &str = "feedback";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FeedbackValue(String);

impl FeedbackValue {
    pub const WIRE_KEY: &'static str = "PBX_RETOUR";

    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn from_raw(raw: &Value) -> Result<Self, ValueError> {
        raw_string(FIELD, raw).map(Self)
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parsed `(name, code)` pairs. Segments without a `:` are skipped.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        self.0
            .split(';')
            .filter_map(|segment| {
                let (name, code) = segment.split_once(':')?;
                let (name, code) = (name.trim(), code.trim());
                if name.is_empty() || code.is_empty() {
                    None
                } else {
                    Some((name, code))
                }
            })
            .collect()
    }
}

impl WireValue for FeedbackValue {
    fn wire_key(&self) -> &'static str {
        Self::WIRE_KEY
    }

    fn wire_value(&self) -> String {
        self.0.clone()
    }
}
