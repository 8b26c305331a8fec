//! Canonical parameter string.
//!
//! The gateway recomputes the signature over the same fields in the same
//! order, so the order here is fixed and independent of setter order.

use crate::transaction::TransactionData;
use crate::values::{
    CommandValue, DeviseValue, FeedbackValue, HashValue, HolderValue, IdValue, RangValue,
    SiteValue, TotalValue, WireValue,
};
use std::fmt;

/// Assembles the signed `KEY=value&...` string of a transaction.
#[derive(Debug, Clone, Copy)]
pub struct ParameterConstructor<'a> {
    transaction: &'a TransactionData,
}

impl<'a> ParameterConstructor<'a> {
    /// Wire keys of the signed fields, in order.
    pub const CANONICAL_ORDER: [&'static str; 9] = [
        SiteValue::WIRE_KEY,
        RangValue::WIRE_KEY,
        IdValue::WIRE_KEY,
        DeviseValue::WIRE_KEY,
        CommandValue::WIRE_KEY,
        FeedbackValue::WIRE_KEY,
        HolderValue::WIRE_KEY,
        TotalValue::WIRE_KEY,
        HashValue::WIRE_KEY,
    ];

    pub fn new(transaction: &'a TransactionData) -> Self {
        Self { transaction }
    }

    /// Set fields in canonical order. Unset fields are skipped.
    pub fn values(&self) -> Vec<&'a dyn WireValue> {
        let t = self.transaction;
        let slots: [Option<&'a dyn WireValue>; 9] = [
            t.site().map(|v| v as &dyn WireValue),
            t.rang().map(|v| v as &dyn WireValue),
            t.id().map(|v| v as &dyn WireValue),
            t.devise().map(|v| v as &dyn WireValue),
            t.command().map(|v| v as &dyn WireValue),
            t.feedback().map(|v| v as &dyn WireValue),
            t.holder().map(|v| v as &dyn WireValue),
            t.total().map(|v| v as &dyn WireValue),
            t.hash().map(|v| v as &dyn WireValue),
        ];
        slots.into_iter().flatten().collect()
    }

    /// `KEY=value` entries in canonical order.
    pub fn as_vec(&self) -> Vec<String> {
        self.values().into_iter().map(|v| v.to_parameter()).collect()
    }

    pub fn serialize(&self) -> String {
        self.as_vec().join("&")
    }
}

impl fmt::Display for ParameterConstructor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}
