//! Shared HMAC key.
//!
//! The back office issues the key as a hexadecimal string. It is decoded
//! once at construction, never rendered into the request, and wiped from
//! memory when dropped. An odd trailing nibble is padded with `0`, so
//! `"abc"` decodes to `[0xab, 0xc0]`.

use super::raw_string;
use crate::errors::{ValueError, ValueErrorKind};
use serde_json::Value;
use std::fmt;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

const FIELD: &str = "secret";

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretValue {
    hex: String,
    key: Vec<u8>,
}

impl SecretValue {
    pub fn new(hex_key: impl Into<String>) -> Result<Self, ValueError> {
        let mut hex_key = hex_key.into();
        let trimmed = hex_key.trim();
        if trimmed.is_empty() {
            hex_key.zeroize();
            return Err(ValueError::new(FIELD, ValueErrorKind::Empty, "empty key"));
        }
        let mut padded = trimmed.to_string();
        if padded.len() % 2 == 1 {
            padded.push('0');
        }
        let decoded = hex::decode(&padded);
        padded.zeroize();
        let key = match decoded {
            Ok(key) => key,
            Err(e) => {
                hex_key.zeroize();
                // The decode error names a character position, not the key.
                return Err(ValueError::new(FIELD, ValueErrorKind::NotHex, e.to_string()));
            }
        };
        let hex = trimmed.to_string();
        hex_key.zeroize();
        Ok(Self { hex, key })
    }

    pub fn from_raw(raw: &Value) -> Result<Self, ValueError> {
        raw_string(FIELD, raw).and_then(Self::new)
    }

    /// The key as configured, in hexadecimal.
    pub fn value(&self) -> &str {
        &self.hex
    }

    /// Decoded key bytes used as HMAC key material.
    pub fn key_bytes(&self) -> &[u8] {
        &self.key
    }
}

impl PartialEq for SecretValue {
    fn eq(&self, other: &Self) -> bool {
        self.key.ct_eq(&other.key).into()
    }
}

impl Eq for SecretValue {}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretValue")
            .field("key", &"<redacted>")
            .field("len", &self.key.len())
            .finish()
    }
}
