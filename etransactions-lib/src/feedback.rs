//! Decoding of the variables the gateway appends to the return URLs.
//!
//! The gateway echoes back the variables requested by `PBX_RETOUR`, keyed
//! by the names the template chose: `Mt:M;Ref:R;Erreur:E` yields
//! `?Mt=1000&Ref=abc&Erreur=00000`.

use crate::values::FeedbackValue;
use std::collections::BTreeMap;

/// Gateway variable code carrying the transaction status.
pub const ERROR_CODE: &str = "E";

/// Gateway variable code carrying the response signature.
pub const SIGNATURE_CODE: &str = "K";

/// Status value meaning the payment was accepted.
pub const SUCCESS_STATUS: &str = "00000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackResponse {
    // name -> (code, decoded value)
    values: BTreeMap<String, (String, String)>,
}

impl FeedbackResponse {
    /// Decodes `query` (with or without a leading `?`) against `template`.
    /// Parameters the template does not name are ignored; for repeated names
    /// the last occurrence wins.
    pub fn parse(template: &FeedbackValue, query: &str) -> Self {
        let names: BTreeMap<&str, &str> = template.entries().into_iter().collect();
        let mut values = BTreeMap::new();

        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (name, raw) = pair.split_once('=').unwrap_or((pair, ""));
            let name = decode(name);
            if let Some(code) = names.get(name.as_str()) {
                values.insert(name, (code.to_string(), decode(raw)));
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            expected = names.len(),
            decoded = values.len(),
            "decoded gateway feedback"
        );

        Self { values }
    }

    /// Value of the variable the template named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|(_, value)| value.as_str())
    }

    /// Value of the gateway variable `code`, whatever the template named it.
    pub fn by_code(&self, code: &str) -> Option<&str> {
        self.values
            .values()
            .find(|(c, _)| c == code)
            .map(|(_, value)| value.as_str())
    }

    /// `(name, value)` pairs, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, (_, value))| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn status(&self) -> Option<&str> {
        self.by_code(ERROR_CODE)
    }

    /// True when the status variable was requested and reports success.
    pub fn is_success(&self) -> bool {
        self.status() == Some(SUCCESS_STATUS)
    }

    pub fn signature(&self) -> Option<&str> {
        self.by_code(SIGNATURE_CODE)
    }
}

/// Form decoding: `+` is a space, then percent-escapes. Invalid UTF-8 is
/// replaced rather than rejected.
fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> FeedbackValue {
        FeedbackValue::new("Mt:M;Ref:R;Erreur:E;Sign:K")
    }

    #[test]
    fn test_parse_named_values() {
        let response = FeedbackResponse::parse(&template(), "?Mt=1000&Ref=order%2042&Erreur=00000");
        assert_eq!(response.get("Mt"), Some("1000"));
        assert_eq!(response.get("Ref"), Some("order 42"));
        assert_eq!(response.by_code("R"), Some("order 42"));
        assert!(response.is_success());
        assert_eq!(response.signature(), None);
        assert_eq!(response.len(), 3);
    }

    #[test]
    fn test_unknown_names_are_ignored() {
        let response = FeedbackResponse::parse(&template(), "Mt=5&utm_source=mail&=x&&");
        assert_eq!(response.len(), 1);
        assert!(response.get("utm_source").is_none());
        assert!(!response.is_success());
    }

    #[test]
    fn test_failure_status() {
        let response = FeedbackResponse::parse(&template(), "Erreur=00105&Sign=abc%2Bdef");
        assert_eq!(response.status(), Some("00105"));
        assert!(!response.is_success());
        assert_eq!(response.signature(), Some("abc+def"));
    }

    #[test]
    fn test_plus_is_space_and_empty_template() {
        let response = FeedbackResponse::parse(&template(), "Ref=a+b");
        assert_eq!(response.get("Ref"), Some("a b"));

        let response = FeedbackResponse::parse(&FeedbackValue::default(), "Mt=1");
        assert!(response.is_empty());
    }

    #[test]
    fn test_iter_sorted_by_name() {
        let response = FeedbackResponse::parse(&template(), "Ref=r&Mt=1");
        let pairs: Vec<_> = response.iter().collect();
        assert_eq!(pairs, vec![("Mt", "1"), ("Ref", "r")]);
    }
}
