//! Rendered request fields.

use serde::Serialize;
use std::fmt;

/// One `name=value` pair posted to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FormField {
    pub key: &'static str,
    pub value: String,
}

impl FormField {
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    /// `<input type="hidden" name="KEY" value="VALUE">`
    pub fn to_hidden_input(&self) -> String {
        format!(
            "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
            self.key,
            escape_attribute(&self.value)
        )
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Concatenates hidden inputs in field order.
pub fn render_hidden_inputs(fields: &[FormField]) -> String {
    fields.iter().map(FormField::to_hidden_input).collect()
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_input() {
        let field = FormField::new("PBX_SITE", "1234567");
        assert_eq!(
            field.to_hidden_input(),
            "<input type=\"hidden\" name=\"PBX_SITE\" value=\"1234567\">"
        );
    }

    #[test]
    fn test_value_is_escaped() {
        let field = FormField::new("PBX_CMD", "a&b\"<c>'");
        assert_eq!(
            field.to_hidden_input(),
            "<input type=\"hidden\" name=\"PBX_CMD\" value=\"a&amp;b&quot;&lt;c&gt;&#39;\">"
        );
    }

    #[test]
    fn test_render_concatenates_in_order() {
        let fields = vec![FormField::new("A", "1"), FormField::new("B", "2")];
        assert_eq!(
            render_hidden_inputs(&fields),
            "<input type=\"hidden\" name=\"A\" value=\"1\"><input type=\"hidden\" name=\"B\" value=\"2\">"
        );
    }

    #[test]
    fn test_serialize() {
        let field = FormField::new("PBX_HASH", "SHA512");
        let json = serde_json::to_string(&field).unwrap();
        assert_eq!(json, r#"{"key":"PBX_HASH","value":"SHA512"}"#);
    }
}
