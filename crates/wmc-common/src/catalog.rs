//! Catalog service settings carried inside a map configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attributes of one catalog service, keyed by attribute name.
pub type ServiceAttributes = BTreeMap<String, AttrValue>;

/// Catalog services configured for a map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogServices {
    #[serde(default)]
    pub selected_service: String,

    #[serde(default)]
    pub services: BTreeMap<String, ServiceAttributes>,
}

/// A typed catalog service attribute value.
///
/// WMC stores every attribute as text next to a `type` marker; this is the
/// decoded form. Variant order matters for untagged deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Num(f64),
    Str(String),
    Json(serde_json::Value),
}

impl AttrValue {
    /// The `type` marker written next to the value.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Bool(_) => "boolean",
            AttrValue::Num(_) => "number",
            AttrValue::Str(_) => "string",
            AttrValue::Json(_) => "object",
        }
    }

    /// Text form of the value, or None for a JSON null.
    pub fn to_text(&self) -> Option<String> {
        match self {
            AttrValue::Bool(b) => Some(b.to_string()),
            AttrValue::Num(n) => Some(n.to_string()),
            AttrValue::Str(s) => Some(s.clone()),
            AttrValue::Json(serde_json::Value::Null) => None,
            AttrValue::Json(v) => Some(v.to_string()),
        }
    }

    /// Decode a value from its `type` marker and text.
    ///
    /// Unknown markers keep the raw text. Object text that is not valid
    /// JSON yields None.
    pub fn parse_typed(type_name: Option<&str>, text: &str) -> Option<Self> {
        match type_name {
            Some("number") => Some(AttrValue::Num(text.trim().parse().unwrap_or(f64::NAN))),
            Some("boolean") => Some(AttrValue::Bool(text.trim().eq_ignore_ascii_case("true"))),
            Some("object") => serde_json::from_str(text).ok().map(AttrValue::Json),
            _ => Some(AttrValue::Str(text.to_string())),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Num(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_typed() {
        assert_eq!(
            AttrValue::parse_typed(Some("number"), "12.5"),
            Some(AttrValue::Num(12.5))
        );
        assert_eq!(
            AttrValue::parse_typed(Some("boolean"), "TRUE"),
            Some(AttrValue::Bool(true))
        );
        assert_eq!(
            AttrValue::parse_typed(Some("object"), r#"{"a":1}"#),
            Some(AttrValue::Json(serde_json::json!({"a": 1})))
        );
        assert_eq!(AttrValue::parse_typed(Some("object"), "{oops"), None);
        assert_eq!(
            AttrValue::parse_typed(None, "csw"),
            Some(AttrValue::Str("csw".to_string()))
        );
    }

    #[test]
    fn test_untagged_json() {
        let attrs: ServiceAttributes = serde_json::from_value(serde_json::json!({
            "autoload": true,
            "url": "http://example.com/csw",
            "limit": 20,
            "filter": {"staticFilter": "x"}
        }))
        .unwrap();
        assert_eq!(attrs["autoload"], AttrValue::Bool(true));
        assert_eq!(attrs["limit"], AttrValue::Num(20.0));
        assert_eq!(attrs["url"].type_name(), "string");
        assert_eq!(attrs["filter"].type_name(), "object");
    }

    #[test]
    fn test_text_forms() {
        assert_eq!(AttrValue::Num(20.0).to_text().as_deref(), Some("20"));
        assert_eq!(AttrValue::Bool(false).to_text().as_deref(), Some("false"));
        assert_eq!(AttrValue::Json(serde_json::Value::Null).to_text(), None);
    }
}
