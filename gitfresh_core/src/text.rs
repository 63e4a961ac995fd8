//! Lenient string deserialization for configuration values
//!
//! The environment provider types `GITFRESH_FRESHDESK__API_KEY=123456` as an
//! integer. Keys, tokens and subdomains accept such scalars as their text.

use serde::Deserializer;
use serde::de::{self, Visitor};
use std::fmt;

struct TextVisitor;

impl<'de> Visitor<'de> for TextVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(v.to_string())
    }
}

struct OptionalTextVisitor;

impl<'de> Visitor<'de> for OptionalTextVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an optional string")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        text(deserializer).map(Some)
    }
}

pub(crate) fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    deserializer.deserialize_any(TextVisitor)
}

pub(crate) fn optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    deserializer.deserialize_option(OptionalTextVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Settings {
        #[serde(deserialize_with = "text")]
        key: String,
        #[serde(default, deserialize_with = "optional_text")]
        tenant: Option<String>,
    }

    #[test]
    fn test_scalars_become_text() {
        let settings: Settings =
            serde_json::from_str(r#"{"key": 123456, "tenant": 42}"#).unwrap();
        assert_eq!(settings.key, "123456");
        assert_eq!(settings.tenant.as_deref(), Some("42"));

        let settings: Settings = serde_json::from_str(r#"{"key": true}"#).unwrap();
        assert_eq!(settings.key, "true");
        assert_eq!(settings.tenant, None);
    }

    #[test]
    fn test_null_tenant_is_absent() {
        let settings: Settings =
            serde_json::from_str(r#"{"key": "abc", "tenant": null}"#).unwrap();
        assert_eq!(settings.key, "abc");
        assert_eq!(settings.tenant, None);
    }

    #[test]
    fn test_structures_are_rejected() {
        assert!(serde_json::from_str::<Settings>(r#"{"key": [1, 2]}"#).is_err());
    }
}
