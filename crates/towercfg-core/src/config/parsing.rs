//! Parsing strategies for config file contents.
//!
//! Two formats are accepted:
//! - **Structured**: a YAML document (JSON included) whose top level is a mapping.
//! - **Legacy INI**: `key = value` lines under a `[general]` section. The
//!   header may be missing, in which case one is synthesized.
//!
//! The structured strategy is tried first. Any text that is not a YAML
//! mapping (an INI file usually parses as a bare string or fails outright) is
//! handed to the INI strategy. Both return a plain [`Mapping`] so the value
//! extraction in [`layer_from_mapping`] is shared.
//!
//! Repeated top-level YAML keys resolve last-wins. In the INI format a
//! repeated section or a repeated key within a section is malformed.

use crate::config::types::{ConfigLayer, RecognizedField};
use ini::{Ini, ParseOption};
use secrecy::SecretString;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;
use std::fmt;

const GENERAL_SECTION: &str = "general";
const GENERAL_HEADER: &str = "[general]";

/// Which strategy produced the settings mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    Structured,
    LegacyIni,
}

/// Failure to turn a parsed value into a setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Parse file contents with the structured strategy, then the INI strategy.
///
/// Returns the error of the INI strategy when both fail.
pub fn parse_settings(text: &str) -> Result<(Mapping, ParseStrategy), String> {
    if let Some(mapping) = parse_structured(text) {
        return Ok((mapping, ParseStrategy::Structured));
    }
    parse_legacy_ini(text).map(|mapping| (mapping, ParseStrategy::LegacyIni))
}

/// YAML/JSON strategy. Only a top-level mapping counts as success.
pub fn parse_structured(text: &str) -> Option<Mapping> {
    serde_yaml::from_str::<TopLevelMapping>(text)
        .ok()
        .map(|top| top.0)
}

/// Top-level YAML mapping where a repeated key overwrites the earlier one.
///
/// `Mapping`'s own `Deserialize` rejects repeated keys.
struct TopLevelMapping(Mapping);

impl<'de> Deserialize<'de> for TopLevelMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TopLevelMappingVisitor)
    }
}

struct TopLevelMappingVisitor;

impl<'de> Visitor<'de> for TopLevelMappingVisitor {
    type Value = TopLevelMapping;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of settings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut mapping = Mapping::new();
        while let Some(key) = access.next_key::<Value>()? {
            let value = access.next_value::<Value>()?;
            mapping.insert(key, value);
        }
        Ok(TopLevelMapping(mapping))
    }
}

/// Legacy INI strategy.
///
/// Only the recognized keys of the `general` section are extracted. Values
/// are taken literally: no quote stripping and no backslash escapes, so
/// passwords survive untouched.
pub fn parse_legacy_ini(text: &str) -> Result<Mapping, String> {
    let source = if text.contains(GENERAL_HEADER) {
        text.to_string()
    } else {
        format!("{}\n{}", GENERAL_HEADER, text)
    };

    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(&source, options).map_err(|e| e.to_string())?;

    if ini
        .section(None::<String>)
        .is_some_and(|props| props.iter().next().is_some())
    {
        return Err("file contains settings before the first section header".to_string());
    }

    reject_repeats(&ini)?;

    let mut mapping = Mapping::new();
    if let Some(general) = ini.section(Some(GENERAL_SECTION)) {
        for field in RecognizedField::ALL {
            if let Some(value) = general.get(field.key()) {
                mapping.insert(
                    Value::String(field.key().to_string()),
                    Value::String(value.to_string()),
                );
            }
        }
    }
    Ok(mapping)
}

/// Fail on a section declared twice or a key set twice in one section.
fn reject_repeats(ini: &Ini) -> Result<(), String> {
    let mut sections = HashSet::new();
    for (name, props) in ini.iter() {
        if let Some(name) = name
            && !sections.insert(name.to_ascii_lowercase())
        {
            return Err(format!("section '{}' already exists", name));
        }

        let mut keys = HashSet::new();
        for (key, _) in props.iter() {
            if !keys.insert(key.to_ascii_lowercase()) {
                return Err(format!(
                    "option '{}' in section '{}' already exists",
                    key,
                    name.unwrap_or("")
                ));
            }
        }
    }
    Ok(())
}

/// Extract the recognized fields of a parsed mapping into a layer.
///
/// Unrecognized keys are ignored. The first invalid value aborts the whole
/// layer.
pub fn layer_from_mapping(mapping: &Mapping) -> Result<ConfigLayer, FieldError> {
    let mut layer = ConfigLayer::default();

    for field in RecognizedField::ALL {
        let Some(value) = mapping.get(field.key()) else {
            continue;
        };

        match field {
            RecognizedField::VerifySsl => layer.verify_ssl = Some(verify_ssl_value(value)?),
            RecognizedField::Host => layer.host = text_value(field, value)?,
            RecognizedField::Username => layer.username = text_value(field, value)?,
            RecognizedField::Password => {
                layer.password = text_value(field, value)?.map(SecretString::from)
            }
            RecognizedField::OauthToken => {
                layer.oauth_token = text_value(field, value)?.map(SecretString::from)
            }
        }
    }

    Ok(layer)
}

/// Lenient textual boolean: `y yes t true on 1` / `n no f false off 0`.
///
/// Case-insensitive and whitespace-tolerant. Anything else is `None`.
pub fn parse_bool_token(token: &str) -> Option<bool> {
    match token.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => Some(true),
        "n" | "no" | "f" | "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn verify_ssl_value(value: &Value) -> Result<bool, FieldError> {
    match value {
        Value::String(s) => parse_bool_token(s).ok_or_else(|| FieldError {
            field: RecognizedField::VerifySsl.key(),
            message: format!("'{}' is not a recognized boolean", s),
        }),
        other => Ok(truthiness(other)),
    }
}

fn truthiness(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => truthiness(&tagged.value),
    }
}

fn text_value(field: RecognizedField, value: &Value) -> Result<Option<String>, FieldError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Tagged(tagged) => text_value(field, &tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => Err(FieldError {
            field: field.key(),
            message: "expected a scalar value".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_structured_yaml_mapping() {
        let (mapping, strategy) =
            parse_settings("host: tower.example.com\nusername: admin\n").unwrap();
        assert_eq!(strategy, ParseStrategy::Structured);

        let layer = layer_from_mapping(&mapping).unwrap();
        assert_eq!(layer.host.as_deref(), Some("tower.example.com"));
        assert_eq!(layer.username.as_deref(), Some("admin"));
        assert!(layer.password.is_none());
    }

    #[test]
    fn test_structured_json_mapping() {
        let text = r#"{"host": "https://awx.local", "verify_ssl": false, "oauth_token": "abc"}"#;
        let (mapping, strategy) = parse_settings(text).unwrap();
        assert_eq!(strategy, ParseStrategy::Structured);

        let layer = layer_from_mapping(&mapping).unwrap();
        assert_eq!(layer.host.as_deref(), Some("https://awx.local"));
        assert_eq!(layer.verify_ssl, Some(false));
        assert_eq!(
            layer.oauth_token.as_ref().map(|t| t.expose_secret()),
            Some("abc")
        );
    }

    #[test]
    fn test_bare_ini_falls_back_to_legacy() {
        let (mapping, strategy) =
            parse_settings("host = tower.example.com\nusername = admin\n").unwrap();
        assert_eq!(strategy, ParseStrategy::LegacyIni);

        let layer = layer_from_mapping(&mapping).unwrap();
        assert_eq!(layer.host.as_deref(), Some("tower.example.com"));
        assert_eq!(layer.username.as_deref(), Some("admin"));
    }

    #[test]
    fn test_ini_with_and_without_header_match() {
        let body = "host = tower.example.com\npassword = s3cret\nverify_ssl = False\n";
        let with_header = format!("[general]\n{}", body);

        let (bare, _) = parse_settings(body).unwrap();
        let (headed, strategy) = parse_settings(&with_header).unwrap();
        assert_eq!(strategy, ParseStrategy::LegacyIni);
        assert_eq!(bare, headed);

        let layer = layer_from_mapping(&headed).unwrap();
        assert_eq!(layer.verify_ssl, Some(false));
        assert_eq!(
            layer.password.as_ref().map(|p| p.expose_secret()),
            Some("s3cret")
        );
    }

    #[test]
    fn test_ini_keeps_backslashes_and_quotes() {
        let mapping = parse_legacy_ini("password = pa\\ss\"word\n").unwrap();
        let layer = layer_from_mapping(&mapping).unwrap();
        assert_eq!(
            layer.password.as_ref().map(|p| p.expose_secret()),
            Some("pa\\ss\"word")
        );
    }

    #[test]
    fn test_ini_ignores_other_sections_and_keys() {
        let text = "[general]\nhost = a.example.com\ncolor = blue\n\n[other]\nusername = nobody\n";
        let mapping = parse_legacy_ini(text).unwrap();
        assert_eq!(mapping.len(), 1);

        let layer = layer_from_mapping(&mapping).unwrap();
        assert_eq!(layer.host.as_deref(), Some("a.example.com"));
        assert!(layer.username.is_none());
    }

    #[test]
    fn test_ini_rejects_repeated_general_section() {
        let err = parse_legacy_ini("[general]\nhost = first\n[general]\nusername = bob\n")
            .unwrap_err();
        assert!(err.contains("general"), "unexpected message: {}", err);
    }

    #[test]
    fn test_ini_rejects_repeated_key() {
        let err = parse_legacy_ini("host = first\nhost = second\n").unwrap_err();
        assert!(err.contains("host"), "unexpected message: {}", err);

        // Keys compare case-insensitively.
        assert!(parse_legacy_ini("[general]\nHOST = a\nhost = b\n").is_err());
    }

    #[test]
    fn test_ini_repeated_key_in_other_section_is_rejected() {
        assert!(parse_legacy_ini("[general]\nhost = a\n[extra]\nx = 1\nx = 2\n").is_err());
    }

    #[test]
    fn test_yaml_repeated_key_is_last_wins() {
        let (mapping, strategy) = parse_settings("host: a\nhost: b\n").unwrap();
        assert_eq!(strategy, ParseStrategy::Structured);

        let layer = layer_from_mapping(&mapping).unwrap();
        assert_eq!(layer.host.as_deref(), Some("b"));
    }

    #[test]
    fn test_ini_rejects_keys_before_header() {
        let text = "host = early.example.com\n[general]\nusername = admin\n";
        let result = parse_legacy_ini(text);
        assert!(result.is_err());
    }

    #[test]
    fn test_unterminated_section_is_malformed() {
        let result = parse_settings("[general\nhost = tower.example.com\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_text_yields_empty_layer() {
        let (mapping, strategy) = parse_settings("").unwrap();
        assert_eq!(strategy, ParseStrategy::LegacyIni);
        assert!(layer_from_mapping(&mapping).unwrap().is_empty());
    }

    #[test]
    fn test_parse_bool_token() {
        for token in ["y", "YES", "t", "True", "on", "1", " yes "] {
            assert_eq!(parse_bool_token(token), Some(true), "token {:?}", token);
        }
        for token in ["n", "No", "NO", "f", "FALSE", "off", "0"] {
            assert_eq!(parse_bool_token(token), Some(false), "token {:?}", token);
        }
        assert_eq!(parse_bool_token("maybe"), None);
        assert_eq!(parse_bool_token(""), None);
    }

    #[test]
    fn test_verify_ssl_textual_values() {
        let no = parse_legacy_ini("verify_ssl = no\n").unwrap();
        assert_eq!(layer_from_mapping(&no).unwrap().verify_ssl, Some(false));

        let yes = parse_legacy_ini("verify_ssl = YES\n").unwrap();
        assert_eq!(layer_from_mapping(&yes).unwrap().verify_ssl, Some(true));

        // YAML 1.2 keeps `off` as a string, so the lenient rule still applies.
        let (yaml, _) = parse_settings("verify_ssl: off\n").unwrap();
        assert_eq!(layer_from_mapping(&yaml).unwrap().verify_ssl, Some(false));
    }

    #[test]
    fn test_verify_ssl_invalid_token() {
        let mapping = parse_legacy_ini("verify_ssl = sometimes\n").unwrap();
        let err = layer_from_mapping(&mapping).unwrap_err();
        assert_eq!(err.field, "verify_ssl");
        assert!(err.message.contains("sometimes"));
    }

    #[test]
    fn test_verify_ssl_truthiness_of_non_text() {
        let (zero, _) = parse_settings("verify_ssl: 0\n").unwrap();
        assert_eq!(layer_from_mapping(&zero).unwrap().verify_ssl, Some(false));

        let (two, _) = parse_settings("verify_ssl: 2\n").unwrap();
        assert_eq!(layer_from_mapping(&two).unwrap().verify_ssl, Some(true));

        let (null, _) = parse_settings("verify_ssl: ~\n").unwrap();
        assert_eq!(layer_from_mapping(&null).unwrap().verify_ssl, Some(false));

        let (list, _) = parse_settings("verify_ssl: [1]\n").unwrap();
        assert_eq!(layer_from_mapping(&list).unwrap().verify_ssl, Some(true));
    }

    #[test]
    fn test_text_fields_accept_scalars() {
        let (mapping, _) = parse_settings("host: 10.0.0.5\nusername: 42\npassword: true\n").unwrap();
        let layer = layer_from_mapping(&mapping).unwrap();
        assert_eq!(layer.host.as_deref(), Some("10.0.0.5"));
        assert_eq!(layer.username.as_deref(), Some("42"));
        assert_eq!(
            layer.password.as_ref().map(|p| p.expose_secret()),
            Some("true")
        );
    }

    #[test]
    fn test_text_field_null_is_absent() {
        let (mapping, _) = parse_settings("username: null\nhost: tower\n").unwrap();
        let layer = layer_from_mapping(&mapping).unwrap();
        assert!(layer.username.is_none());
        assert_eq!(layer.host.as_deref(), Some("tower"));
    }

    #[test]
    fn test_text_field_rejects_collections() {
        let (mapping, _) = parse_settings("host:\n  - a\n  - b\n").unwrap();
        let err = layer_from_mapping(&mapping).unwrap_err();
        assert_eq!(err.field, "host");
    }
}
