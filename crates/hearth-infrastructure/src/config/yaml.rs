//! YAML documents to configuration values

use hearth_domain::error::{Error, Result};
use hearth_domain::value_objects::{ConfigMap, ConfigValue};
use serde::Deserialize;
use serde_yaml::Value;

use crate::error_ext::ErrorContext;

/// Parse a (possibly multi-document) YAML stream into one mapping
///
/// Top-level keys of later documents replace those of earlier ones. Empty
/// documents are skipped.
///
/// # Errors
///
/// Returns a configuration error for invalid YAML, a document that is not a
/// mapping, or a mapping key that is not a scalar.
pub fn parse_documents(text: &str, origin: &str) -> Result<ConfigMap> {
    let mut merged = ConfigMap::new();

    for document in serde_yaml::Deserializer::from_str(text) {
        let value = Value::deserialize(document).config_context(format!("Invalid YAML in {origin}"))?;
        match value {
            Value::Null => {}
            Value::Mapping(mapping) => {
                for (key, value) in mapping {
                    merged.insert(scalar_key(&key, origin)?, convert(value, origin)?);
                }
            }
            other => {
                return Err(Error::configuration(format!(
                    "Top-level YAML document in {origin} must be a mapping, found {}",
                    describe(&other)
                )));
            }
        }
    }

    Ok(merged)
}

fn scalar_key(key: &Value, origin: &str) -> Result<String> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Tagged(tagged) => scalar_key(&tagged.value, origin),
        other => Err(Error::configuration(format!(
            "Mapping keys in {origin} must be scalars, found {}",
            describe(other)
        ))),
    }
}

fn convert(value: Value, origin: &str) -> Result<ConfigValue> {
    Ok(match value {
        Value::Null => ConfigValue::Null,
        Value::Bool(b) => ConfigValue::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => ConfigValue::Integer(i),
            None => match n.as_f64() {
                Some(f) => ConfigValue::Float(f),
                None => ConfigValue::String(n.to_string()),
            },
        },
        Value::String(s) => ConfigValue::String(s),
        Value::Sequence(items) => ConfigValue::List(
            items
                .into_iter()
                .map(|item| convert(item, origin))
                .collect::<Result<Vec<_>>>()?,
        ),
        Value::Mapping(mapping) => {
            let mut map = ConfigMap::new();
            for (key, value) in mapping {
                map.insert(scalar_key(&key, origin)?, convert(value, origin)?);
            }
            ConfigValue::Map(map)
        }
        Value::Tagged(tagged) => convert(tagged.value, origin)?,
    })
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
