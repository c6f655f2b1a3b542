use crate::error::ConfigError;
use crate::types::quiz::TraitWeights;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

pub type Object = Map<String, Value>;

/// Present and non-null value for `key`.
pub fn field<'a>(obj: &'a Object, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|value| !value.is_null())
}

pub fn require_keys(obj: &Object, keys: &[&str]) -> Result<(), ConfigError> {
    let mut missing = keys
        .iter()
        .filter(|key| !obj.contains_key(**key))
        .copied()
        .collect::<Vec<_>>();
    if missing.is_empty() {
        return Ok(());
    }
    missing.sort_unstable();
    Err(ConfigError::new(format!(
        "Missing required keys: {}",
        missing.join(", ")
    )))
}

pub fn as_object<'a>(value: &'a Value, context: &str) -> Result<&'a Object, ConfigError> {
    value
        .as_object()
        .ok_or_else(|| ConfigError::new(format!("{context} must be an object")))
}

pub fn as_array<'a>(value: &'a Value, context: &str) -> Result<&'a [Value], ConfigError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ConfigError::new(format!("{context} must be a list")))
}

/// Optional list field; absent or null reads as empty.
pub fn list_field<'a>(obj: &'a Object, key: &str, context: &str) -> Result<&'a [Value], ConfigError> {
    match field(obj, key) {
        Some(value) => as_array(value, &format!("{context} '{key}'")),
        None => Ok(Default::default()),
    }
}

pub fn object_field<'a>(
    obj: &'a Object,
    key: &str,
    context: &str,
) -> Result<Option<&'a Object>, ConfigError> {
    field(obj, key)
        .map(|value| as_object(value, &format!("{context} '{key}'")))
        .transpose()
}

pub fn string_value(value: &Value, context: &str) -> Result<String, ConfigError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::new(format!("{context} must be a string")))
}

pub fn string_field(obj: &Object, key: &str, default: &str, context: &str) -> Result<String, ConfigError> {
    match field(obj, key) {
        Some(value) => string_value(value, &format!("{context} '{key}'")),
        None => Ok(default.to_string()),
    }
}

/// Free-form text: strings are kept as-is, other scalars use their literal form.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

pub fn coerce_f64(value: &Value, context: &str) -> Result<f64, ConfigError> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ConfigError::new(format!("Invalid number {value} for {context}")))
}

/// Integer coercion; fractional numbers truncate toward zero.
pub fn coerce_i64(value: &Value, context: &str) -> Result<i64, ConfigError> {
    let parsed = match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.is_finite())
                .map(|float| float.trunc() as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ConfigError::new(format!("Invalid integer {value} for {context}")))
}

pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|float| float != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}

pub fn weight_map(value: Option<&Value>, context: &str) -> Result<TraitWeights, ConfigError> {
    let Some(value) = value else {
        return Ok(TraitWeights::new());
    };
    as_object(value, context)?
        .iter()
        .map(|(code, raw)| {
            coerce_f64(raw, &format!("{context} '{code}'")).map(|weight| (code.clone(), weight))
        })
        .collect()
}

pub fn string_map(value: Option<&Value>, context: &str) -> Result<BTreeMap<String, String>, ConfigError> {
    let Some(value) = value else {
        return Ok(BTreeMap::new());
    };
    Ok(as_object(value, context)?
        .iter()
        .map(|(key, raw)| (key.clone(), display_string(raw)))
        .collect())
}

pub fn validate_weights(
    trait_codes: &BTreeSet<String>,
    weights: &TraitWeights,
    context: &str,
) -> Result<(), ConfigError> {
    let unknown = weights
        .keys()
        .filter(|code| !trait_codes.contains(*code))
        .cloned()
        .collect::<Vec<_>>();
    if unknown.is_empty() {
        return Ok(());
    }
    Err(ConfigError::new(format!(
        "Unknown trait codes {} in {context}",
        unknown.join(", ")
    )))
}
