use super::fields::{
    as_array, coerce_i64, field, list_field, string_field, string_map, string_value,
    validate_weights, weight_map, Object,
};
use crate::error::ConfigError;
use crate::types::quiz::{ChoiceOption, LikertScale, Question, QuestionBody, QuestionType};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};

/// Builds one question whose id has already been checked for presence and uniqueness.
pub fn build_question(
    id: &str,
    payload: &Object,
    trait_codes: &BTreeSet<String>,
) -> Result<Question, ConfigError> {
    let raw_type = field(payload, "type").map(type_name).unwrap_or_default();
    let question_type = QuestionType::parse(&raw_type)
        .ok_or_else(|| ConfigError::new(format!("Unsupported question type '{raw_type}'")))?;

    let context = format!("question {id}");
    let body = match question_type {
        QuestionType::SingleChoice => QuestionBody::SingleChoice {
            options: build_options(id, payload, trait_codes)?,
        },
        QuestionType::ForcedChoice => QuestionBody::ForcedChoice {
            options: build_options(id, payload, trait_codes)?,
        },
        QuestionType::Likert => QuestionBody::Likert(build_likert(id, payload, trait_codes)?),
    };

    Ok(Question {
        id: id.to_string(),
        text: string_field(payload, "text", "", &context)?,
        tags: build_tags(payload, &context)?,
        body,
    })
}

fn type_name(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn build_tags(payload: &Object, context: &str) -> Result<Option<Vec<String>>, ConfigError> {
    let Some(value) = field(payload, "tags") else {
        return Ok(None);
    };
    as_array(value, &format!("{context} 'tags'"))?
        .iter()
        .map(|tag| string_value(tag, &format!("{context} tag")))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn build_options(
    id: &str,
    payload: &Object,
    trait_codes: &BTreeSet<String>,
) -> Result<Vec<ChoiceOption>, ConfigError> {
    let context = format!("question {id}");
    let mut seen_keys = HashSet::new();
    let mut options = Vec::new();

    for raw in list_field(payload, "options", &context)? {
        let option = raw
            .as_object()
            .ok_or_else(|| ConfigError::new(format!("Option in question {id} must be an object")))?;
        let key = field(option, "key")
            .ok_or_else(|| ConfigError::new(format!("Option missing 'key' in question {id}")))
            .and_then(|value| string_value(value, &format!("option key in question {id}")))?;
        if !seen_keys.insert(key.clone()) {
            return Err(ConfigError::new(format!(
                "Duplicate option key '{key}' in question {id}"
            )));
        }

        let option_context = format!("question {id} option {key}");
        let weights = weight_map(field(option, "weights"), &option_context)?;
        validate_weights(trait_codes, &weights, &option_context)?;

        options.push(ChoiceOption {
            label: string_field(option, "label", "", &option_context)?,
            key,
            weights,
        });
    }

    Ok(options)
}

fn build_likert(
    id: &str,
    payload: &Object,
    trait_codes: &BTreeSet<String>,
) -> Result<LikertScale, ConfigError> {
    let context = format!("question {id}");
    let scale_payload = list_field(payload, "scale", &context)?;
    if scale_payload.is_empty() {
        return Err(ConfigError::new(format!(
            "Likert question {id} requires a scale"
        )));
    }

    let weights_context = format!("question {id} weights_per_point");
    let weights_per_point = weight_map(field(payload, "weights_per_point"), &weights_context)?;
    validate_weights(trait_codes, &weights_per_point, &weights_context)?;

    let scale = scale_payload
        .iter()
        .map(|point| coerce_i64(point, &format!("question {id} scale point")))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LikertScale {
        scale,
        labels: string_map(field(payload, "labels"), &format!("question {id} labels"))?,
        weights_per_point,
    })
}
