use crate::error::{AnswerValidationError, FitQuizError};
use crate::loader::SourceFormat;
use crate::types::answers::{Answer, AnswerMap, RawAnswers};
use crate::types::quiz::{Question, QuestionBody, QuizConfig};
use serde_json::Value;
use std::path::Path;

/// Reads a submission file (JSON or TOML map) into transport-level strings.
/// Numbers and booleans are stringified; nulls count as not submitted.
pub fn load_raw_answers(path: &Path) -> crate::error::Result<RawAnswers> {
    let content = std::fs::read_to_string(path)?;
    let invalid = |reason: String| FitQuizError::InvalidAnswersFile {
        path: path.display().to_string(),
        reason,
    };
    let document: Value = match SourceFormat::from_path(path) {
        SourceFormat::Json => serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?,
        SourceFormat::Toml => toml::from_str(&content).map_err(|e| invalid(e.to_string()))?,
    };
    let Value::Object(entries) = document else {
        return Err(invalid("expected a map of question id to answer".to_string()));
    };

    Ok(entries
        .into_iter()
        .filter_map(|(id, value)| match value {
            Value::Null => None,
            Value::String(text) => Some((id, text)),
            other => Some((id, other.to_string())),
        })
        .collect())
}

/// Validates a raw submission against every configured question, in order,
/// stopping at the first violation.
pub fn validate_answers(
    config: &QuizConfig,
    raw: &RawAnswers,
) -> Result<AnswerMap, AnswerValidationError> {
    let mut answers = AnswerMap::new();
    for question in &config.questions {
        let value = raw.get(&question.id).map(String::as_str);
        match validate_answer(question, value) {
            Ok(answer) => {
                answers.insert(question.id.clone(), answer);
            }
            Err(err) => {
                tracing::warn!(question = %question.id, "answer rejected: {err}");
                return Err(err);
            }
        }
    }
    Ok(answers)
}

/// Checks one submitted value against its question's domain.
pub fn validate_answer(
    question: &Question,
    value: Option<&str>,
) -> Result<Answer, AnswerValidationError> {
    let value = match value {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AnswerValidationError::Missing(question.id.clone())),
    };

    match &question.body {
        QuestionBody::SingleChoice { options } | QuestionBody::ForcedChoice { options } => {
            if !options.iter().any(|option| option.key == value) {
                return Err(AnswerValidationError::InvalidOption(question.id.clone()));
            }
            Ok(Answer::Choice(value.to_string()))
        }
        QuestionBody::Likert(likert) => {
            let point = value
                .trim()
                .parse::<i64>()
                .map_err(|_| AnswerValidationError::InvalidResponse(question.id.clone()))?;
            if !likert.scale.contains(&point) {
                return Err(AnswerValidationError::OutOfScale(question.id.clone()));
            }
            Ok(Answer::Point(point))
        }
    }
}
