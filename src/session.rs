use crate::error::{FitQuizError, Result};
use crate::types::answers::{AnswerMap, RawAnswers};
use crate::types::quiz::QuizConfig;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Answers stored between `take` and `score`, tagged with the quiz they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSession {
    pub quiz_id: String,
    pub answers: AnswerMap,
    #[serde(default)]
    pub saved_at: String,
}

impl QuizSession {
    pub fn new(quiz_id: impl Into<String>, answers: AnswerMap) -> Self {
        Self {
            quiz_id: quiz_id.into(),
            answers,
            saved_at: Utc::now().to_rfc3339(),
        }
    }

    /// Stored answers, only when they were collected for the loaded quiz.
    pub fn answers_for(&self, config: &QuizConfig) -> Option<&AnswerMap> {
        (self.quiz_id == config.quiz_id).then_some(&self.answers)
    }

    pub fn require_answers_for(&self, config: &QuizConfig) -> Result<&AnswerMap> {
        self.answers_for(config)
            .ok_or_else(|| FitQuizError::SessionMismatch {
                expected: config.quiz_id.clone(),
                found: self.quiz_id.clone(),
            })
    }

    /// Stored answers in submission form, ready to be validated again
    /// against the current quiz before scoring.
    pub fn raw_answers_for(&self, config: &QuizConfig) -> Result<RawAnswers> {
        Ok(self
            .require_answers_for(config)?
            .iter()
            .map(|(id, answer)| (id.clone(), answer.to_string()))
            .collect())
    }
}

pub fn save_session(path: &Path, session: &QuizSession) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(session)?;
    fs::write(path, json)?;
    tracing::info!(path = %path.display(), quiz = %session.quiz_id, "session saved");
    Ok(())
}

pub fn load_session(path: &Path) -> Result<Option<QuizSession>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}
