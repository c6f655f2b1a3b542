use thiserror::Error;

/// Raised when a quiz schema fails structural or cross-reference validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Raised when a submitted answer falls outside its question's domain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnswerValidationError {
    #[error("Question {0} is required.")]
    Missing(String),

    #[error("Invalid option for question {0}.")]
    InvalidOption(String),

    #[error("Invalid response for question {0}.")]
    InvalidResponse(String),

    #[error("Selected value for question {0} is outside the allowed scale.")]
    OutOfScale(String),
}

impl AnswerValidationError {
    pub fn question_id(&self) -> &str {
        match self {
            Self::Missing(id)
            | Self::InvalidOption(id)
            | Self::InvalidResponse(id)
            | Self::OutOfScale(id) => id,
        }
    }
}

#[derive(Error, Debug)]
pub enum FitQuizError {
    #[error("quiz configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Answer(#[from] AnswerValidationError),

    #[error("settings parse error: {0}")]
    SettingsParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("session belongs to quiz '{found}', expected '{expected}'")]
    SessionMismatch { expected: String, found: String },

    #[error("no saved session at {0}; run `fitquiz take` first")]
    NoSession(String),

    #[error("invalid answers file {path}: {reason}")]
    InvalidAnswersFile { path: String, reason: String },

    #[error("input closed before the quiz was completed")]
    InputClosed,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FitQuizError>;
