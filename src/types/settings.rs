use crate::error::FitQuizError;
use serde::Deserialize;

pub const DEFAULT_SCHEMA_PATH: &str = "data/quiz_schema.json";
pub const DEFAULT_SESSION_FILE: &str = ".fitquiz/session.json";
const DEFAULT_PRECISION: u32 = 1;
const MAX_PRECISION: u32 = 6;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub quiz: Option<QuizSettings>,
    pub session: Option<SessionSettings>,
    pub report: Option<ReportSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizSettings {
    pub schema: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    pub format: Option<String>,
    pub precision: Option<u32>,
}

impl Settings {
    pub fn schema_path(&self) -> String {
        self.quiz
            .as_ref()
            .and_then(|quiz| quiz.schema.clone())
            .unwrap_or_else(|| DEFAULT_SCHEMA_PATH.to_string())
    }

    pub fn session_file(&self) -> String {
        self.session
            .as_ref()
            .and_then(|session| session.file.clone())
            .unwrap_or_else(|| DEFAULT_SESSION_FILE.to_string())
    }

    pub fn report_format(&self) -> Option<&str> {
        self.report
            .as_ref()
            .and_then(|report| report.format.as_deref())
    }

    pub fn precision(&self) -> u32 {
        self.report
            .as_ref()
            .and_then(|report| report.precision)
            .unwrap_or(DEFAULT_PRECISION)
    }

    pub fn validate(&self) -> Result<(), FitQuizError> {
        if let Some(format) = self.report_format() {
            if !matches!(format, "md" | "json") {
                return Err(FitQuizError::SettingsParse(format!(
                    "unsupported report.format: {format}"
                )));
            }
        }

        let precision = self.precision();
        if precision > MAX_PRECISION {
            return Err(FitQuizError::SettingsParse(format!(
                "report.precision must be between 0 and {MAX_PRECISION} (found {precision})"
            )));
        }

        for (key, value) in [
            ("quiz.schema", self.quiz.as_ref().and_then(|q| q.schema.as_ref())),
            (
                "session.file",
                self.session.as_ref().and_then(|s| s.file.as_ref()),
            ),
        ] {
            if value.is_some_and(|path| path.trim().is_empty()) {
                return Err(FitQuizError::SettingsParse(format!(
                    "{key} must be a non-empty path"
                )));
            }
        }

        Ok(())
    }
}
