pub mod json;
pub mod md;

use crate::error::FitQuizError;
use crate::types::result::ScoreResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Md,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "json" => Some(Self::Json),
            "md" => Some(Self::Md),
            _ => None,
        }
    }
}

pub fn render(
    result: &ScoreResult,
    format: OutputFormat,
    precision: u32,
) -> Result<String, FitQuizError> {
    match format {
        OutputFormat::Json => json::to_json(result).map_err(FitQuizError::Json),
        OutputFormat::Md => Ok(md::to_markdown(result, precision as usize)),
    }
}
