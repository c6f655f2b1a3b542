use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Transport-level submission: question id to raw string value.
pub type RawAnswers = BTreeMap<String, String>;

/// Validated answers keyed by question id.
pub type AnswerMap = BTreeMap<String, Answer>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Point(i64),
    Choice(String),
}

impl Answer {
    pub fn as_choice(&self) -> Option<&str> {
        match self {
            Self::Choice(key) => Some(key),
            Self::Point(_) => None,
        }
    }

    pub fn as_point(&self) -> Option<i64> {
        match self {
            Self::Point(value) => Some(*value),
            Self::Choice(_) => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point(value) => write!(f, "{value}"),
            Self::Choice(key) => f.write_str(key),
        }
    }
}
