use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

pub type TraitWeights = BTreeMap<String, f64>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trait {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceOption {
    pub key: String,
    pub label: String,
    pub weights: TraitWeights,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LikertScale {
    pub scale: Vec<i64>,
    pub labels: BTreeMap<String, String>,
    pub weights_per_point: TraitWeights,
}

impl LikertScale {
    /// Display label for a scale point, falling back to the number itself.
    pub fn label_for(&self, point: i64) -> String {
        self.labels
            .get(&point.to_string())
            .cloned()
            .unwrap_or_else(|| point.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    ForcedChoice,
    Likert,
}

impl QuestionType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "single_choice" => Some(Self::SingleChoice),
            "forced_choice" => Some(Self::ForcedChoice),
            "likert" => Some(Self::Likert),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SingleChoice => "single_choice",
            Self::ForcedChoice => "forced_choice",
            Self::Likert => "likert",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific body of a question.
///
/// Forced choice carries the same payload as single choice; it stays a
/// separate variant so a two-option constraint can be added later.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionBody {
    SingleChoice { options: Vec<ChoiceOption> },
    ForcedChoice { options: Vec<ChoiceOption> },
    Likert(LikertScale),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub body: QuestionBody,
}

impl Question {
    pub fn question_type(&self) -> QuestionType {
        match self.body {
            QuestionBody::SingleChoice { .. } => QuestionType::SingleChoice,
            QuestionBody::ForcedChoice { .. } => QuestionType::ForcedChoice,
            QuestionBody::Likert(_) => QuestionType::Likert,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Threshold {
    pub min_score: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringSpec {
    pub trait_caps: TraitWeights,
    pub industrial_fit_weights: TraitWeights,
    pub thresholds: Vec<Threshold>,
    pub normalization: String,
}

impl ScoringSpec {
    /// Cap used as a divisor; a missing or zero cap divides by 1.0.
    pub fn divisor_for(&self, code: &str) -> f64 {
        match self.trait_caps.get(code) {
            Some(cap) if *cap != 0.0 => *cap,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackTemplates {
    pub overall: BTreeMap<String, String>,
    pub trait_snippets: BTreeMap<String, String>,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UiSettings {
    pub progress_bar: bool,
    pub shuffle_within_types: bool,
    pub length_minutes: Option<i64>,
    pub skip_logic: Option<Vec<Value>>,
    pub result_visuals: Option<Vec<Value>>,
}

/// A validated quiz. Built only by the loader; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizConfig {
    pub quiz_id: String,
    pub title: String,
    pub traits: Vec<Trait>,
    pub questions: Vec<Question>,
    pub scoring: ScoringSpec,
    pub feedback_templates: FeedbackTemplates,
    pub ui: UiSettings,
}

impl QuizConfig {
    pub fn trait_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.traits
            .iter()
            .find(|t| t.code == code)
            .map(|t| t.name.as_str())
            .unwrap_or(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_round_trips_through_schema_names() {
        for name in ["single_choice", "forced_choice", "likert"] {
            let parsed = QuestionType::parse(name).expect("known type should parse");
            assert_eq!(parsed.as_str(), name);
        }
        assert!(QuestionType::parse("ranking").is_none());
    }

    #[test]
    fn zero_cap_divides_by_one() {
        let spec = ScoringSpec {
            trait_caps: [("A".to_string(), 0.0), ("B".to_string(), 4.0)]
                .into_iter()
                .collect(),
            industrial_fit_weights: TraitWeights::new(),
            thresholds: vec![],
            normalization: String::new(),
        };
        assert_eq!(spec.divisor_for("A"), 1.0);
        assert_eq!(spec.divisor_for("B"), 4.0);
        assert_eq!(spec.divisor_for("missing"), 1.0);
    }

    #[test]
    fn likert_label_falls_back_to_point() {
        let scale = LikertScale {
            scale: vec![1, 2],
            labels: [("1".to_string(), "Disagree".to_string())]
                .into_iter()
                .collect(),
            weights_per_point: TraitWeights::new(),
        };
        assert_eq!(scale.label_for(1), "Disagree");
        assert_eq!(scale.label_for(2), "2");
    }
}
