pub mod discover;
mod fields;
mod questions;

use crate::error::ConfigError;
use crate::types::quiz::{
    FeedbackTemplates, QuizConfig, ScoringSpec, Threshold, Trait, TraitWeights, UiSettings,
};
use fields::{
    as_array, as_object, coerce_f64, coerce_i64, display_string, field, list_field,
    object_field, require_keys, string_field, string_map, string_value, truthy, weight_map,
    Object,
};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

const REQUIRED_TOP_LEVEL_KEYS: [&str; 6] = [
    "quiz_id",
    "title",
    "traits",
    "questions",
    "scoring",
    "feedback_templates",
];
const REQUIRED_SCORING_KEYS: [&str; 4] = [
    "trait_caps",
    "industrial_fit_weights",
    "thresholds",
    "normalization",
];
const REQUIRED_FEEDBACK_KEYS: [&str; 3] = ["overall", "trait_snippets", "next_steps"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Toml,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// Reads, parses and validates a quiz schema file. Every call re-reads the source.
pub fn load_config(path: &Path) -> Result<QuizConfig, ConfigError> {
    tracing::info!("Loading quiz configuration from {}", path.display());
    let source = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::new(format!("Unable to read quiz configuration: {e}")))?;
    let config = load_config_str(&source, SourceFormat::from_path(path))?;
    tracing::info!(
        "Loaded quiz '{}' with {} questions",
        config.quiz_id,
        config.questions.len()
    );
    Ok(config)
}

pub fn load_config_str(source: &str, format: SourceFormat) -> Result<QuizConfig, ConfigError> {
    let document: Value = match format {
        SourceFormat::Json => serde_json::from_str(source)
            .map_err(|e| ConfigError::new(format!("Invalid JSON: {e}")))?,
        SourceFormat::Toml => {
            toml::from_str(source).map_err(|e| ConfigError::new(format!("Invalid TOML: {e}")))?
        }
    };
    parse_config(&document)
}

/// Validates a parsed document in one pass: traits, questions, scoring,
/// feedback templates, then UI settings.
pub fn parse_config(document: &Value) -> Result<QuizConfig, ConfigError> {
    let data = as_object(document, "Quiz configuration")?;
    require_keys(data, &REQUIRED_TOP_LEVEL_KEYS)?;

    let traits = parse_traits(data)?;
    let trait_codes = traits
        .iter()
        .map(|t| t.code.clone())
        .collect::<BTreeSet<_>>();

    let questions_payload = list_field(data, "questions", "Quiz")?;
    if questions_payload.is_empty() {
        return Err(ConfigError::new("Quiz must contain at least one question"));
    }

    let mut seen_ids = HashSet::new();
    let mut questions = Vec::with_capacity(questions_payload.len());
    for raw in questions_payload {
        let payload = as_object(raw, "Question")?;
        let id = match field(payload, "id") {
            Some(value) => string_value(value, "Question 'id'")?,
            None => String::new(),
        };
        if id.is_empty() {
            return Err(ConfigError::new("Question missing 'id'"));
        }
        if !seen_ids.insert(id.clone()) {
            return Err(ConfigError::new(format!("Duplicate question id '{id}'")));
        }
        questions.push(questions::build_question(&id, payload, &trait_codes)?);
    }

    let scoring = parse_scoring(data, &trait_codes)?;
    let feedback_templates = parse_feedback(data)?;
    let ui = parse_ui(data)?;

    Ok(QuizConfig {
        quiz_id: string_value(&data["quiz_id"], "'quiz_id'")?,
        title: string_value(&data["title"], "'title'")?,
        traits,
        questions,
        scoring,
        feedback_templates,
        ui,
    })
}

fn parse_traits(data: &Object) -> Result<Vec<Trait>, ConfigError> {
    let payload = list_field(data, "traits", "Quiz")?;
    if payload.is_empty() {
        return Err(ConfigError::new("Quiz must define at least one trait"));
    }

    let mut seen = HashSet::new();
    let mut traits = Vec::with_capacity(payload.len());
    for raw in payload {
        let item = as_object(raw, "Trait")?;
        let code = field(item, "code")
            .ok_or_else(|| ConfigError::new("Trait missing 'code'"))
            .and_then(|value| string_value(value, "Trait 'code'"))?;
        if !seen.insert(code.clone()) {
            return Err(ConfigError::new(format!("Duplicate trait code '{code}'")));
        }
        let name = string_field(item, "name", &code, &format!("trait {code}"))?;
        traits.push(Trait { code, name });
    }
    Ok(traits)
}

fn parse_scoring(data: &Object, trait_codes: &BTreeSet<String>) -> Result<ScoringSpec, ConfigError> {
    let scoring = as_object(&data["scoring"], "'scoring'")?;
    require_keys(scoring, &REQUIRED_SCORING_KEYS)?;

    let trait_caps = weight_map(field(scoring, "trait_caps"), "trait_caps")?;
    let industrial_fit_weights =
        weight_map(field(scoring, "industrial_fit_weights"), "industrial_fit_weights")?;
    if !covers_exactly(&trait_caps, trait_codes) {
        return Err(ConfigError::new("Trait caps must be provided for all traits"));
    }
    if !covers_exactly(&industrial_fit_weights, trait_codes) {
        return Err(ConfigError::new(
            "Industrial fit weights must be provided for all traits",
        ));
    }

    let thresholds = list_field(scoring, "thresholds", "scoring")?
        .iter()
        .map(parse_threshold)
        .collect::<Result<Vec<_>, _>>()?;
    if thresholds.is_empty() {
        return Err(ConfigError::new("At least one scoring threshold is required"));
    }

    Ok(ScoringSpec {
        trait_caps,
        industrial_fit_weights,
        thresholds,
        normalization: field(scoring, "normalization")
            .map(display_string)
            .unwrap_or_default(),
    })
}

fn covers_exactly(weights: &TraitWeights, trait_codes: &BTreeSet<String>) -> bool {
    weights.len() == trait_codes.len() && weights.keys().all(|code| trait_codes.contains(code))
}

fn parse_threshold(raw: &Value) -> Result<Threshold, ConfigError> {
    let item = as_object(raw, "Threshold")?;
    let min_score = match field(item, "min_score") {
        Some(value) => coerce_f64(value, "threshold min_score")?,
        None => 0.0,
    };
    let label = field(item, "label").map(display_string).unwrap_or_default();
    Ok(Threshold { min_score, label })
}

fn parse_feedback(data: &Object) -> Result<FeedbackTemplates, ConfigError> {
    let feedback = as_object(&data["feedback_templates"], "'feedback_templates'")?;
    require_keys(feedback, &REQUIRED_FEEDBACK_KEYS)?;

    let next_steps = list_field(feedback, "next_steps", "feedback_templates")?
        .iter()
        .map(display_string)
        .collect();

    Ok(FeedbackTemplates {
        overall: string_map(field(feedback, "overall"), "feedback_templates 'overall'")?,
        trait_snippets: string_map(
            field(feedback, "trait_snippets"),
            "feedback_templates 'trait_snippets'",
        )?,
        next_steps,
    })
}

fn parse_ui(data: &Object) -> Result<UiSettings, ConfigError> {
    let Some(ui) = object_field(data, "ui", "Quiz")? else {
        return Ok(UiSettings::default());
    };

    let opaque_list = |key: &str| -> Result<Option<Vec<Value>>, ConfigError> {
        field(ui, key)
            .map(|value| as_array(value, &format!("ui '{key}'")).map(<[Value]>::to_vec))
            .transpose()
    };

    Ok(UiSettings {
        progress_bar: truthy(field(ui, "progress_bar")),
        shuffle_within_types: truthy(field(ui, "shuffle_within_types")),
        length_minutes: field(ui, "length_minutes")
            .map(|value| coerce_i64(value, "ui length_minutes"))
            .transpose()?,
        skip_logic: opaque_list("skip_logic")?,
        result_visuals: opaque_list("result_visuals")?,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// Two-trait quiz with one question of each type.
    pub(crate) fn sample_document() -> Value {
        json!({
            "quiz_id": "industrial-physics-v1",
            "title": "Industrial Physics Fit",
            "traits": [
                {"code": "ANL", "name": "Analytical Thinking"},
                {"code": "HND", "name": "Hands-on Building"}
            ],
            "questions": [
                {
                    "id": "q1",
                    "type": "single_choice",
                    "text": "Pick a weekend project",
                    "options": [
                        {"key": "a", "label": "Model a circuit", "weights": {"ANL": 2}},
                        {"key": "b", "label": "Build a go-kart", "weights": {"HND": 2}}
                    ]
                },
                {
                    "id": "q2",
                    "type": "forced_choice",
                    "text": "Theory or practice?",
                    "options": [
                        {"key": "theory", "label": "Theory", "weights": {"ANL": 1}},
                        {"key": "practice", "label": "Practice", "weights": {"HND": 1}}
                    ]
                },
                {
                    "id": "q3",
                    "type": "likert",
                    "text": "I enjoy taking machines apart",
                    "scale": [1, 2, 3, 4, 5],
                    "labels": {"1": "Strongly disagree", "5": "Strongly agree"},
                    "weights_per_point": {"HND": 1.0, "ANL": 0.2}
                }
            ],
            "scoring": {
                "trait_caps": {"ANL": 4, "HND": 8},
                "industrial_fit_weights": {"ANL": 1, "HND": 1},
                "thresholds": [
                    {"min_score": 14, "label": "Strong Fit for Industrial Physics"},
                    {"min_score": 8, "label": "Potential Fit — Explore Further"},
                    {"min_score": 0, "label": "Explore Other Paths"}
                ],
                "normalization": "cap"
            },
            "feedback_templates": {
                "overall": {
                    "strong": "Great match. Your strengths: {{TOP_TRAITS}}.",
                    "potential": "Promising. Lean on {{TOP_TRAITS}}.",
                    "explore": "Keep exploring. Notable: {{TOP_TRAITS}}."
                },
                "trait_snippets": {
                    "ANL": "You reason carefully about systems.",
                    "HND": "You learn by building."
                },
                "next_steps": ["Visit a lab", "Talk to an engineer"]
            },
            "ui": {"progress_bar": true, "shuffle_within_types": false}
        })
    }

    fn expect_error(document: Value) -> String {
        parse_config(&document)
            .expect_err("document should be rejected")
            .message()
            .to_string()
    }

    #[test]
    fn parses_valid_document() {
        let config = parse_config(&sample_document()).expect("sample should load");
        assert_eq!(config.quiz_id, "industrial-physics-v1");
        assert_eq!(config.traits.len(), 2);
        assert_eq!(config.questions.len(), 3);
        assert_eq!(config.scoring.trait_caps["ANL"], 4.0);
        assert_eq!(config.scoring.thresholds[1].min_score, 8.0);
        assert!(config.ui.progress_bar);
        assert!(!config.ui.shuffle_within_types);
        assert_eq!(config.feedback_templates.next_steps.len(), 2);
    }

    #[test]
    fn loading_twice_yields_equal_configs() {
        let first = parse_config(&sample_document()).expect("first load");
        let second = parse_config(&sample_document()).expect("second load");
        assert_eq!(first, second);
    }

    #[test]
    fn ui_defaults_when_section_missing() {
        let mut doc = sample_document();
        doc.as_object_mut().expect("object").remove("ui");
        let config = parse_config(&doc).expect("ui is optional");
        assert_eq!(config.ui, UiSettings::default());
    }

    #[test]
    fn trait_name_defaults_to_code() {
        let mut doc = sample_document();
        doc["traits"][1] = json!({"code": "HND"});
        let config = parse_config(&doc).expect("name is optional");
        assert_eq!(config.traits[1].name, "HND");
    }

    #[test]
    fn rejects_missing_top_level_keys() {
        let mut doc = sample_document();
        doc.as_object_mut().expect("object").remove("scoring");
        assert_eq!(expect_error(doc), "Missing required keys: scoring");
    }

    #[test]
    fn rejects_empty_traits() {
        let mut doc = sample_document();
        doc["traits"] = json!([]);
        assert_eq!(expect_error(doc), "Quiz must define at least one trait");
    }

    #[test]
    fn rejects_empty_questions() {
        let mut doc = sample_document();
        doc["questions"] = json!([]);
        assert_eq!(expect_error(doc), "Quiz must contain at least one question");
    }

    #[test]
    fn rejects_question_without_id() {
        let mut doc = sample_document();
        doc["questions"][0].as_object_mut().expect("object").remove("id");
        assert_eq!(expect_error(doc), "Question missing 'id'");

        let mut doc = sample_document();
        doc["questions"][0]["id"] = json!("");
        assert_eq!(expect_error(doc), "Question missing 'id'");
    }

    #[test]
    fn rejects_duplicate_question_id() {
        let mut doc = sample_document();
        doc["questions"][2]["id"] = json!("q1");
        assert_eq!(expect_error(doc), "Duplicate question id 'q1'");
    }

    #[test]
    fn rejects_duplicate_option_key() {
        let mut doc = sample_document();
        doc["questions"][0]["options"][1]["key"] = json!("a");
        assert_eq!(expect_error(doc), "Duplicate option key 'a' in question q1");
    }

    #[test]
    fn rejects_unknown_trait_in_option_weights() {
        let mut doc = sample_document();
        doc["questions"][1]["options"][0]["weights"] = json!({"XYZ": 1});
        let message = expect_error(doc);
        assert!(message.contains("Unknown trait codes XYZ"));
        assert!(message.contains("question q2 option theory"));
    }

    #[test]
    fn rejects_unknown_trait_in_likert_weights() {
        let mut doc = sample_document();
        doc["questions"][2]["weights_per_point"] = json!({"XYZ": 1});
        assert!(expect_error(doc).contains("question q3 weights_per_point"));
    }

    #[test]
    fn rejects_caps_not_covering_traits() {
        let mut doc = sample_document();
        doc["scoring"]["trait_caps"] = json!({"ANL": 4});
        assert_eq!(expect_error(doc), "Trait caps must be provided for all traits");

        let mut doc = sample_document();
        doc["scoring"]["trait_caps"] = json!({"ANL": 4, "HND": 8, "EXTRA": 1});
        assert_eq!(expect_error(doc), "Trait caps must be provided for all traits");
    }

    #[test]
    fn rejects_fit_weights_not_covering_traits() {
        let mut doc = sample_document();
        doc["scoring"]["industrial_fit_weights"] = json!({"HND": 1});
        assert_eq!(
            expect_error(doc),
            "Industrial fit weights must be provided for all traits"
        );
    }

    #[test]
    fn rejects_empty_thresholds() {
        let mut doc = sample_document();
        doc["scoring"]["thresholds"] = json!([]);
        assert_eq!(expect_error(doc), "At least one scoring threshold is required");
    }

    #[test]
    fn rejects_empty_likert_scale() {
        let mut doc = sample_document();
        doc["questions"][2]["scale"] = json!([]);
        assert_eq!(expect_error(doc), "Likert question q3 requires a scale");
    }

    #[test]
    fn rejects_unsupported_question_type() {
        let mut doc = sample_document();
        doc["questions"][0]["type"] = json!("ranking");
        assert_eq!(expect_error(doc), "Unsupported question type 'ranking'");
    }

    #[test]
    fn rejects_missing_scoring_and_feedback_keys() {
        let mut doc = sample_document();
        doc["scoring"].as_object_mut().expect("object").remove("normalization");
        assert_eq!(expect_error(doc), "Missing required keys: normalization");

        let mut doc = sample_document();
        doc["feedback_templates"]
            .as_object_mut()
            .expect("object")
            .remove("next_steps");
        assert_eq!(expect_error(doc), "Missing required keys: next_steps");
    }

    #[test]
    fn rejects_non_numeric_cap() {
        let mut doc = sample_document();
        doc["scoring"]["trait_caps"]["ANL"] = json!("lots");
        assert!(expect_error(doc).contains("trait_caps 'ANL'"));
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let mut doc = sample_document();
        doc["scoring"]["trait_caps"]["ANL"] = json!("4.5");
        let config = parse_config(&doc).expect("numeric string should coerce");
        assert_eq!(config.scoring.trait_caps["ANL"], 4.5);
    }

    #[test]
    fn toml_and_json_sources_agree() {
        let toml_source = r#"
quiz_id = "mini"
title = "Mini"

[[traits]]
code = "A"
name = "Alpha"

[[questions]]
id = "q1"
type = "likert"
text = "Rate it"
scale = [1, 2, 3]

[questions.weights_per_point]
A = 1.0

[scoring]
normalization = "cap"
thresholds = [{ min_score = 0, label = "Any" }]

[scoring.trait_caps]
A = 3

[scoring.industrial_fit_weights]
A = 1

[feedback_templates]
next_steps = []

[feedback_templates.overall]
explore = "{{TOP_TRAITS}}"

[feedback_templates.trait_snippets]
"#;
        let json_source = json!({
            "quiz_id": "mini",
            "title": "Mini",
            "traits": [{"code": "A", "name": "Alpha"}],
            "questions": [{
                "id": "q1", "type": "likert", "text": "Rate it",
                "scale": [1, 2, 3], "weights_per_point": {"A": 1.0}
            }],
            "scoring": {
                "normalization": "cap",
                "thresholds": [{"min_score": 0, "label": "Any"}],
                "trait_caps": {"A": 3},
                "industrial_fit_weights": {"A": 1}
            },
            "feedback_templates": {
                "next_steps": [],
                "overall": {"explore": "{{TOP_TRAITS}}"},
                "trait_snippets": {}
            }
        })
        .to_string();

        let from_toml = load_config_str(toml_source, SourceFormat::Toml).expect("toml loads");
        let from_json = load_config_str(&json_source, SourceFormat::Json).expect("json loads");
        assert_eq!(from_toml, from_json);
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let err = load_config_str("{not json", SourceFormat::Json).expect_err("should fail");
        assert!(err.message().starts_with("Invalid JSON"));
    }

    #[test]
    fn load_config_reports_unreadable_file() {
        let dir = tempfile::TempDir::new().expect("temp dir should be created");
        let err = load_config(&dir.path().join("missing.json")).expect_err("should fail");
        assert!(err.message().starts_with("Unable to read quiz configuration"));
    }

    #[test]
    fn source_format_follows_extension() {
        assert_eq!(SourceFormat::from_path(Path::new("a/quiz.toml")), SourceFormat::Toml);
        assert_eq!(SourceFormat::from_path(Path::new("a/quiz.json")), SourceFormat::Json);
        assert_eq!(SourceFormat::from_path(Path::new("a/quiz")), SourceFormat::Json);
    }
}
