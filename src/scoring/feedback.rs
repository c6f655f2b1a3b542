use super::traits::TraitScores;
use crate::types::quiz::QuizConfig;
use crate::types::result::Feedback;
use std::cmp::Ordering;

pub const TOP_TRAITS_PLACEHOLDER: &str = "{{TOP_TRAITS}}";
const TOP_TRAIT_COUNT: usize = 3;
const FALLBACK_SNIPPET_COUNT: usize = 2;

/// Template family selected by the mapped label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackTier {
    Strong,
    Potential,
    Explore,
}

impl FeedbackTier {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Strong Fit for Industrial Physics" => Self::Strong,
            "Potential Fit — Explore Further" => Self::Potential,
            _ => Self::Explore,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Potential => "potential",
            Self::Explore => "explore",
        }
    }
}

pub fn compose_feedback(config: &QuizConfig, capped: &TraitScores, label: &str) -> Feedback {
    let ranked = ranked_traits(config, capped);
    let top_traits = ranked
        .iter()
        .take(TOP_TRAIT_COUNT)
        .map(|(code, _)| config.trait_name(code).to_string())
        .collect::<Vec<_>>();

    let template = config
        .feedback_templates
        .overall
        .get(FeedbackTier::from_label(label).key())
        .map(String::as_str)
        .unwrap_or_default();
    let overall_text = template.replace(TOP_TRAITS_PLACEHOLDER, &top_traits.join(", "));

    let values = ranked.iter().map(|(_, value)| *value).collect::<Vec<_>>();
    let median_value = median(&values);

    let snippets = &config.feedback_templates.trait_snippets;
    let snippet_for = |code: &str| snippets.get(code).filter(|snippet| !snippet.is_empty()).cloned();

    let mut trait_snippets = ranked
        .iter()
        .filter(|(_, value)| *value >= median_value)
        .filter_map(|(code, _)| snippet_for(code))
        .collect::<Vec<_>>();
    if trait_snippets.is_empty() {
        trait_snippets = ranked
            .iter()
            .take(FALLBACK_SNIPPET_COUNT)
            .filter_map(|(code, _)| snippet_for(code))
            .collect();
    }

    Feedback {
        overall_text,
        top_traits,
        trait_snippets,
        next_steps: config.feedback_templates.next_steps.clone(),
    }
}

/// Traits by cap-normalized score, highest first; ties keep declaration order.
fn ranked_traits<'a>(config: &'a QuizConfig, capped: &TraitScores) -> Vec<(&'a str, f64)> {
    let mut ranked = config
        .traits
        .iter()
        .map(|t| {
            let value =
                capped.get(&t.code).copied().unwrap_or(0.0) / config.scoring.divisor_for(&t.code);
            (t.code.as_str(), value)
        })
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
