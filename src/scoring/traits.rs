use crate::types::answers::AnswerMap;
use crate::types::quiz::{QuestionBody, QuizConfig};
use std::collections::BTreeMap;

pub type TraitScores = BTreeMap<String, f64>;

/// Raw per-trait totals. Every declared trait starts at zero; unanswered
/// questions and non-matching answers contribute nothing.
pub fn compute_trait_scores(config: &QuizConfig, answers: &AnswerMap) -> TraitScores {
    let mut scores = config
        .traits
        .iter()
        .map(|t| (t.code.clone(), 0.0))
        .collect::<TraitScores>();

    for question in &config.questions {
        let Some(answer) = answers.get(&question.id) else {
            continue;
        };
        match &question.body {
            QuestionBody::SingleChoice { options } | QuestionBody::ForcedChoice { options } => {
                let Some(option) = answer
                    .as_choice()
                    .and_then(|key| options.iter().find(|option| option.key == key))
                else {
                    continue;
                };
                for (code, weight) in &option.weights {
                    *scores.entry(code.clone()).or_insert(0.0) += weight;
                }
            }
            QuestionBody::Likert(likert) => {
                let Some(point) = answer.as_point() else {
                    continue;
                };
                for (code, weight) in &likert.weights_per_point {
                    *scores.entry(code.clone()).or_insert(0.0) += weight * point as f64;
                }
            }
        }
    }
    scores
}

/// Clamps each score to its trait cap. A trait without a cap keeps its value.
pub fn apply_caps(config: &QuizConfig, raw: &TraitScores) -> TraitScores {
    raw.iter()
        .map(|(code, value)| {
            let cap = config
                .scoring
                .trait_caps
                .get(code)
                .copied()
                .unwrap_or(*value);
            (code.clone(), value.min(cap))
        })
        .collect()
}

/// Capped scores scaled to 0..=1 by their caps, for display.
pub fn normalize_scores(config: &QuizConfig, scores: &TraitScores) -> TraitScores {
    scores
        .iter()
        .map(|(code, score)| {
            let normalized = score / config.scoring.divisor_for(code);
            (code.clone(), normalized.min(1.0))
        })
        .collect()
}
