pub mod feedback;
pub mod fit;
pub mod traits;

use crate::types::answers::AnswerMap;
use crate::types::quiz::QuizConfig;
use crate::types::result::{ScoreResult, TraitScore};

pub use feedback::compose_feedback;
pub use fit::{compute_fit_score, map_threshold};
pub use traits::{apply_caps, compute_trait_scores, normalize_scores};

/// Runs the full pipeline over one validated answer set.
pub fn score(config: &QuizConfig, answers: &AnswerMap) -> ScoreResult {
    let raw = compute_trait_scores(config, answers);
    let capped = apply_caps(config, &raw);
    let normalized = normalize_scores(config, &capped);
    let fit_score = compute_fit_score(config, &capped);
    let label = map_threshold(config, fit_score);
    let feedback = compose_feedback(config, &capped, &label);
    tracing::debug!(quiz = %config.quiz_id, fit_score, label = %label, "quiz scored");

    let trait_scores = config
        .traits
        .iter()
        .map(|t| TraitScore {
            code: t.code.clone(),
            name: t.name.clone(),
            raw: raw.get(&t.code).copied().unwrap_or(0.0),
            capped: capped.get(&t.code).copied().unwrap_or(0.0),
            normalized: normalized.get(&t.code).copied().unwrap_or(0.0),
        })
        .collect();

    ScoreResult {
        quiz_id: config.quiz_id.clone(),
        title: config.title.clone(),
        fit_score,
        label,
        trait_scores,
        feedback,
    }
}
