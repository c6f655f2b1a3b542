use super::traits::TraitScores;
use crate::types::quiz::{QuizConfig, Threshold};
use std::cmp::Ordering;

const FIT_SCALE: f64 = 20.0;

/// Weighted mean of cap-normalized trait scores, scaled to 0..=20.
pub fn compute_fit_score(config: &QuizConfig, capped: &TraitScores) -> f64 {
    let weights = &config.scoring.industrial_fit_weights;
    let total: f64 = weights.values().sum();
    let total = if total == 0.0 { 1.0 } else { total };

    let score: f64 = weights
        .iter()
        .map(|(code, weight)| {
            let normalized_trait =
                capped.get(code).copied().unwrap_or(0.0) / config.scoring.divisor_for(code);
            (weight / total) * normalized_trait
        })
        .sum();
    score * FIT_SCALE
}

/// Thresholds ordered by `min_score` descending; ties keep declaration order.
fn ranked_thresholds(config: &QuizConfig) -> Vec<&Threshold> {
    let mut thresholds = config.scoring.thresholds.iter().collect::<Vec<_>>();
    thresholds.sort_by(|a, b| {
        b.min_score
            .partial_cmp(&a.min_score)
            .unwrap_or(Ordering::Equal)
    });
    thresholds
}

/// The highest threshold reached by `fit_score`, or the lowest one when none is.
pub fn select_threshold(config: &QuizConfig, fit_score: f64) -> Option<&Threshold> {
    let ranked = ranked_thresholds(config);
    ranked
        .iter()
        .find(|threshold| fit_score >= threshold.min_score)
        .or_else(|| ranked.last())
        .copied()
}

pub fn map_threshold(config: &QuizConfig, fit_score: f64) -> String {
    select_threshold(config, fit_score)
        .map(|threshold| threshold.label.clone())
        .unwrap_or_default()
}
