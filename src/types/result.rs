use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraitScore {
    pub code: String,
    pub name: String,
    pub raw: f64,
    pub capped: f64,
    pub normalized: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedback {
    pub overall_text: String,
    pub top_traits: Vec<String>,
    pub trait_snippets: Vec<String>,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub quiz_id: String,
    pub title: String,
    pub fit_score: f64,
    pub label: String,
    pub trait_scores: Vec<TraitScore>,
    pub feedback: Feedback,
}
