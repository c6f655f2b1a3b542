use crate::types::quiz::{Question, QuestionType, QuizConfig};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub total_questions: usize,
}

pub fn progress(total_questions: usize) -> Progress {
    Progress { total_questions }
}

/// Questions in display order.
///
/// With `shuffle_within_types` the questions are grouped by type in order of
/// first appearance and each group is shuffled by a generator seeded from
/// the quiz id, so the same quiz always presents the same order.
pub fn order_questions(config: &QuizConfig) -> Vec<&Question> {
    let questions = config.questions.iter().collect::<Vec<_>>();
    if !config.ui.shuffle_within_types {
        return questions;
    }

    let mut groups: Vec<(QuestionType, Vec<&Question>)> = Vec::new();
    for question in questions {
        let question_type = question.question_type();
        match groups.iter_mut().find(|(kind, _)| *kind == question_type) {
            Some((_, group)) => group.push(question),
            None => groups.push((question_type, vec![question])),
        }
    }

    let mut rng = seeded_rng(&config.quiz_id);
    groups
        .into_iter()
        .flat_map(|(_, mut group)| {
            group.shuffle(&mut rng);
            group
        })
        .collect()
}

fn seeded_rng(quiz_id: &str) -> StdRng {
    let seed: [u8; 32] = Sha256::digest(quiz_id.as_bytes()).into();
    StdRng::from_seed(seed)
}
