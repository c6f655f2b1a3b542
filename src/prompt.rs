use crate::answers::{validate_answer, validate_answers};
use crate::error::{FitQuizError, Result};
use crate::ordering::{order_questions, progress};
use crate::types::answers::{AnswerMap, RawAnswers};
use crate::types::quiz::{Question, QuestionBody, QuizConfig};
use std::io::{BufRead, Write};

/// Writes a question with its choices; `position` is 1-based.
pub fn describe_question(
    out: &mut impl Write,
    config: &QuizConfig,
    question: &Question,
    position: usize,
    total: usize,
) -> std::io::Result<()> {
    if config.ui.progress_bar {
        write!(out, "[{position}/{total}] ")?;
    }
    writeln!(out, "{}", question.text)?;
    match &question.body {
        QuestionBody::SingleChoice { options } | QuestionBody::ForcedChoice { options } => {
            for option in options {
                writeln!(out, "  {}) {}", option.key, option.label)?;
            }
        }
        QuestionBody::Likert(likert) => {
            for point in &likert.scale {
                writeln!(out, "  {}) {}", point, likert.label_for(*point))?;
            }
        }
    }
    Ok(())
}

/// Interactive run: asks every question in presentation order and re-asks
/// until the entry is valid. An empty line keeps the previous answer.
pub fn run_quiz(
    config: &QuizConfig,
    input: &mut impl BufRead,
    out: &mut impl Write,
    previous: Option<&AnswerMap>,
) -> Result<AnswerMap> {
    let ordered = order_questions(config);
    let total = progress(ordered.len()).total_questions;
    writeln!(out, "{}", config.title)?;
    if let Some(minutes) = config.ui.length_minutes {
        writeln!(out, "About {minutes} minutes, {total} questions.")?;
    }

    let mut raw = RawAnswers::new();
    for (index, question) in ordered.iter().enumerate() {
        let default = previous
            .and_then(|answers| answers.get(&question.id))
            .map(ToString::to_string);
        writeln!(out)?;
        describe_question(out, config, question, index + 1, total)?;

        loop {
            match &default {
                Some(value) => write!(out, "> [{value}] ")?,
                None => write!(out, "> ")?,
            }
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Err(FitQuizError::InputClosed);
            }
            let entry = match line.trim() {
                "" => default.clone().unwrap_or_default(),
                value => value.to_string(),
            };

            match validate_answer(question, Some(&entry)) {
                Ok(_) => {
                    raw.insert(question.id.clone(), entry);
                    break;
                }
                Err(err) => writeln!(out, "{err}")?,
            }
        }
    }

    Ok(validate_answers(config, &raw)?)
}
