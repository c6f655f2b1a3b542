use crate::types::result::ScoreResult;

pub fn to_markdown(result: &ScoreResult, precision: usize) -> String {
    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", result.title));
    output.push_str(&format!(
        "Fit score: {:.*} / 20\n\n",
        precision, result.fit_score
    ));
    output.push_str(&format!("**{}**\n\n", result.label));

    if !result.feedback.overall_text.is_empty() {
        output.push_str(&result.feedback.overall_text);
        output.push_str("\n\n");
    }

    output.push_str("## Traits\n\n");
    for score in &result.trait_scores {
        output.push_str(&format!(
            "- {}: {:.2} ({:.0}%)\n",
            score.name,
            score.capped,
            score.normalized * 100.0
        ));
    }
    output.push('\n');

    output.push_str("## Highlights\n\n");
    if result.feedback.trait_snippets.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for snippet in &result.feedback.trait_snippets {
            output.push_str(&format!("- {snippet}\n"));
        }
        output.push('\n');
    }

    output.push_str("## Next Steps\n\n");
    if result.feedback.next_steps.is_empty() {
        output.push_str("- none\n");
    } else {
        for (index, step) in result.feedback.next_steps.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", index + 1, step));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample_result;
    use crate::types::result::{Feedback, TraitScore};

    fn fixed_result() -> ScoreResult {
        ScoreResult {
            quiz_id: "industrial-physics-v1".to_string(),
            title: "Industrial Physics Fit".to_string(),
            fit_score: 12.34,
            label: "Potential Fit".to_string(),
            trait_scores: vec![TraitScore {
                code: "HND".to_string(),
                name: "Hands-on Building".to_string(),
                raw: 9.0,
                capped: 6.0,
                normalized: 0.75,
            }],
            feedback: Feedback {
                overall_text: "Promising.".to_string(),
                top_traits: vec!["Hands-on Building".to_string()],
                trait_snippets: Vec::new(),
                next_steps: vec!["Visit a lab".to_string()],
            },
        }
    }

    #[test]
    fn markdown_report_contains_sections() {
        let rendered = to_markdown(&fixed_result(), 1);
        assert!(rendered.starts_with("# Industrial Physics Fit\n\n"));
        assert!(rendered.contains("Fit score: 12.3 / 20\n"));
        assert!(rendered.contains("**Potential Fit**"));
        assert!(rendered.contains("## Traits\n\n- Hands-on Building: 6.00 (75%)\n"));
        assert!(rendered.contains("## Highlights\n\n- none\n"));
        assert!(rendered.contains("## Next Steps\n\n1. Visit a lab\n"));
    }

    #[test]
    fn markdown_precision_controls_fit_digits() {
        let rendered = to_markdown(&sample_result(), 2);
        assert!(rendered.contains("Fit score: 16.25 / 20"));
    }
}
