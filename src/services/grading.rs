use std::collections::HashMap;
use std::fmt;

use crate::store::Question;

/// Form field name for the question at `index`.
pub fn answer_key(index: usize) -> String {
    format!("q{index}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grade {
    pub score: usize,
    pub total: usize,
}

impl Grade {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.score * 100) as f64 / self.total as f64).round() as u32
    }

    pub fn is_perfect(&self) -> bool {
        self.score == self.total
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "You scored {} out of {}.", self.score, self.total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionOutcome {
    /// The option the submission picked, if it named one.
    pub selected: Option<usize>,
    pub correct: bool,
}

/// Reads a submitted option value. Only plain ASCII digits count.
fn parse_selection(raw: &str) -> Option<usize> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<usize>().ok()
}

pub fn grade(questions: &[Question], submitted: &HashMap<String, String>) -> Grade {
    grade_detailed(questions, submitted).0
}

/// Scores `submitted` against `questions`; missing or unparsable answers
/// are wrong, never an error.
pub fn grade_detailed(
    questions: &[Question],
    submitted: &HashMap<String, String>,
) -> (Grade, Vec<QuestionOutcome>) {
    let outcomes: Vec<QuestionOutcome> = questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected = submitted
                .get(&answer_key(index))
                .and_then(|raw| parse_selection(raw));
            QuestionOutcome {
                selected,
                correct: selected == Some(question.answer),
            }
        })
        .collect();

    let grade = Grade {
        score: outcomes.iter().filter(|o| o.correct).count(),
        total: questions.len(),
    };
    (grade, outcomes)
}
