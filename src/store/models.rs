use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub content: String,
}

/// Lesson body as stored: one text blob in the database, ordered sections in files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonBody {
    Text(String),
    Sections(Vec<Section>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub body: LessonBody,
}

/// One entry of the manifest shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonSummary {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub answer: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("question {question:?} has no options")]
    NoOptions { question: String },
    #[error("question {question:?} answer index {answer} out of range for {options} options")]
    AnswerOutOfRange {
        question: String,
        answer: usize,
        options: usize,
    },
    #[error("question {question:?} has invalid answer letter {letter:?}")]
    InvalidLetter { question: String, letter: String },
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        answer: usize,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if options.is_empty() {
            return Err(QuestionError::NoOptions { question: text });
        }
        if answer >= options.len() {
            return Err(QuestionError::AnswerOutOfRange {
                question: text,
                answer,
                options: options.len(),
            });
        }
        Ok(Self {
            text,
            options,
            answer,
        })
    }
}

/// Maps an answer letter (`A`, `b`, ...) to its zero-based option index.
pub fn answer_index_from_letter(letter: &str) -> Option<usize> {
    let mut chars = letter.trim().chars();
    let first = chars.next()?;
    if chars.next().is_some() || !first.is_ascii_alphabetic() {
        return None;
    }
    Some((first.to_ascii_uppercase() as u8 - b'A') as usize)
}
