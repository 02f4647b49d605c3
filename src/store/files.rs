use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::store::models::{
    answer_index_from_letter, Lesson, LessonBody, LessonSummary, Question, QuestionError,
    Section,
};
use crate::store::{is_valid_id, ContentError};

const LESSONS_DIR: &str = "lessons";
const QUIZZES_DIR: &str = "quizzes";
const QUIZ_SUFFIX: &str = "_quiz";

#[derive(Debug, Deserialize)]
struct LessonFile {
    title: String,
    #[serde(default)]
    topic: Option<String>,
    #[serde(default)]
    sections: Option<Vec<SectionFile>>,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SectionFile {
    heading: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct QuestionFile {
    question: String,
    options: Vec<String>,
    answer: AnswerFile,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnswerFile {
    Index(usize),
    Letter(String),
}

/// Lessons and quizzes stored as `lessons/<id>.json` and `quizzes/<id>_quiz.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn lessons_dir(&self) -> PathBuf {
        self.root.join(LESSONS_DIR)
    }

    pub fn quizzes_dir(&self) -> PathBuf {
        self.root.join(QUIZZES_DIR)
    }

    pub fn lesson_path(&self, lesson_id: &str) -> PathBuf {
        self.lessons_dir().join(format!("{lesson_id}.json"))
    }

    pub fn quiz_path(&self, lesson_id: &str) -> PathBuf {
        self.quizzes_dir()
            .join(format!("{lesson_id}{QUIZ_SUFFIX}.json"))
    }

    /// Creates the lesson and quiz directories if they are missing.
    pub async fn ensure_layout(&self) -> Result<(), ContentError> {
        for dir in [self.lessons_dir(), self.quizzes_dir()] {
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|source| ContentError::Io { path: dir, source })?;
        }
        Ok(())
    }

    pub async fn list_lessons(&self) -> Result<Vec<LessonSummary>, ContentError> {
        let dir = self.lessons_dir();
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(ContentError::Io { path: dir, source }),
        };

        let mut lessons = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(source) => {
                    return Err(ContentError::Io {
                        path: dir.clone(),
                        source,
                    })
                }
            };

            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(lesson_id) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if !is_valid_id(lesson_id) {
                continue;
            }

            match read_json::<LessonFile>(&path).await {
                Ok(Some(file)) => lessons.push(LessonSummary {
                    id: lesson_id.to_string(),
                    title: file.title,
                }),
                Ok(None) => {}
                Err(err) => tracing::warn!(error = %err, "skipping unreadable lesson file"),
            }
        }

        lessons.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(lessons)
    }

    pub async fn get_lesson(&self, lesson_id: &str) -> Result<Option<Lesson>, ContentError> {
        let path = self.lesson_path(lesson_id);
        let Some(file) = read_json::<LessonFile>(&path).await? else {
            return Ok(None);
        };

        let body = match (file.sections, file.content) {
            (Some(sections), _) => LessonBody::Sections(
                sections
                    .into_iter()
                    .map(|s| Section {
                        heading: s.heading,
                        content: s.content,
                    })
                    .collect(),
            ),
            (None, Some(content)) => LessonBody::Text(content),
            (None, None) => {
                return Err(ContentError::Malformed {
                    origin: path.display().to_string(),
                    reason: "lesson has neither sections nor content".to_string(),
                })
            }
        };

        Ok(Some(Lesson {
            id: lesson_id.to_string(),
            title: file.title,
            topic: file.topic.unwrap_or_else(|| lesson_id.to_string()),
            body,
        }))
    }

    pub async fn get_quiz_questions(
        &self,
        lesson_id: &str,
    ) -> Result<Option<Vec<Question>>, ContentError> {
        let path = self.quiz_path(lesson_id);
        let Some(raw) = read_json::<Vec<QuestionFile>>(&path).await? else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }

        raw.into_iter()
            .map(question_from_file)
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
            .map_err(|err| ContentError::Malformed {
                origin: path.display().to_string(),
                reason: err.to_string(),
            })
    }

    /// True only when the quiz file loads with at least one question.
    pub async fn has_quiz(&self, lesson_id: &str) -> Result<bool, ContentError> {
        match self.get_quiz_questions(lesson_id).await {
            Ok(questions) => Ok(questions.is_some()),
            Err(err) if err.presents_as_not_found() => {
                tracing::warn!(error = %err, lesson_id, "quiz file present but unusable");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }
}

fn question_from_file(raw: QuestionFile) -> Result<Question, QuestionError> {
    let answer = match raw.answer {
        AnswerFile::Index(index) => index,
        AnswerFile::Letter(letter) => match answer_index_from_letter(&letter) {
            Some(index) => index,
            None => {
                return Err(QuestionError::InvalidLetter {
                    question: raw.question,
                    letter,
                })
            }
        },
    };
    Question::new(raw.question, raw.options, answer)
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ContentError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ContentError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|err| ContentError::Malformed {
            origin: path.display().to_string(),
            reason: err.to_string(),
        })
}
