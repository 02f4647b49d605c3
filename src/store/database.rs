use crate::db::operations::content::{self, QuizRow};
use crate::db::DatabaseProxy;
use crate::store::models::{
    answer_index_from_letter, Lesson, LessonBody, LessonSummary, Question, QuestionError,
};
use crate::store::ContentError;

#[derive(Clone)]
pub struct DatabaseStore {
    proxy: DatabaseProxy,
}

impl DatabaseStore {
    pub fn new(proxy: DatabaseProxy) -> Self {
        Self { proxy }
    }

    pub fn proxy(&self) -> &DatabaseProxy {
        &self.proxy
    }

    pub async fn list_lessons(&self) -> Result<Vec<LessonSummary>, ContentError> {
        let rows = content::select_lesson_summaries(&self.proxy).await?;
        Ok(rows
            .into_iter()
            .map(|row| LessonSummary {
                id: row.id,
                title: row.title,
            })
            .collect())
    }

    pub async fn get_lesson(&self, lesson_id: &str) -> Result<Option<Lesson>, ContentError> {
        let row = content::select_lesson(&self.proxy, lesson_id).await?;
        Ok(row.map(|row| Lesson {
            id: row.id,
            title: row.title,
            topic: row.topic,
            body: LessonBody::Text(row.content),
        }))
    }

    pub async fn get_quiz_questions(
        &self,
        lesson_id: &str,
    ) -> Result<Option<Vec<Question>>, ContentError> {
        let rows = content::select_quiz_rows(&self.proxy, lesson_id).await?;
        if rows.is_empty() {
            return Ok(None);
        }

        rows.iter()
            .map(question_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
            .map_err(|err| ContentError::Malformed {
                origin: format!("quiz for lesson {lesson_id}"),
                reason: err.to_string(),
            })
    }

    pub async fn has_quiz(&self, lesson_id: &str) -> Result<bool, ContentError> {
        let count = content::count_quiz_questions(&self.proxy, lesson_id).await?;
        Ok(count > 0)
    }
}

fn question_from_row(row: &QuizRow) -> Result<Question, QuestionError> {
    let answer = answer_index_from_letter(&row.correct_option).ok_or_else(|| {
        QuestionError::InvalidLetter {
            question: row.question.clone(),
            letter: row.correct_option.clone(),
        }
    })?;
    Question::new(row.question.clone(), row.options(), answer)
}
