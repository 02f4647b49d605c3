use sqlx::any::AnyRow;
use sqlx::Row;

use crate::db::DatabaseProxy;

#[derive(Debug, Clone)]
pub struct LessonRow {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct LessonSummaryRow {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct QuizRow {
    pub question: String,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
    pub correct_option: String,
}

impl QuizRow {
    /// Options in column order, up to the first empty column.
    pub fn options(&self) -> Vec<String> {
        [
            &self.option_a,
            &self.option_b,
            &self.option_c,
            &self.option_d,
        ]
        .into_iter()
        .map_while(|opt| opt.as_ref().filter(|o| !o.trim().is_empty()).cloned())
        .collect()
    }
}

pub async fn select_lesson_summaries(
    proxy: &DatabaseProxy,
) -> Result<Vec<LessonSummaryRow>, sqlx::Error> {
    let rows = sqlx::query("SELECT id, title FROM lessons ORDER BY id")
        .fetch_all(proxy.pool())
        .await?;
    rows.iter().map(map_lesson_summary).collect()
}

pub async fn select_lesson(
    proxy: &DatabaseProxy,
    lesson_id: &str,
) -> Result<Option<LessonRow>, sqlx::Error> {
    let row = sqlx::query("SELECT id, title, topic, content FROM lessons WHERE id = $1")
        .bind(lesson_id)
        .fetch_optional(proxy.pool())
        .await?;
    row.as_ref().map(map_lesson).transpose()
}

pub async fn select_quiz_rows(
    proxy: &DatabaseProxy,
    lesson_id: &str,
) -> Result<Vec<QuizRow>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT question, option_a, option_b, option_c, option_d, correct_option
        FROM quizzes
        WHERE lesson_id = $1
        ORDER BY id
        "#,
    )
    .bind(lesson_id)
    .fetch_all(proxy.pool())
    .await?;
    rows.iter().map(map_quiz_row).collect()
}

pub async fn count_quiz_questions(
    proxy: &DatabaseProxy,
    lesson_id: &str,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS total FROM quizzes WHERE lesson_id = $1")
        .bind(lesson_id)
        .fetch_one(proxy.pool())
        .await?;
    row.try_get::<i64, _>("total")
}

fn map_lesson_summary(row: &AnyRow) -> Result<LessonSummaryRow, sqlx::Error> {
    Ok(LessonSummaryRow {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
    })
}

fn map_lesson(row: &AnyRow) -> Result<LessonRow, sqlx::Error> {
    Ok(LessonRow {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        topic: row.try_get("topic")?,
        content: row.try_get("content")?,
    })
}

fn map_quiz_row(row: &AnyRow) -> Result<QuizRow, sqlx::Error> {
    Ok(QuizRow {
        question: row.try_get("question")?,
        option_a: row.try_get("option_a")?,
        option_b: row.try_get("option_b")?,
        option_c: row.try_get("option_c")?,
        option_d: row.try_get("option_d")?,
        correct_option: row.try_get("correct_option")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_stop_at_first_blank_column() {
        let row = QuizRow {
            question: "Pick one".to_string(),
            option_a: Some("first".to_string()),
            option_b: Some("second".to_string()),
            option_c: Some("  ".to_string()),
            option_d: Some("stray".to_string()),
            correct_option: "B".to_string(),
        };
        assert_eq!(row.options(), vec!["first", "second"]);
    }
}
