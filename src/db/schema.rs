use crate::db::config::DbBackend;
use crate::db::DatabaseProxy;

pub const POSTGRES_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS lessons (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    topic TEXT NOT NULL,
    content TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS quizzes (
    id SERIAL PRIMARY KEY,
    lesson_id TEXT NOT NULL REFERENCES lessons (id),
    question TEXT NOT NULL,
    option_a TEXT,
    option_b TEXT,
    option_c TEXT,
    option_d TEXT,
    correct_option TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS quizzes_lesson_id_idx ON quizzes (lesson_id);
"#;

pub const SQLITE_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS lessons (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    topic TEXT NOT NULL,
    content TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS quizzes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    lesson_id TEXT NOT NULL REFERENCES lessons (id),
    question TEXT NOT NULL,
    option_a TEXT,
    option_b TEXT,
    option_c TEXT,
    option_d TEXT,
    correct_option TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS quizzes_lesson_id_idx ON quizzes (lesson_id);
"#;

pub fn schema_for(backend: DbBackend) -> &'static str {
    match backend {
        DbBackend::Postgres => POSTGRES_SCHEMA_SQL,
        DbBackend::Sqlite => SQLITE_SCHEMA_SQL,
    }
}

pub async fn apply(proxy: &DatabaseProxy) -> Result<(), sqlx::Error> {
    for statement in split_sql_statements(schema_for(proxy.backend())) {
        sqlx::query(&statement).execute(proxy.pool()).await?;
    }
    Ok(())
}

/// Splits a script on `;`, ignoring semicolons inside quoted strings.
pub fn split_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut in_single_quote = false;
    let mut in_double_quote = false;

    for ch in sql.chars() {
        match ch {
            '\'' if !in_double_quote => in_single_quote = !in_single_quote,
            '"' if !in_single_quote => in_double_quote = !in_double_quote,
            ';' if !in_single_quote && !in_double_quote => {
                let stmt = current.trim();
                if !stmt.is_empty() {
                    statements.push(stmt.to_string());
                }
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }

    let tail = current.trim();
    if !tail.is_empty() {
        statements.push(tail.to_string());
    }

    statements
}
