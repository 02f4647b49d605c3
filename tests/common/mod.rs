#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use tempfile::TempDir;

use learning_dashboard::db::config::DbConfig;
use learning_dashboard::db::DatabaseProxy;
use learning_dashboard::store::{ContentStore, FileStore};

pub const INTRO_LESSON: &str = r#"{
    "title": "Introduction to Rust",
    "topic": "basics",
    "sections": [
        {"heading": "Why Rust", "content": "Memory safety without a garbage collector."},
        {"heading": "Tooling", "content": "Cargo builds & tests your code."}
    ]
}"#;

pub const INTRO_QUIZ: &str = r#"[
    {"question": "Which tool builds Rust code?", "options": ["make", "cargo", "npm"], "answer": 1},
    {"question": "Does Rust have a garbage collector?", "options": ["No", "Yes"], "answer": 0}
]"#;

pub const TRAITS_LESSON: &str = r#"{"title": "Traits", "content": "Shared behaviour."}"#;

pub fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create fixture dir");
    }
    std::fs::write(path, contents).expect("failed to write fixture");
}

/// A data directory with two lessons, one of which has a quiz.
pub fn sample_data_dir() -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    write_file(dir.path(), "lessons/intro.json", INTRO_LESSON);
    write_file(dir.path(), "quizzes/intro_quiz.json", INTRO_QUIZ);
    write_file(dir.path(), "lessons/traits.json", TRAITS_LESSON);
    dir
}

pub fn create_file_app(data_dir: &Path) -> Router {
    let store = FileStore::new(data_dir);
    learning_dashboard::build_app(ContentStore::Files(store))
}

pub async fn create_sqlite_proxy(dir: &TempDir) -> DatabaseProxy {
    let db_path = dir.path().join("learning.sqlite3");
    let config = DbConfig::new(format!("sqlite:{}?mode=rwc", db_path.display()))
        .with_max_connections(2)
        .with_init_schema(true);
    DatabaseProxy::connect(config)
        .await
        .expect("failed to open sqlite database")
}

pub async fn insert_lesson(proxy: &DatabaseProxy, id: &str, title: &str, content: &str) {
    sqlx::query("INSERT INTO lessons (id, title, topic, content) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(title)
        .bind("general")
        .bind(content)
        .execute(proxy.pool())
        .await
        .expect("failed to insert lesson");
}

pub async fn insert_question(
    proxy: &DatabaseProxy,
    lesson_id: &str,
    question: &str,
    options: [&str; 4],
    correct_option: &str,
) {
    sqlx::query(
        r#"
        INSERT INTO quizzes (lesson_id, question, option_a, option_b, option_c, option_d, correct_option)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(lesson_id)
    .bind(question)
    .bind(options[0])
    .bind(options[1])
    .bind(options[2])
    .bind(options[3])
    .bind(correct_option)
    .execute(proxy.pool())
    .await
    .expect("failed to insert question");
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

pub fn post_body(uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("body is not utf-8")
}
