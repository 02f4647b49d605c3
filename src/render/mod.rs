//! HTML generation for the dashboard pages.
//!
//! Pages are plain strings with inlined CSS; every piece of content is
//! escaped on the way in.

mod pages;

pub use pages::{lesson_page, manifest_page, quiz_page, QuizResult};

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f6f7f9; color: #1d2330; }
header { background: #24405f; color: #fff; padding: 1rem 2rem; }
header a { color: #fff; text-decoration: none; }
main { max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
.card { background: #fff; border-radius: 6px; padding: 1rem 1.5rem; margin-bottom: 1rem; box-shadow: 0 1px 2px rgba(0,0,0,.08); }
.topic { color: #5b6475; font-size: .9rem; }
.result { font-weight: 600; padding: .75rem 1rem; border-radius: 6px; background: #e7f0fb; }
.result.perfect { background: #e3f6e8; }
li.correct { color: #17693a; font-weight: 600; }
li.wrong { color: #a12a2a; text-decoration: line-through; }
.empty { color: #5b6475; font-style: italic; }
button { background: #24405f; color: #fff; border: 0; border-radius: 4px; padding: .5rem 1.25rem; cursor: pointer; }
"#;

/// Escape a string for safe HTML insertion.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Wraps `body` in the shared document shell.
pub(crate) fn layout(title: &str, body: &str) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>{} | Learning Dashboard</title>\n",
        html_escape(title)
    ));
    html.push_str("<style>");
    html.push_str(CSS);
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str("<header><a href=\"/\">Learning Dashboard</a></header>\n");
    html.push_str("<main>\n");
    html.push_str(body);
    html.push_str("</main>\n</body>\n</html>\n");

    html
}

/// Splits text on blank lines into escaped paragraphs.
pub(crate) fn paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>\n", html_escape(p).replace('\n', "<br>")))
        .collect()
}

pub fn error_page(title: &str, message: &str) -> String {
    let mut body = format!("<h1>{}</h1>\n", html_escape(title));
    if !message.is_empty() {
        body.push_str(&format!("<p>{}</p>\n", html_escape(message)));
    }
    body.push_str("<p><a href=\"/\">Back to all lessons</a></p>\n");
    layout(title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let html = paragraphs("first line\nsame paragraph\n\n\nsecond <b>");
        assert_eq!(
            html,
            "<p>first line<br>same paragraph</p>\n<p>second &lt;b&gt;</p>\n"
        );
    }

    #[test]
    fn error_page_has_title_and_home_link() {
        let html = error_page("Lesson not found", "");
        assert!(html.contains("<h1>Lesson not found</h1>"));
        assert!(html.contains("href=\"/\""));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }
}
