use crate::render::{html_escape, layout, paragraphs};
use crate::services::grading::{answer_key, Grade, QuestionOutcome};
use crate::store::{Lesson, LessonBody, LessonSummary, Question};

/// A graded submission shown above the quiz form.
pub struct QuizResult<'a> {
    pub grade: Grade,
    pub outcomes: &'a [QuestionOutcome],
}

pub fn manifest_page(lessons: &[LessonSummary]) -> String {
    let mut body = String::from("<h1>Lessons</h1>\n");

    if lessons.is_empty() {
        body.push_str("<p class=\"empty\">No lessons are available yet.</p>\n");
        return layout("Lessons", &body);
    }

    body.push_str("<ul class=\"lessons\">\n");
    for lesson in lessons {
        body.push_str(&format!(
            "<li class=\"card\"><a href=\"/lesson/{}\">{}</a></li>\n",
            html_escape(&lesson.id),
            html_escape(&lesson.title)
        ));
    }
    body.push_str("</ul>\n");

    layout("Lessons", &body)
}

pub fn lesson_page(lesson: &Lesson, has_quiz: bool) -> String {
    let mut body = format!(
        "<h1>{}</h1>\n<p class=\"topic\">Topic: {}</p>\n",
        html_escape(&lesson.title),
        html_escape(&lesson.topic)
    );

    match &lesson.body {
        LessonBody::Text(text) => {
            body.push_str("<article class=\"card\">\n");
            body.push_str(&paragraphs(text));
            body.push_str("</article>\n");
        }
        LessonBody::Sections(sections) => {
            for section in sections {
                body.push_str(&format!(
                    "<section class=\"card\">\n<h2>{}</h2>\n{}</section>\n",
                    html_escape(&section.heading),
                    paragraphs(&section.content)
                ));
            }
        }
    }

    if has_quiz {
        body.push_str(&format!(
            "<p><a class=\"quiz-link\" href=\"/quiz/{}\">Take the quiz</a></p>\n",
            html_escape(&lesson.id)
        ));
    }

    layout(&lesson.title, &body)
}

pub fn quiz_page(lesson_id: &str, questions: &[Question], result: Option<&QuizResult<'_>>) -> String {
    let lesson_id = html_escape(lesson_id);
    let mut body = String::from("<h1>Quiz</h1>\n");

    if let Some(result) = result {
        let class = if result.grade.is_perfect() {
            "result perfect"
        } else {
            "result"
        };
        body.push_str(&format!(
            "<p class=\"{}\">{} ({}%)</p>\n",
            class,
            html_escape(&result.grade.to_string()),
            result.grade.percent()
        ));
    }

    body.push_str(&format!(
        "<form method=\"post\" action=\"/quiz/{lesson_id}\">\n"
    ));

    for (index, question) in questions.iter().enumerate() {
        let outcome = result.and_then(|r| r.outcomes.get(index));
        let name = answer_key(index);

        body.push_str("<fieldset class=\"card\">\n");
        body.push_str(&format!(
            "<legend>{}. {}</legend>\n<ul>\n",
            index + 1,
            html_escape(&question.text)
        ));

        for (option_index, option) in question.options.iter().enumerate() {
            let selected = outcome.and_then(|o| o.selected) == Some(option_index);
            let class = match outcome {
                Some(_) if option_index == question.answer => " class=\"correct\"",
                Some(_) if selected => " class=\"wrong\"",
                _ => "",
            };
            body.push_str(&format!(
                "<li{class}><label><input type=\"radio\" name=\"{name}\" value=\"{option_index}\"{}> {}</label></li>\n",
                if selected { " checked" } else { "" },
                html_escape(option)
            ));
        }

        body.push_str("</ul>\n</fieldset>\n");
    }

    body.push_str("<button type=\"submit\">Submit answers</button>\n</form>\n");
    body.push_str(&format!(
        "<p><a href=\"/lesson/{lesson_id}\">Back to the lesson</a></p>\n"
    ));

    layout("Quiz", &body)
}
