//! HTML rendering for the task list page.
//!
//! The page template is embedded at compile time using `include_str!`;
//! the notice banner and task list are filled in per request.

use crate::types::Task;

/// The index page template.
pub const INDEX_TEMPLATE: &str = include_str!("templates/index.html");

/// Banner shown above the list after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The last change was dropped because storage was unreachable.
    Unavailable,
}

impl Notice {
    /// Value carried in the `error` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            Notice::Unavailable => "unavailable",
        }
    }

    pub fn from_query(s: &str) -> Option<Self> {
        match s {
            "unavailable" => Some(Notice::Unavailable),
            _ => None,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Notice::Unavailable => "The database is unavailable. Your last change was not saved.",
        }
    }
}

/// Render the full index page.
pub fn render_index(tasks: &[Task], notice: Option<Notice>) -> String {
    let notice_html = notice
        .map(|n| format!(r#"<div class="message-error">{}</div>"#, n.message()))
        .unwrap_or_default();

    INDEX_TEMPLATE
        .replace("{{notice}}", &notice_html)
        .replace("{{tasks}}", &render_task_list(tasks))
}

/// Render the task list fragment.
pub fn render_task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return r#"<div class="empty-state">Nothing to do yet</div>"#.to_string();
    }

    let mut html = String::from(r#"<ul class="tasks">"#);

    for task in tasks {
        let (class, complete_link) = if task.completed {
            ("completed", String::new())
        } else {
            ("", format!(r#"<a href="/complete/{}">Complete</a>"#, task.id))
        };

        html.push_str(&format!(
            r#"<li class="{class}"><span class="text">{text}</span><span class="actions">{complete_link}<a href="/delete/{id}">Delete</a></span></li>"#,
            class = class,
            text = html_escape(&task.task),
            complete_link = complete_link,
            id = task.id,
        ));
    }

    html.push_str("</ul>");
    html
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
