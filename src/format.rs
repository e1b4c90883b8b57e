//! Output formatting for the `list` command.

use crate::types::Task;
use anyhow::Result;
use clap::ValueEnum;

/// Output format for task listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    Json,
    #[default]
    Markdown,
}

/// Format a single task as a markdown checklist line.
pub fn format_task_markdown(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    format!("- [{}] `{}` {}\n", mark, task.id, task.task)
}

/// Format a list of tasks as markdown.
pub fn format_tasks_markdown(tasks: &[Task]) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Tasks ({})\n\n", tasks.len()));

    if tasks.is_empty() {
        md.push_str("_No tasks._\n");
        return md;
    }

    for task in tasks {
        md.push_str(&format_task_markdown(task));
    }

    md
}

/// Format tasks in the requested output format.
pub fn format_tasks(tasks: &[Task], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(tasks)?),
        OutputFormat::Markdown => Ok(format_tasks_markdown(tasks)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, text: &str, completed: bool) -> Task {
        Task {
            id,
            task: text.to_string(),
            completed,
        }
    }

    #[test]
    fn markdown_marks_completed_tasks() {
        let md = format_tasks_markdown(&[task(2, "Walk dog", false), task(1, "Buy milk", true)]);
        assert!(md.starts_with("# Tasks (2)"));
        assert!(md.contains("- [ ] `2` Walk dog"));
        assert!(md.contains("- [x] `1` Buy milk"));
    }

    #[test]
    fn markdown_handles_empty_list() {
        let md = format_tasks_markdown(&[]);
        assert!(md.contains("No tasks"));
    }

    #[test]
    fn json_is_an_array() {
        let out = format_tasks(&[task(1, "Buy milk", false)], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["task"], "Buy milk");
    }
}
