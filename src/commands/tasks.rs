use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};
use crate::locale::Locale;
use crate::templates::TemplateRegistry;

pub struct TasksCommand;

/// One line per task: id, display name, and a marker on the current one.
pub fn task_listing(registry: &TemplateRegistry, locale: Locale, current: Option<&str>) -> String {
    let width = registry.tasks().map(|t| t.id.len()).max().unwrap_or(0);
    let mut out = String::new();
    for task in registry.tasks() {
        let name = task.display_name(locale).unwrap_or(&task.id);
        let marker = if Some(task.id.as_str()) == current {
            " ← current"
        } else {
            ""
        };
        out.push_str(&format!("  {:<width$}  {name}{marker}\n", task.id));
    }
    out
}

#[async_trait]
impl Command for TasksCommand {
    fn name(&self) -> &str {
        "/tasks"
    }

    fn description(&self) -> &str {
        "list available use cases"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        print!(
            "{}",
            task_listing(info.registry, info.locale, Some(info.task_id))
        );
        CommandResult::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_marks_current_and_localizes() {
        let registry = TemplateRegistry::builtin().unwrap();
        let text = task_listing(&registry, Locale::English, Some("runbook"));
        assert_eq!(text.lines().count(), registry.len());
        let line = text.lines().find(|l| l.contains("runbook")).unwrap();
        assert!(line.ends_with("← current"));

        let german = task_listing(&registry, Locale::German, None);
        let name = registry.display_name("runbook", Locale::German).unwrap();
        assert!(german.contains(name));
        assert!(!german.contains("current"));
    }
}
