use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo, StateChange};

pub struct TaskCommand;

#[async_trait]
impl Command for TaskCommand {
    fn name(&self) -> &str {
        "/task"
    }

    fn usage(&self) -> &str {
        "<id|name>"
    }

    fn description(&self) -> &str {
        "switch the use case by id or display name"
    }

    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult {
        if args.is_empty() {
            let name = info
                .registry
                .display_name(info.task_id, info.locale)
                .unwrap_or(info.task_id);
            println!("  current use case: {name} ({})", info.task_id);
            return CommandResult::Handled;
        }

        match info.registry.find(args, info.locale) {
            Ok(task) if task.id == info.task_id => {
                println!("  already on {}", task.id);
                CommandResult::Handled
            }
            Ok(task) => {
                let name = task.display_name(info.locale).unwrap_or(&task.id);
                println!("  ✓ use case set to {name}");
                CommandResult::StateChanged(StateChange::Task(task.id.clone()))
            }
            Err(e) => {
                eprintln!("  ✗ {e}");
                eprintln!("  type /tasks to list use cases");
                CommandResult::Handled
            }
        }
    }
}
