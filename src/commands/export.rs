use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Local;

use super::{Command, CommandResult, SessionInfo};
use crate::export::write_export;

pub struct ExportCommand;

#[async_trait]
impl Command for ExportCommand {
    fn name(&self) -> &str {
        "/export"
    }

    fn usage(&self) -> &str {
        "[dir]"
    }

    fn description(&self) -> &str {
        "save the last output as a timestamped text file"
    }

    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult {
        let Some(text) = info.last_output else {
            eprintln!("  ✗ nothing to export yet");
            return CommandResult::Handled;
        };
        let dir = if args.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(args)
        };
        match write_export(&dir, text, Local::now()) {
            Ok(path) => println!("  ✓ saved to {}", path.display()),
            Err(e) => eprintln!("  ✗ {e}"),
        }
        CommandResult::Handled
    }
}
