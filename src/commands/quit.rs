use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};
use crate::locale::Locale;

/// Ends the session. The REPL prints the usage summary on the way out.
pub struct QuitCommand;

#[async_trait]
impl Command for QuitCommand {
    fn name(&self) -> &str {
        "/quit"
    }

    fn aliases(&self) -> &[&str] {
        &["/exit", "/ende", "quit", "exit"]
    }

    fn description(&self) -> &str {
        "end the session and show usage totals"
    }

    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult {
        // Only a bare trigger ends the session.
        if !args.is_empty() {
            let hint = match info.locale {
                Locale::English => "/quit takes no arguments",
                Locale::German => "/quit erwartet keine Argumente",
            };
            println!("  {hint}");
            return CommandResult::Handled;
        }
        CommandResult::Quit
    }
}
