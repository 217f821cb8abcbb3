use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};
use crate::banner::usage_line;

pub struct TokensCommand;

#[async_trait]
impl Command for TokensCommand {
    fn name(&self) -> &str {
        "/tokens"
    }

    fn description(&self) -> &str {
        "show session token and request counts"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        match &info.usage {
            Ok(totals) => println!("  {}", usage_line(*totals, info.locale)),
            Err(e) => eprintln!("  ✗ {}", e.report().message),
        }
        CommandResult::Handled
    }
}
