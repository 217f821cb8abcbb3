use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo, StateChange};
use crate::locale::Locale;

pub struct LangCommand;

#[async_trait]
impl Command for LangCommand {
    fn name(&self) -> &str {
        "/lang"
    }

    fn usage(&self) -> &str {
        "<en|de>"
    }

    fn description(&self) -> &str {
        "show or switch the response language"
    }

    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult {
        if args.is_empty() {
            for locale in Locale::ALL {
                let marker = if locale == info.locale { " ← current" } else { "" };
                println!("  {locale}{marker}");
            }
            return CommandResult::Handled;
        }

        match args.parse::<Locale>() {
            Ok(locale) if locale == info.locale => CommandResult::Handled,
            Ok(locale) => {
                println!("  ✓ language set to {locale}");
                CommandResult::StateChanged(StateChange::Locale(locale))
            }
            Err(e) => {
                eprintln!("  ✗ {e}");
                CommandResult::Handled
            }
        }
    }
}
