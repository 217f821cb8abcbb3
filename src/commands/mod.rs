//! Built-in REPL commands prefixed with `/`.
//!
//! Commands implement the [`Command`] trait and are registered in a
//! [`CommandRegistry`]. The registry handles dispatch, alias resolution,
//! and dynamic help generation. Anything after the command name is passed
//! through as its argument string.

mod export;
mod help;
mod lang;
mod quit;
mod task;
mod tasks;
mod tokens;
mod vendor;

use async_trait::async_trait;
use std::sync::Arc;

use crate::completion::UsageTotals;
use crate::error::AccountingFailure;
use crate::locale::{Locale, Vendor};
use crate::templates::TemplateRegistry;

pub use tasks::task_listing;

/// Session state available to commands during execution.
pub struct SessionInfo<'a> {
    pub registry: &'a TemplateRegistry,
    pub vendor: Vendor,
    pub task_id: &'a str,
    pub locale: Locale,
    pub model: &'a str,
    pub usage: Result<UsageTotals, AccountingFailure>,
    /// Last generated text, if any.
    pub last_output: Option<&'a str>,
}

/// A selection the REPL needs to apply after a command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    Vendor(Vendor),
    Task(String),
    Locale(Locale),
}

/// What the REPL should do after a command runs.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Not a command, submit the line as input.
    NotACommand,
    /// Command handled, continue the REPL loop.
    Handled,
    /// Command produced a state change the REPL must apply.
    StateChanged(StateChange),
    /// Exit the REPL.
    Quit,
}

/// A REPL command. Implement this trait to add new commands.
#[async_trait]
pub trait Command: Send + Sync {
    /// Primary name, e.g. `"/tasks"`.
    fn name(&self) -> &str;

    /// Alternative names, e.g. `&["/h", "/?"]`.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Argument hint for `/help`, e.g. `"<name>"`.
    fn usage(&self) -> &str {
        ""
    }

    /// One-line description for `/help`.
    fn description(&self) -> &str;

    /// Run the command. `args` is the trimmed text after the name.
    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult;
}

/// Holds registered commands.
pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create a registry with all built-in commands.
    pub fn new() -> Self {
        let commands: Vec<Arc<dyn Command>> = vec![
            Arc::new(help::HelpCommand),
            Arc::new(tasks::TasksCommand),
            Arc::new(vendor::VendorCommand),
            Arc::new(task::TaskCommand),
            Arc::new(lang::LangCommand),
            Arc::new(tokens::TokensCommand),
            Arc::new(export::ExportCommand),
            Arc::new(quit::QuitCommand),
        ];
        Self { commands }
    }

    pub fn register(&mut self, command: Arc<dyn Command>) {
        self.commands.push(command);
    }

    /// Dispatch input to a matching command, or return `NotACommand`.
    pub async fn dispatch(&self, input: &str, info: &SessionInfo<'_>) -> CommandResult {
        let line = input.trim();
        let (cmd, args) = match line.split_once(char::is_whitespace) {
            Some((cmd, args)) => (cmd, args.trim()),
            None => (line, ""),
        };
        // Bare aliases like `quit` only count on a line of their own.
        if !cmd.starts_with('/') && !args.is_empty() {
            return CommandResult::NotACommand;
        }

        for command in &self.commands {
            if cmd == command.name() || command.aliases().contains(&cmd) {
                // /help needs the registry to list all commands
                if command.name() == "/help" {
                    print!("{}", self.help_text());
                    return CommandResult::Handled;
                }
                return command.execute(args, info).await;
            }
        }

        if cmd.starts_with('/') {
            println!("unknown command: {cmd}");
            println!("type /help for available commands");
            return CommandResult::Handled;
        }

        CommandResult::NotACommand
    }

    /// Generate help text from all registered commands.
    pub fn help_text(&self) -> String {
        let entries: Vec<(String, &str)> = self
            .commands
            .iter()
            .map(|c| (format_label(c.name(), c.usage(), c.aliases()), c.description()))
            .collect();

        let max_width = entries
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(10);

        let mut out = String::new();
        for (label, desc) in &entries {
            out.push_str(&format!("  {label:<max_width$}  {desc}\n"));
        }
        out
    }

    /// All registered command names (for testing).
    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// All registered names and aliases (for duplicate detection).
    pub fn all_triggers(&self) -> Vec<&str> {
        let mut triggers = Vec::new();
        for cmd in &self.commands {
            triggers.push(cmd.name());
            triggers.extend_from_slice(cmd.aliases());
        }
        triggers
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn format_label(name: &str, usage: &str, aliases: &[&str]) -> String {
    let head = if usage.is_empty() {
        name.to_string()
    } else {
        format!("{name} {usage}")
    };
    if aliases.is_empty() {
        head
    } else {
        format!("{} ({})", head, aliases.join(", "))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::LazyLock;

    static REGISTRY: LazyLock<TemplateRegistry> = LazyLock::new(|| TemplateRegistry::builtin().unwrap());

    pub(crate) fn test_info() -> SessionInfo<'static> {
        SessionInfo {
            registry: &REGISTRY,
            vendor: Vendor::NetAppOntap,
            task_id: "explain-issue",
            locale: Locale::English,
            model: "gpt-4o-mini",
            usage: Ok(UsageTotals::default()),
            last_output: None,
        }
    }

    #[test]
    fn all_builtins_registered() {
        let reg = CommandRegistry::new();
        let names = reg.names();
        for name in [
            "/help", "/tasks", "/vendor", "/task", "/lang", "/tokens", "/export", "/quit",
        ] {
            assert!(names.contains(&name), "missing {name}");
        }
    }

    #[test]
    fn no_duplicate_triggers() {
        let reg = CommandRegistry::new();
        let triggers = reg.all_triggers();
        let mut seen = Vec::new();
        for t in &triggers {
            assert!(!seen.contains(t), "duplicate trigger: {t}");
            seen.push(t);
        }
    }

    #[test]
    fn help_text_includes_all_commands() {
        let reg = CommandRegistry::new();
        let text = reg.help_text();
        for name in reg.names() {
            assert!(text.contains(name), "help missing: {name}");
        }
        assert!(text.contains("/vendor <name>"));
        assert!(text.contains("/?"));
    }

    #[tokio::test]
    async fn unknown_slash_command_is_handled() {
        let reg = CommandRegistry::new();
        assert_eq!(
            reg.dispatch("/foobar", &test_info()).await,
            CommandResult::Handled
        );
    }

    #[tokio::test]
    async fn non_command_passes_through() {
        let reg = CommandRegistry::new();
        assert_eq!(
            reg.dispatch("volume vol1 is offline", &test_info()).await,
            CommandResult::NotACommand
        );
        assert_eq!(
            reg.dispatch("exit code 5 from snapmirror update", &test_info()).await,
            CommandResult::NotACommand
        );
        assert_eq!(reg.dispatch("exit", &test_info()).await, CommandResult::Quit);
    }

    #[tokio::test]
    async fn args_are_split_from_name() {
        let reg = CommandRegistry::new();
        assert_eq!(
            reg.dispatch("  /vendor   pure  ", &test_info()).await,
            CommandResult::StateChanged(StateChange::Vendor(Vendor::PureFlashArray))
        );
    }

    #[tokio::test]
    async fn registered_command_works() {
        struct PingCommand;

        #[async_trait]
        impl Command for PingCommand {
            fn name(&self) -> &str {
                "/ping"
            }
            fn description(&self) -> &str {
                "pong"
            }
            async fn execute(&self, _args: &str, _info: &SessionInfo<'_>) -> CommandResult {
                CommandResult::Handled
            }
        }

        let mut reg = CommandRegistry::new();
        reg.register(Arc::new(PingCommand));
        assert_eq!(
            reg.dispatch("/ping", &test_info()).await,
            CommandResult::Handled
        );
    }

    #[test]
    fn format_label_variants() {
        assert_eq!(format_label("/tokens", "", &[]), "/tokens");
        assert_eq!(format_label("/help", "", &["/h", "/?"]), "/help (/h, /?)");
        assert_eq!(format_label("/export", "[dir]", &[]), "/export [dir]");
    }
}
