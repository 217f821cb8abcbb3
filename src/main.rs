use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use storage_copilot::assistant::{Assistant, Generation, GenerationInput, Limits};
use storage_copilot::banner::{
    BannerInfo, disclaimer, print_banner, print_session_summary, result_caption, usage_line,
};
use storage_copilot::commands::{
    CommandRegistry, CommandResult, SessionInfo, StateChange, task_listing,
};
use storage_copilot::completion::openai::OpenAiProvider;
use storage_copilot::completion::{CompletionClient, UsageCounter};
use storage_copilot::config::Settings;
use storage_copilot::error::AssistError;
use storage_copilot::export::write_export;
use storage_copilot::locale::{Locale, Vendor};
use storage_copilot::request::{DEFAULT_TEMPERATURE, DEFAULT_TOP_P, char_counter};
use storage_copilot::templates::TemplateRegistry;

#[derive(Parser)]
#[command(
    name = "storage-copilot",
    version,
    about = "Advisory AI assistant for storage engineering teams."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Storage vendor (name or alias: netapp, pure, powermax)
    #[arg(long, default_value = "netapp")]
    vendor: Vendor,

    /// Use case id or display name
    #[arg(short, long, default_value = "explain-issue")]
    task: String,

    /// Response language (en, de)
    #[arg(short, long, default_value = "en")]
    lang: Locale,

    /// Run once with this input and exit (input is read from stdin when piped)
    #[arg(short, long)]
    input: Option<String>,

    /// Model name (overrides COPILOT_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// HTTP timeout in seconds (overrides COPILOT_TIMEOUT_SECS)
    #[arg(long)]
    timeout: Option<u64>,

    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f32,

    #[arg(long, default_value_t = DEFAULT_TOP_P)]
    top_p: f32,

    /// Output token cap for each completion (defaults to the configured maximum)
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Print the result (or error) as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Also write the output to a timestamped file in this directory
    #[arg(long)]
    export: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List use cases in the selected language
    Tasks,
    /// List supported storage vendors
    Vendors,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let registry = Arc::new(TemplateRegistry::builtin()?);

    if let Some(command) = &cli.command {
        match command {
            Command::Tasks => print!("{}", task_listing(&registry, cli.lang, None)),
            Command::Vendors => {
                for vendor in Vendor::ALL {
                    println!("  {vendor}");
                }
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let task_id = registry
        .find(&cli.task, cli.lang)
        .map_err(|e| anyhow::anyhow!("{e} (run `storage-copilot tasks` to list use cases)"))?
        .id
        .clone();

    let mut settings = Settings::from_env()?;
    if let Some(model) = &cli.model {
        settings.model = model.clone();
    }
    if let Some(secs) = cli.timeout {
        anyhow::ensure!(secs > 0, "--timeout must be positive");
        settings.timeout = Duration::from_secs(secs);
    }
    tracing::debug!(?settings, "loaded settings");

    let provider = Arc::new(
        OpenAiProvider::new(settings.api_key.as_str(), &settings.base_url, settings.timeout)
            .context("failed to build HTTP client")?,
    );
    let usage = Arc::new(UsageCounter::new());
    let client = CompletionClient::new(provider, settings.model.as_str(), usage);
    let assistant = Assistant::new(
        Arc::clone(&registry),
        client,
        Limits {
            max_input_chars: settings.max_input_chars,
            max_output_tokens: settings.max_output_tokens,
        },
    );

    // Single run mode
    if let Some(text) = &cli.input {
        return run_once(&cli, &assistant, &task_id, text.clone()).await;
    }
    if !io::stdin().is_terminal() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read input from stdin")?;
        return run_once(&cli, &assistant, &task_id, text).await;
    }

    repl(&cli, &assistant, task_id).await?;
    Ok(ExitCode::SUCCESS)
}

fn generation_input(
    cli: &Cli,
    vendor: Vendor,
    task_id: &str,
    locale: Locale,
    text: String,
) -> GenerationInput {
    GenerationInput {
        vendor,
        task_id: task_id.to_string(),
        user_text: text,
        locale,
        temperature: cli.temperature,
        top_p: cli.top_p,
        max_output_tokens: cli.max_tokens,
    }
}

async fn run_once(
    cli: &Cli,
    assistant: &Assistant,
    task_id: &str,
    text: String,
) -> anyhow::Result<ExitCode> {
    let input = generation_input(cli, cli.vendor, task_id, cli.lang, text);
    let outcome = assistant.generate(&input).await;

    if cli.json {
        let json = match &outcome {
            Ok(generation) => serde_json::to_string_pretty(generation)?,
            Err(e) => serde_json::to_string_pretty(&e.report(cli.lang))?,
        };
        println!("{json}");
    }

    match outcome {
        Ok(generation) => {
            if !cli.json {
                print_generation(&generation, cli.lang);
                if let Ok(totals) = assistant.usage().snapshot() {
                    eprintln!("{}", usage_line(totals, cli.lang));
                }
                eprintln!("{}", disclaimer(cli.lang));
            }
            if let Some(dir) = &cli.export {
                let path = write_export(dir, &generation.text, Local::now())?;
                eprintln!("saved to {}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            if !cli.json {
                eprintln!("error: {}", e.user_message(cli.lang));
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_generation(generation: &Generation, locale: Locale) {
    println!("{}", generation.rendered());
    eprintln!(
        "{}",
        result_caption(&generation.model, generation.usage.total_tokens, locale)
    );
    if let Some(notice) = &generation.accounting {
        eprintln!("warning: {}", notice.message);
    }
}

fn print_error(e: &AssistError, locale: Locale) {
    eprintln!("\nerror: {}", e.user_message(locale));
}

async fn repl(cli: &Cli, assistant: &Assistant, task_id: String) -> anyhow::Result<()> {
    let mut vendor = cli.vendor;
    let mut task_id = task_id;
    let mut locale = cli.lang;
    let mut last_output: Option<String> = None;
    let commands = CommandRegistry::new();

    print_banner(&BannerInfo {
        model: assistant.model(),
        vendors: Vendor::ALL.len(),
        tasks: assistant.registry().len(),
        max_input_chars: assistant.limits().max_input_chars,
        max_output_tokens: assistant.limits().max_output_tokens,
        locale,
    });
    println!("   type /help for commands, /quit to exit");

    // Async stdin so Ctrl+C is caught at the prompt too
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\n{vendor} · {task_id}> ");
        io::stdout().flush()?;

        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let info = SessionInfo {
            registry: assistant.registry(),
            vendor,
            task_id: &task_id,
            locale,
            model: assistant.model(),
            usage: assistant.usage().snapshot(),
            last_output: last_output.as_deref(),
        };
        match commands.dispatch(&line, &info).await {
            CommandResult::Handled => continue,
            CommandResult::Quit => break,
            CommandResult::StateChanged(change) => {
                match change {
                    StateChange::Vendor(v) => vendor = v,
                    StateChange::Task(id) => task_id = id,
                    StateChange::Locale(l) => locale = l,
                }
                continue;
            }
            CommandResult::NotACommand => {}
        }

        let max = assistant.limits().max_input_chars;
        println!("  {}", char_counter(&line, max, locale));
        let input = generation_input(cli, vendor, &task_id, locale, line);

        // Ctrl+C during generation cancels the request, not the REPL
        tokio::select! {
            result = assistant.generate(&input) => {
                match result {
                    Ok(generation) => {
                        println!();
                        print_generation(&generation, locale);
                        last_output = Some(generation.text);
                    }
                    Err(e) => print_error(&e, locale),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!("\n\ninterrupted");
            }
        }
    }

    print_session_summary(assistant.usage().snapshot().ok(), locale);
    Ok(())
}
