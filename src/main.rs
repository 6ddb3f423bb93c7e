//! openai - A command line interface for the OpenAI API.
//!
//! Three stateless commands: `chat` sends a conversation to the chat
//! completions endpoint, `moderations` classifies text against the
//! usage policies, and `tokenize` encodes text locally with the
//! cl100k_base vocabulary. Every run assembles its input, invokes one
//! operation, renders the outcome to stdout, and exits.

mod api;
mod config;
mod error;
mod input;
mod render;
mod spinner;
mod style;

use anyhow::{Context, Result};
use api::{Invoker, Outcome};
use clap::{Parser, Subcommand};
use config::Config;
use render::RenderOptions;
use spinner::Spinner;
use std::path::PathBuf;
use std::process::Command as ProcessCommand;
use style::Style;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "openai")]
#[command(author, version, about = "A command line interface for the OpenAI API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send a conversation to the chat completions endpoint
    Chat {
        /// Single user prompt for simple instructions
        #[arg(short, long)]
        prompt: Option<String>,

        /// Path to a JSON file with message input
        #[arg(short, long, value_name = "PATH")]
        messages: Option<PathBuf>,

        /// Output the full response as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Check whether text violates the usage policies
    Moderations {
        /// Single user prompt for simple instructions
        #[arg(short, long)]
        prompt: Option<String>,

        /// Output the full response as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Tokenize text with the cl100k_base vocabulary
    Tokenize {
        /// Single user prompt for simple instructions
        #[arg(short, long)]
        prompt: Option<String>,

        /// Path to a JSON file with message input
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Output just the token count
        #[arg(short, long)]
        count: bool,
    },
    /// Open configuration file in $EDITOR
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            prompt,
            messages,
            json,
        } => handle_chat(prompt, messages, json).await,
        Commands::Moderations { prompt, json } => handle_moderations(prompt, json).await,
        Commands::Tokenize { prompt, file, count } => handle_tokenize(prompt, file, count).await,
        Commands::Config => handle_config(),
    }
}

/// Handle the chat command.
async fn handle_chat(prompt: Option<String>, messages: Option<PathBuf>, json: bool) -> Result<()> {
    let config = Config::load()?;
    let conversation = input::assemble(messages.as_deref(), prompt.as_deref())?;

    // TODO: write the assistant reply back to the messages file so
    // repeated runs with --messages read like a conversation.
    let invoker = Invoker::chat(config.api_key());
    let outcome = invoke_with_spinner(&invoker, conversation).await?;

    print_outcome(&outcome, RenderOptions { json, count_only: false })
}

/// Handle the moderations command.
async fn handle_moderations(prompt: Option<String>, json: bool) -> Result<()> {
    let config = Config::load()?;
    let conversation = input::assemble(None, prompt.as_deref())?;

    let invoker = Invoker::moderate(config.api_key());
    let outcome = invoke_with_spinner(&invoker, conversation).await?;

    print_outcome(&outcome, RenderOptions { json, count_only: false })
}

/// Handle the tokenize command. Runs locally and needs no key.
async fn handle_tokenize(prompt: Option<String>, file: Option<PathBuf>, count: bool) -> Result<()> {
    let conversation = input::assemble(file.as_deref(), prompt.as_deref())?;

    let invoker = Invoker::tokenize();
    let outcome = invoke_with_spinner(&invoker, conversation).await?;

    print_outcome(&outcome, RenderOptions { json: false, count_only: count })
}

/// Handle the config command.
fn handle_config() -> Result<()> {
    let config_path = Config::config_path()?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Create default config if it doesn't exist
    if !config_path.exists() {
        let default_config = Config::default();
        default_config.save()?;
        println!("Created default config at {}", config_path.display());
    }

    // Open in editor
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = ProcessCommand::new(&editor)
        .arg(&config_path)
        .status()
        .context("Failed to open editor")?;

    if !status.success() {
        eprintln!("Editor exited with non-zero status");
    }

    Ok(())
}

/// Run the invocation with the progress indicator around it. The
/// indicator draws to stderr, so stdout stays clean for the result.
async fn invoke_with_spinner(
    invoker: &Invoker,
    messages: Vec<input::Message>,
) -> Result<Outcome, error::Error> {
    let spinner = Spinner::start(invoker.describe());
    let outcome = invoker.invoke(messages).await;
    spinner.finish();
    outcome
}

/// Render the outcome and write it to stdout in one shot.
fn print_outcome(outcome: &Outcome, opts: RenderOptions) -> Result<()> {
    let style = Style::detect();
    let rendered = render::render(outcome, opts, &style)?;
    print!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_parse_chat_short_flags() {
        let cli = Cli::try_parse_from(["openai", "chat", "-p", "hello", "-j"]).unwrap();
        match cli.command {
            Commands::Chat { prompt, messages, json } => {
                assert_eq!(prompt.as_deref(), Some("hello"));
                assert!(messages.is_none());
                assert!(json);
            }
            _ => panic!("expected the chat subcommand"),
        }
    }

    #[test]
    fn test_parse_chat_long_flags() {
        let cli = Cli::try_parse_from([
            "openai", "chat", "--prompt", "hello", "--messages", "chat.json", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Chat { prompt, messages, json } => {
                assert_eq!(prompt.as_deref(), Some("hello"));
                assert_eq!(messages, Some(PathBuf::from("chat.json")));
                assert!(json);
            }
            _ => panic!("expected the chat subcommand"),
        }
    }

    #[test]
    fn test_parse_chat_every_flag_is_optional() {
        let cli = Cli::try_parse_from(["openai", "chat"]).unwrap();
        match cli.command {
            Commands::Chat { prompt, messages, json } => {
                assert!(prompt.is_none());
                assert!(messages.is_none());
                assert!(!json);
            }
            _ => panic!("expected the chat subcommand"),
        }
    }

    #[test]
    fn test_parse_moderations_flags() {
        let cli = Cli::try_parse_from(["openai", "moderations", "-p", "some text", "-j"]).unwrap();
        match cli.command {
            Commands::Moderations { prompt, json } => {
                assert_eq!(prompt.as_deref(), Some("some text"));
                assert!(json);
            }
            _ => panic!("expected the moderations subcommand"),
        }
    }

    #[test]
    fn test_parse_tokenize_flags() {
        let cli = Cli::try_parse_from(["openai", "tokenize", "-f", "notes.json", "-c"]).unwrap();
        match cli.command {
            Commands::Tokenize { prompt, file, count } => {
                assert!(prompt.is_none());
                assert_eq!(file, Some(PathBuf::from("notes.json")));
                assert!(count);
            }
            _ => panic!("expected the tokenize subcommand"),
        }
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = Cli::try_parse_from(["openai", "chat", "--model", "gpt-4"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_tokenize_has_no_json_flag() {
        let err = Cli::try_parse_from(["openai", "tokenize", "--json"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_a_subcommand_is_required() {
        assert!(Cli::try_parse_from(["openai"]).is_err());
    }
}
