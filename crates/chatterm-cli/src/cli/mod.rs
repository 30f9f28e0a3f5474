//! Command-line definitions and startup for the `chatterm` binary.
//!
//! Uses clap derive macros for argument parsing. There are no subcommands:
//! the binary starts an interactive session unless `--list-models` asks
//! for a one-shot listing.

pub mod chat;
pub mod context;
pub mod models;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use console::style;

use chatterm_core::config::{ConfigInputs, FlagValues, resolve_session_config};
use chatterm_core::session::ChatSession;
use chatterm_infra::config::{config_path, load_file_config, resolve_home_dir};
use chatterm_infra::credential::env_values;
use chatterm_infra::gateway::OpenAiCompatGateway;

use self::chat::banner::{print_seed_note, print_welcome_banner};
use self::chat::input::TerminalInput;
use self::chat::renderer::ChatRenderer;
use self::chat::spinner::Spinner;
use self::chat::view::TerminalView;
use self::context::{SeedOutcome, SeedRequest};

/// Chat with OpenAI-compatible models from the terminal.
#[derive(Parser, Debug)]
#[command(name = "chatterm", version, about, long_about = None)]
pub struct Cli {
    /// Prompt for the API key (input is hidden).
    #[arg(long)]
    pub api_key_prompt: bool,

    /// Model to use for the conversation.
    #[arg(short, long)]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible API.
    #[arg(long)]
    pub base_url: Option<String>,

    /// System prompt placed before the conversation.
    #[arg(long = "system")]
    pub system_prompt: Option<String>,

    /// Sampling temperature.
    #[arg(long)]
    pub temperature: Option<f32>,

    /// List the models the endpoint offers and exit.
    #[arg(short, long)]
    pub list_models: bool,

    /// Learn about a program using its man page.
    #[arg(short, long, value_name = "NAME", conflicts_with = "code_helper")]
    pub software: Option<String>,

    /// Get help with the code in a file.
    #[arg(short, long, value_name = "FILE")]
    pub code_helper: Option<PathBuf>,

    /// Suppress all log output except errors.
    #[arg(long)]
    pub quiet: bool,

    /// Detailed logs (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    fn seed_request(&self) -> Option<SeedRequest> {
        if let Some(program) = &self.software {
            return Some(SeedRequest::Software(program.clone()));
        }
        self.code_helper.clone().map(SeedRequest::File)
    }
}

/// Resolve configuration, then run the listing or the interactive session.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    if cfg!(windows) && cli.software.is_some() {
        anyhow::bail!("the man page functionality is not available on Windows");
    }

    let home_dir = resolve_home_dir();
    let file = load_file_config(&home_dir).await;

    let api_key = if cli.api_key_prompt {
        Some(prompt_api_key()?)
    } else {
        None
    };

    let config = resolve_session_config(ConfigInputs {
        flags: FlagValues {
            api_key,
            base_url: cli.base_url.clone(),
            model: cli.model.clone(),
            temperature: cli.temperature,
            system_prompt: cli.system_prompt.clone(),
        },
        env: env_values(),
        file,
        config_path: config_path(&home_dir).display().to_string(),
    })?;
    tracing::info!(base_url = %config.base_url, model = %config.model, "configuration resolved");

    let gateway = OpenAiCompatGateway::new(&config).context("failed to set up the API client")?;

    if cli.list_models {
        return models::print_models(&gateway).await;
    }

    chat::prepare_terminal();

    let seed = match cli.seed_request() {
        Some(request) => Some(context::gather(&request).await),
        None => None,
    };

    let renderer = ChatRenderer::new();
    let mut view = TerminalView::stdout(renderer);
    let mut session = ChatSession::new(gateway, &config);

    match seed {
        Some(SeedOutcome::Seeded { text, note }) => {
            print_seed_note(&note);
            session = session.with_seed(text);
        }
        Some(SeedOutcome::Failed { note }) => {
            view.show_note(&note);
            session.set_last_reply(note);
        }
        None => print_welcome_banner(&config.model, &config.base_url),
    }

    let mut input = TerminalInput::new();
    session.run(&mut input, &mut view, &Spinner).await;

    Ok(())
}

fn prompt_api_key() -> anyhow::Result<String> {
    let key = dialoguer::Password::new()
        .with_prompt("Please enter your API key")
        .interact()
        .context("failed to read the API key")?;
    println!(
        "  {}",
        style(
            "The key is only kept for this session. Set CHATTERM_API_KEY or add api_key to config.toml to skip this prompt."
        )
        .dim()
    );
    Ok(key)
}
