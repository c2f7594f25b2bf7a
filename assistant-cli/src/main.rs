mod stdio;

use assistant_core::agent::AgentOptions;
use assistant_core::constants::{CONFIG_DIR, IMAGES_DIR};
use assistant_core::session::new_session_id;
use assistant_core::{Assistant, AssistantConfig, GeminiSettings};
use clap::{Parser, ValueEnum};
use serde_json::json;
use std::error::Error;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(
    name = "assistant",
    version,
    about = "AI assistant with search, summarization and image generation agents"
)]
struct Cli {
    /// Directory holding root.yaml, search.yaml, summarization.yaml and image.yaml
    #[arg(long, default_value = CONFIG_DIR)]
    config_dir: PathBuf,
    /// Where generated images are written
    #[arg(long, default_value = IMAGES_DIR)]
    images_dir: PathBuf,
    #[arg(long)]
    session: Option<String>,
    #[arg(long)]
    prompt_file: Option<PathBuf>,
    /// File to upload into the session; the summarization agent loads it with load_file
    #[arg(long)]
    document: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = RunMode::Once)]
    mode: RunMode,
    /// Disable logging output
    #[arg(long)]
    quiet: bool,
    prompt: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RunMode {
    Once,
    Stdio,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);
    info!("Starting assistant");
    debug!(?cli.mode, config_dir = %cli.config_dir.display(), session = ?cli.session, "CLI arguments parsed");

    let config = AssistantConfig::load(&cli.config_dir).map_err(|err| {
        warn!(error = %err, "Failed to load agent configuration");
        err.user_message()
    })?;
    let settings = GeminiSettings::from_env();
    let assistant = Assistant::from_gemini(&config, &settings, cli.images_dir.clone());

    let session_id = cli.session.clone().unwrap_or_else(new_session_id);
    if let Some(document) = &cli.document {
        assistant.attach_document(&session_id, document).await;
    }

    info!(mode = ?cli.mode, "Running assistant in selected mode");
    match cli.mode {
        RunMode::Once => {
            let prompt = load_prompt(&cli)?;
            let options = AgentOptions::default().with_session(session_id);
            let outcome = assistant
                .run(prompt, options)
                .await
                .map_err(|err| err.user_message())?;

            let output = json!({
                "session_id": outcome.session_id,
                "agent": outcome.agent,
                "response": outcome.response,
                "tool_steps": outcome.steps,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        RunMode::Stdio => {
            info!("Entering STDIO mode; awaiting line input");
            stdio::run(&assistant, session_id).await?;
        }
    }
    info!("Assistant finished");
    Ok(())
}

fn init_tracing(quiet: bool) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = if quiet {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        };
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .with_writer(io::stderr)
            .init();
    });
}

fn load_prompt(cli: &Cli) -> Result<String, Box<dyn Error>> {
    if let Some(path) = &cli.prompt_file {
        info!(path = %path.display(), "Loading prompt from file");
        let content = fs::read_to_string(path)?;
        return non_empty(content);
    }

    if !cli.prompt.is_empty() {
        info!("Using prompt provided through CLI arguments");
        return non_empty(cli.prompt.join(" "));
    }

    if !io::stdin().is_terminal() {
        info!("Reading prompt from standard input");
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return non_empty(buffer);
    }

    warn!("Prompt not provided via arguments, file, or stdin");
    Err("prompt required via arguments, file, or stdin".into())
}

fn non_empty(prompt: String) -> Result<String, Box<dyn Error>> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err("prompt cannot be empty".into());
    }
    Ok(prompt.to_string())
}
