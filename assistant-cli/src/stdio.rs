use assistant_core::agent::{AgentOptions, AgentStep};
use assistant_core::session::new_session_id;
use assistant_core::Assistant;
use std::path::Path;
use thiserror::Error;
use tokio::io::{self, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

const HELP: &str = "Commands:\n  /upload <path>  attach a text file for summarization\n  /reset  start a new conversation\n  /steps  show the tool steps of the last answer\n  /help   show this message\n  /exit   quit\nAnything else is sent to the assistant.";

#[derive(Debug, Error)]
pub enum StdioError {
    #[error("stdin/stdout I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize tool steps: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Upload(&'a str),
    Reset,
    Steps,
    Help,
    Exit,
    Unknown(&'a str),
    Prompt(&'a str),
}

fn parse_line(line: &str) -> Option<Command<'_>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let command = match line {
        "/reset" => Command::Reset,
        "/steps" => Command::Steps,
        "/help" => Command::Help,
        "/exit" | "/quit" => Command::Exit,
        other if other == "/upload" || other.starts_with("/upload ") => {
            Command::Upload(other["/upload".len()..].trim())
        }
        other if other.starts_with('/') => Command::Unknown(other),
        prompt => Command::Prompt(prompt),
    };
    Some(command)
}

/// Interactive loop over stdin. All turns share one session until `/reset`.
pub async fn run(assistant: &Assistant, session_id: String) -> Result<(), StdioError> {
    let stdin = BufReader::new(io::stdin());
    let mut lines = stdin.lines();
    let mut stdout = io::stdout();
    let mut session_id = session_id;
    let mut last_steps: Vec<AgentStep> = Vec::new();

    write_line(&mut stdout, &format!("Session {session_id}. Type /help for commands.")).await?;

    while let Some(line) = lines.next_line().await? {
        let Some(command) = parse_line(&line) else {
            continue;
        };
        debug!(?command, "Received STDIO line");

        match command {
            Command::Exit => break,
            Command::Help => write_line(&mut stdout, HELP).await?,
            Command::Upload("") => write_line(&mut stdout, "Usage: /upload <path>").await?,
            Command::Upload(path) => {
                let path = Path::new(path);
                if path.is_file() {
                    assistant.attach_document(&session_id, path).await;
                    write_line(&mut stdout, &format!("Attached {}.", path.display())).await?;
                } else {
                    write_line(&mut stdout, &format!("No such file: {}", path.display())).await?;
                }
            }
            Command::Reset => {
                assistant.reset_session(&session_id).await;
                session_id = new_session_id();
                last_steps.clear();
                info!(session_id = session_id.as_str(), "Session reset");
                write_line(&mut stdout, &format!("Started session {session_id}.")).await?;
            }
            Command::Steps => {
                let rendered = serde_json::to_string_pretty(&last_steps)?;
                write_line(&mut stdout, &rendered).await?;
            }
            Command::Unknown(name) => {
                write_line(&mut stdout, &format!("Unknown command {name}. Type /help.")).await?;
            }
            Command::Prompt(prompt) => {
                let options = AgentOptions::default().with_session(session_id.clone());
                match assistant.run(prompt, options).await {
                    Ok(outcome) => {
                        last_steps = outcome.steps;
                        write_line(&mut stdout, &format!("[{}] {}", outcome.agent, outcome.response))
                            .await?;
                    }
                    Err(err) => {
                        error!(%err, "Agent processing failed via STDIO");
                        write_line(&mut stdout, &format!("error: {}", err.user_message())).await?;
                    }
                }
            }
        }
    }

    info!("STDIO loop finished");
    Ok(())
}

async fn write_line<W>(writer: &mut W, text: &str) -> Result<(), StdioError>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(text.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
