//! Operator CLI for the Bland API
//!
//! Runs the client operations that the web service does not expose: creating
//! a web agent and starting a conversation. Results are printed as JSON on
//! stdout; logs go to stderr.

use anyhow::{Context, Result};
use bland_api::{config::Config, state::build_client};
use bland_core::{AgentApi, AgentId};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "bland", version, about = "Manage Bland AI web agents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a web agent from the configured agent payload.
    CreateAgent,
    /// Fetch a session token for an agent.
    Token {
        /// Agent to authorize. Defaults to BLAND_AGENT_ID.
        #[arg(long)]
        agent_id: Option<String>,
    },
    /// Start a conversation with the default agent (BLAND_AGENT_ID).
    StartConversation,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let client = build_client(&config).context("Failed to initialize Bland client")?;

    match cli.command {
        Command::CreateAgent => {
            let record = client.create_web_agent().await?;
            print_json(&record)?;
        }
        Command::Token { agent_id } => {
            let agent_id = match agent_id {
                Some(raw) => AgentId::parse(&raw)?,
                None => config
                    .default_agent_id
                    .clone()
                    .context("Pass --agent-id or set BLAND_AGENT_ID")?,
            };
            let session = client.get_session_token(&agent_id).await?;
            print_json(&session)?;
        }
        Command::StartConversation => {
            let conversation = client.start_conversation().await?;
            print_json(&conversation)?;
        }
    }
    Ok(())
}
