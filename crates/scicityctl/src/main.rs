//! Scicity Control - CLI client for the Science City guide daemon
//!
//! One-shot questions, planning kickoff, session reset, daemon status,
//! and an interactive chat loop.

mod client;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client::GuideClient;
use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};
use uuid::Uuid;

const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

#[derive(Parser)]
#[command(name = "scicityctl")]
#[command(about = "Science City Kolkata guide - ask, plan, and inspect", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of the guide daemon (SCICITY_SERVER env is honored)
    #[arg(long)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single question
    Ask {
        /// The question text
        question: Vec<String>,
    },

    /// Start the visit-planning dialogue
    Plan,

    /// Reset the conversation
    Reset,

    /// Show daemon and credential status
    Status,

    /// Interactive chat session (type "quit" to leave)
    Chat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let server = cli
        .server
        .or_else(|| std::env::var("SCICITY_SERVER").ok())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());
    let client = GuideClient::new(server);

    match cli.command {
        Commands::Ask { question } => {
            let question = question.join(" ");
            let response = client.ask(&question, None).await?;
            println!("{}", response.answer);
        }
        Commands::Plan => {
            let response = client.plan_trip(None).await?;
            println!("{}", response.answer);
            println!();
            println!(
                "{} scicityctl chat",
                "Continue the dialogue with:".dimmed()
            );
        }
        Commands::Reset => {
            let response = client.reset(None).await?;
            println!("Session {} -> {}", response.session_id, response.status.green());
        }
        Commands::Status => {
            let status = client.status().await?;
            println!("{}", "Science City guide daemon".bold());
            println!("  status:          {}", status.status.green());
            println!("  version:         {}", status.version);
            println!("  uptime:          {}s", status.uptime_seconds);
            println!("  active sessions: {}", status.active_sessions);
            println!(
                "  credentials:     {} (active index {})",
                status.total_keys, status.current_key_index
            );
            for key in &status.keys {
                println!(
                    "    key {}: {} requests, {} errors",
                    key.index, key.usage, key.errors
                );
            }
        }
        Commands::Chat => {
            chat(&client).await?;
        }
    }

    Ok(())
}

/// Interactive loop holding one session token across turns.
async fn chat(client: &GuideClient) -> Result<()> {
    let mut session_id: Option<Uuid> = None;
    let stdin = io::stdin();

    println!("{}", "Connected. Type your question, or \"quit\" to leave.".dimmed());
    loop {
        print!("{} ", "you>".cyan());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            break;
        }

        let response = client.ask(input, session_id).await?;
        session_id = Some(response.session_id);
        println!("{} {}", "guide>".green(), response.answer);
    }

    Ok(())
}
