//! Line-oriented chat CLI over a single session.
//!
//! Reads user turns from stdin, runs each through the orchestration loop,
//! and prints the assistant's reply. A failed turn prints the error and
//! leaves the session open for a retry; EOF ends the chat.

use std::io::Write;

use concierge::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "concierge=info".into()),
        )
        .init();

    let config = ConciergeConfig::from_env()?;
    let service = chat_service(&config)?;

    let mut session_id: Option<SessionId> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    prompt()?;
    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if !text.is_empty() {
            match service.submit_turn(session_id.clone(), text).await {
                Ok(outcome) => {
                    session_id = Some(outcome.session_id.clone());
                    println!("Assistant: {}", outcome.final_text);
                }
                Err(error) => eprintln!("Error: {error}"),
            }
        }

        prompt()?;
    }

    println!("Chat ended.");
    Ok(())
}

fn prompt() -> std::io::Result<()> {
    print!("You: ");
    std::io::stdout().flush()
}
