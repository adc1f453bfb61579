//! Terminal chat window for a running rfa-chat server.
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use rfa_chat::services::{
    client::{ChatTransport, HttpChatClient},
    session::{ChatSession, THINKING_PLACEHOLDER, WELCOME_TEXT},
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rfa-chat-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the chat server.
    #[arg(short, long, default_value = "http://localhost:3000")]
    server_url: String,

    /// Give up on a reply after this many seconds.
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let transport = HttpChatClient::new(&cli.server_url, Duration::from_secs(cli.timeout_secs))
        .context("building HTTP client")?;

    let mut session = ChatSession::new();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout.write_all(format!("== {WELCOME_TEXT} ==\n").as_bytes()).await?;
    loop {
        stdout.write_all(b"you: ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        session.set_input(line);
        let Some(request) = session.begin_submit() else {
            continue;
        };

        if let Some(sent) = session.messages().last() {
            stdout.write_all(format!("{}\n", sent.transcript_line()).as_bytes()).await?;
        }
        stdout.write_all(format!("  {THINKING_PLACEHOLDER}\n").as_bytes()).await?;
        stdout.flush().await?;
        let outcome = transport.send(&request).await;

        if let Some(reply) = session.resolve(outcome) {
            stdout
                .write_all(format!("{}\n", reply.transcript_line()).as_bytes())
                .await?;
        }
    }
    Ok(())
}
