//! # Command Test Client
//!
//! Interactive WebSocket client for exercising the command server by hand:
//! reads command names from stdin, wraps them in the request payload the
//! server dispatches on, and prints each reply.

use anyhow::Result;
use clap::Parser;
use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "command-client")]
#[command(about = "Interactive WebSocket command client")]
struct Args {
    /// Server WebSocket URL
    #[arg(short, long, default_value = "ws://127.0.0.1:1234/")]
    url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let args = Args::parse();
    info!("Connecting to {}", args.url);

    let (ws_stream, _) = connect_async(args.url.as_str()).await?;
    let (mut sink, mut stream) = ws_stream.split();

    println!("Connected. Type a command (A, B or C), or 'exit' to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = line.trim();
        if command == "exit" {
            break;
        }

        let payload = serde_json::json!({
            "request": command,
            "subrequest": "login",
            "data": { "id": "1", "firstName": "Kyle", "lastName": "Pereira" },
        });
        sink.send(Message::Text(payload.to_string().into())).await?;

        match stream.next().await {
            Some(Ok(Message::Text(reply))) => println!("Received from server: {}", reply),
            Some(Ok(Message::Close(_))) | None => {
                println!("Server closed the connection");
                break;
            }
            Some(Ok(other)) => println!("Received from server: {:?}", other),
            Some(Err(e)) => {
                eprintln!("Connection error: {}", e);
                break;
            }
        }
    }

    sink.send(Message::Close(None)).await.ok();
    Ok(())
}
