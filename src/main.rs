use std::io::{self, Write};
use std::path::Path;

use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

mod config;
mod error;
mod handlers;
mod llm;
mod session;
mod transcript;
mod utils;

use config::CONFIG;
use handlers::{attach, send};
use llm::GeminiClient;
use session::SessionState;
use transcript::{notice, Transcript};
use utils::logging::init_logging;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Send(String),
    Attach(String),
    Remove,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Send(line.to_string());
    };

    let (name, arg) = rest
        .split_once(char::is_whitespace)
        .unwrap_or((rest, ""));
    match name.to_ascii_lowercase().as_str() {
        "attach" => Command::Attach(arg.trim().to_string()),
        "remove" => Command::Remove,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  /attach <path>  attach an image (at most one, sent with the next message)");
    println!("  /remove         drop the attached image");
    println!("  /help           show this help");
    println!("  /quit           exit");
    println!("Anything else is sent as a message. An empty line resends a failed message.");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let _guards = init_logging();

    if CONFIG.gemini_api_key.trim().is_empty() {
        return Err(anyhow::anyhow!("GEMINI_API_KEY is required"));
    }

    info!("Starting Gemini chat client (model {})", CONFIG.gemini_model);
    println!(
        "Gemini chat (model {}). Type /help for commands.",
        CONFIG.gemini_model
    );

    let client = GeminiClient::from_config();
    let mut session = SessionState::default();
    let mut transcript = Transcript::new();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::Unknown(name) => {
                notice(&format!("Unknown command /{name}. Type /help for the command list."));
            }
            Command::Remove => {
                if session.clear_pending_image().is_some() {
                    println!("Image removed.");
                } else {
                    notice("No image is attached.");
                }
            }
            Command::Attach(arg) => {
                if arg.is_empty() {
                    notice("Usage: /attach <path-to-image>");
                    continue;
                }
                match attach::select_image(Path::new(&arg)).await {
                    Ok(image) => {
                        println!(
                            "Image selected: {} ({}). Use /remove to drop it.",
                            image.file_name, image.mime_type
                        );
                        session.set_pending_image(image);
                    }
                    Err(err) => notice(&err.to_string()),
                }
            }
            Command::Send(text) => {
                // An empty line keeps whatever a failed send restored, so
                // plain Enter retries it.
                if !text.trim().is_empty() {
                    session.text = text;
                }
                send::send_message(&client, &mut session, &mut transcript).await;
            }
        }
    }

    info!("Gemini chat client shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_commands_are_parsed_case_insensitively() {
        assert_eq!(parse_command("/Attach  ./cat.png "), Command::Attach("./cat.png".to_string()));
        assert_eq!(parse_command("/remove"), Command::Remove);
        assert_eq!(parse_command("/QUIT"), Command::Quit);
        assert_eq!(parse_command("/frobnicate"), Command::Unknown("frobnicate".to_string()));
    }

    #[test]
    fn anything_else_is_a_send() {
        assert_eq!(parse_command("hello there"), Command::Send("hello there".to_string()));
        assert_eq!(parse_command(""), Command::Send("".to_string()));
    }
}
