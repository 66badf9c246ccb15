//! AI Astronomer chat
//!
//! Line-oriented chat with the astronomy assistant. Reads the API key from
//! `API_KEY` (or `GEMINI_API_KEY`) unless given on the command line.
//!
//! Usage:
//!   cargo run --bin astronomer
//!   cargo run --bin astronomer -- --about Mercury
//!   cargo run --bin astronomer -- "How far is Venus from the Sun?"

use std::io::{self, BufRead, Write};
use std::time::Duration;

use clap::Parser;
use cosmoslearn::chat::{ChatError, ChatSession, Role};
use cosmoslearn::{AssistantBridge, AssistantConfig, SOLAR_SYSTEM};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// AI Astronomer chat
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Ask a friendly AI astronomer about the solar system",
    long_about = None
)]
struct Args {
    /// API key (overrides API_KEY / GEMINI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Completion model
    #[arg(long)]
    model: Option<String>,

    /// API base URL
    #[arg(long)]
    endpoint: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Start by asking about a catalog body
    #[arg(long)]
    about: Option<String>,

    /// Ask a single question and exit
    question: Option<String>,
}

fn build_config(args: &Args) -> AssistantConfig {
    let mut config = AssistantConfig::from_env();
    if let Some(key) = &args.api_key {
        config = config.with_api_key(key.as_str());
    }
    if let Some(model) = &args.model {
        config = config.with_model(model.as_str());
    }
    if let Some(endpoint) = &args.endpoint {
        config = config.with_endpoint(endpoint);
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    config
}

fn print_reply(session: &ChatSession) {
    if let Some(message) = session.last() {
        if message.role == Role::Model {
            println!("🔭 {}\n", message.text);
        }
    }
}

fn ask_about(session: &mut ChatSession, bridge: &AssistantBridge, name: &str) -> Result<()> {
    let body = SOLAR_SYSTEM.require(name)?;
    println!("you> Tell me about {}.", body.name);
    session.ask_about(bridge, body)?;
    print_reply(session);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let bridge = AssistantBridge::from_config(&build_config(&args))?;
    let mut session = ChatSession::new();

    if let Some(question) = &args.question {
        session.submit(&bridge, question)?;
        print_reply(&session);
        return Ok(());
    }

    print_reply(&session);
    if let Some(name) = &args.about {
        ask_about(&mut session, &bridge, name)?;
    }

    let stdin = io::stdin();
    loop {
        print!("you> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);

        match line.trim() {
            "/quit" | "/exit" => break,
            "/history" => {
                for message in session.messages() {
                    println!(
                        "[{}] {:?}: {}",
                        message.timestamp.format("%H:%M:%S"),
                        message.role,
                        message.text
                    );
                }
                continue;
            }
            command if command.starts_with("/about ") => {
                let name = command.trim_start_matches("/about ").trim();
                if let Err(e) = ask_about(&mut session, &bridge, name) {
                    println!("{}", e);
                }
                continue;
            }
            _ => {}
        }

        match session.submit(&bridge, line) {
            Ok(_) => print_reply(&session),
            Err(ChatError::EmptyInput) => continue,
            Err(e) => println!("{}", e),
        }
    }

    Ok(())
}
