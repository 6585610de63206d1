//! medassist - conversational medical assistant CLI

mod answer;
mod commands;
mod config;
mod terminal;

use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use clap::Parser;
use medassist_api::DialogueClient;
use medassist_dialogue::{HttpTransport, Orchestrator, OrchestratorConfig};

use terminal::{DisplayOptions, TerminalGallery, TerminalPresenter};

type Assistant = Orchestrator<TerminalPresenter>;

/// medassist - describe your symptoms and get guidance
#[derive(Parser, Debug)]
#[command(name = "medassist")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Backend base URL (default: http://127.0.0.1:5000)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Seconds to wait for a reply (at least 1)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Send a single message, print the reply and exit
    #[arg(short = 'c', long)]
    command: Option<String>,

    /// Print markup instead of plain text
    #[arg(long)]
    raw: bool,

    /// Do not search related images
    #[arg(long)]
    no_images: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so the conversation on stdout stays clean
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("medassist=debug")
            .with_writer(io::stderr)
            .init();
    }

    if args.init_config {
        match config::Config::init() {
            Ok(path) => {
                println!("Config file created at: {}", path.display());
                println!("\nExample config:\n{}", config::example_config());
            }
            Err(e) => {
                eprintln!("Error creating config: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let mut config = config::Config::load();
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(timeout) = args.timeout {
        config.response_timeout_secs = timeout;
    }
    if args.raw {
        config.raw_markup = true;
    }
    if args.no_images {
        config.show_images = false;
    }
    tracing::debug!(?config, "Loaded configuration");

    let client = DialogueClient::new(config.endpoints())?;
    let gallery = Arc::new(TerminalGallery::default());
    let presenter = TerminalPresenter::new(
        DisplayOptions {
            raw_markup: config.raw_markup,
            wrap_width: config.wrap_width,
        },
        Arc::clone(&gallery),
    );
    let mut assistant = Orchestrator::new(
        OrchestratorConfig {
            response_timeout: config.response_timeout(),
            show_images: config.show_images,
        },
        Arc::new(HttpTransport::new(client)),
        presenter,
        gallery.clone(),
    );

    if let Some(command) = args.command {
        assistant.submit(command).await?;
        return Ok(());
    }

    run_interactive(&mut assistant, &gallery).await
}

async fn run_interactive(assistant: &mut Assistant, gallery: &TerminalGallery) -> anyhow::Result<()> {
    if io::stderr().is_terminal() {
        let id = assistant.session_id().to_string();
        eprintln!("medassist session: {}", &id[..8]);
        eprintln!("Describe your symptoms to begin. Type /help for commands.");
        eprintln!();
    }

    loop {
        // Free text is locked while a follow-up waits for its answer
        let answering = !assistant.presenter().input_enabled();
        let prompt = if answering { "? " } else { "> " };
        print!("{prompt}");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            // EOF
            break;
        }
        let input = input.trim();

        // Handle slash commands
        if input.starts_with('/') {
            let session_id = assistant.session_id().to_string();
            if let Some(result) =
                commands::execute_command(input, assistant.context(), &session_id, gallery)
            {
                match result {
                    commands::CommandResult::Restart => {
                        let _ = assistant.restart().await;
                    }
                    commands::CommandResult::Message(msg) => {
                        println!("{}", msg);
                    }
                    commands::CommandResult::Exit => {
                        break;
                    }
                    commands::CommandResult::Unknown(cmd) => {
                        println!("Unknown command: /{}", cmd);
                        println!("Type /help for available commands.");
                    }
                }
            }
            continue;
        }

        if let Some(component) = assistant.active_component().filter(|_| answering) {
            match answer::parse_answer(component, input) {
                Ok(interactions) => {
                    for interaction in interactions {
                        // Rejections are already shown through the presenter
                        if assistant.interact(interaction).await.is_err() {
                            break;
                        }
                    }
                }
                Err(hint) => println!("{}", hint),
            }
            continue;
        }

        if input.is_empty() {
            continue;
        }
        let _ = assistant.submit(input).await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_flag_rejected() {
        assert!(Args::try_parse_from(["medassist", "--timeout", "0"]).is_err());
        let args = Args::try_parse_from(["medassist", "-t", "5"]).unwrap();
        assert_eq!(args.timeout, Some(5));
    }
}
