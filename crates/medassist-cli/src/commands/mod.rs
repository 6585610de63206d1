//! Slash commands for interactive mode

mod history;
mod images;

pub use history::HistoryCommand;
pub use images::ImagesCommand;

use medassist_dialogue::ConversationContext;

use crate::terminal::TerminalGallery;

/// Result of executing a slash command
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Drop the conversation and start over
    Restart,
    /// Show a message to the user (not sent to the assistant)
    Message(String),
    /// Exit the application
    Exit,
    /// Unknown command
    Unknown(String),
}

/// Parse and execute a slash command
pub fn execute_command(
    input: &str,
    context: &ConversationContext,
    session_id: &str,
    gallery: &TerminalGallery,
) -> Option<CommandResult> {
    let input = input.trim();

    let rest = input.strip_prefix('/')?;
    let parts: Vec<&str> = rest.splitn(2, ' ').collect();
    let command = parts[0].to_lowercase();
    let args = parts.get(1).map(|s| s.trim()).unwrap_or("");

    Some(match command.as_str() {
        "help" | "h" | "?" => CommandResult::Message(help_message()),

        "restart" | "new" | "r" => CommandResult::Restart,

        "history" | "hist" => HistoryCommand::execute(args, context, session_id),

        "images" | "i" => ImagesCommand::execute(gallery),

        "quit" | "exit" | "q" => CommandResult::Exit,

        _ => CommandResult::Unknown(command),
    })
}

fn help_message() -> String {
    r#"Available commands:
  /help, /h, /?          Show this help message
  /restart, /new, /r     Start a new conversation
  /history [n]           Show the transcript (last n entries if given)
  /images, /i            Show the latest related images
  /quit, /exit, /q       Exit medassist

When the assistant asks a question with options, answer with the option
number (or several numbers separated by commas where more than one applies)."#
        .to_string()
}
