//! /history command - show the conversation transcript

use medassist_api::Role;
use medassist_dialogue::ConversationContext;

use super::CommandResult;

/// Longest preview shown per entry
const PREVIEW_CHARS: usize = 72;

pub struct HistoryCommand;

impl HistoryCommand {
    pub fn execute(args: &str, context: &ConversationContext, session_id: &str) -> CommandResult {
        let history = context.history();
        if history.is_empty() {
            return CommandResult::Message("No messages yet.".to_string());
        }

        let limit = match args {
            "" => history.len(),
            n => match n.parse::<usize>() {
                Ok(n) => n.min(history.len()),
                Err(_) => return CommandResult::Message(format!("Not a number: '{n}'")),
            },
        };
        let start = history.len() - limit;

        let mut output = format!("Session {session_id} ({} messages)\n", history.len());
        output.push_str(&"-".repeat(40));
        for (i, entry) in history.iter().enumerate().skip(start) {
            let who = match entry.role {
                Role::User => "you",
                Role::Assistant => "assistant",
            };
            output.push_str(&format!("\n{:>3} {:<9} {}", i + 1, who, preview(&entry.message)));
        }
        CommandResult::Message(output)
    }
}

/// First line-joined `PREVIEW_CHARS` characters of a message
fn preview(message: &str) -> String {
    let flat = message.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = flat.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ConversationContext {
        let mut ctx = ConversationContext::new();
        ctx.push_user("I have a sore throat");
        ctx.push_assistant("How long\nhas it hurt?");
        ctx
    }

    #[test]
    fn test_lists_entries() {
        let CommandResult::Message(text) = HistoryCommand::execute("", &context(), "abcd") else {
            panic!("expected message");
        };
        assert!(text.starts_with("Session abcd (2 messages)"));
        assert!(text.contains("  1 you       I have a sore throat"));
        assert!(text.contains("  2 assistant How long has it hurt?"));
    }

    #[test]
    fn test_limit() {
        let CommandResult::Message(text) = HistoryCommand::execute("1", &context(), "abcd") else {
            panic!("expected message");
        };
        assert!(!text.contains("sore throat"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(
            HistoryCommand::execute("", &ConversationContext::new(), "abcd"),
            CommandResult::Message("No messages yet.".into())
        );
    }

    #[test]
    fn test_preview_truncates() {
        let long = "a".repeat(100);
        assert_eq!(preview(&long).chars().count(), PREVIEW_CHARS + 3);
    }
}
