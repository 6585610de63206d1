//! /images command - show the latest gallery results

use super::CommandResult;
use crate::terminal::{TerminalGallery, format_images};

pub struct ImagesCommand;

impl ImagesCommand {
    pub fn execute(gallery: &TerminalGallery) -> CommandResult {
        match gallery.latest() {
            Some((term, urls)) => CommandResult::Message(format_images(&term, &urls)),
            None => CommandResult::Message("No images for this conversation.".to_string()),
        }
    }
}
