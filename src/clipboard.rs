//! Clipboard access for sharing links

use std::io;

use crossterm::{clipboard::CopyToClipboard, execute};

use crate::error::ClipboardError;

pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Writes to the system clipboard through the terminal (OSC 52)
pub struct TerminalClipboard;

impl Clipboard for TerminalClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        if text.is_empty() {
            return Err(ClipboardError::Empty);
        }
        execute!(io::stdout(), CopyToClipboard::to_clipboard_from(text))?;
        tracing::debug!(len = text.len(), "Copied to clipboard");
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_link_is_not_copied() {
        assert!(matches!(TerminalClipboard.copy(""), Err(ClipboardError::Empty)));
    }
}
