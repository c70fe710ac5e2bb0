use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(#[from] arboard::Error);

pub struct SystemClipboard;

impl SystemClipboard {
    /// Replaces the system clipboard contents with `text`.
    pub fn copy(text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text.to_owned())?;
        debug!(bytes = text.len(), "copied text to clipboard");
        Ok(())
    }
}
