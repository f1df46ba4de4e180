// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Clipboard port. When no clipboard is reachable callers fall back to
//! presenting the text directly, so nothing is lost.

use thiserror::Error;

/// The clipboard capability is absent or refused the write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("clipboard unavailable: {reason}")]
pub struct ClipboardUnavailable {
    /// Why the write failed.
    pub reason: String,
}

impl ClipboardUnavailable {
    /// Build from a reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Clipboard-facing port.
pub trait ClipboardPort {
    /// Place `text` on the clipboard.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardUnavailable>;
}

/// A clipboard that does not exist (headless sessions).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

impl ClipboardPort for NoClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardUnavailable> {
        Err(ClipboardUnavailable::new("no clipboard in this session"))
    }
}

/// Clipboard kept in memory; remembers the last write.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    /// Create an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last written text.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardPort for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardUnavailable> {
        self.contents = Some(text.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_keeps_last_write() {
        let mut clip = MemoryClipboard::new();
        clip.write_text("a").unwrap();
        clip.write_text("b").unwrap();
        assert_eq!(clip.contents(), Some("b"));
    }

    #[test]
    fn no_clipboard_refuses() {
        let err = NoClipboard.write_text("a").unwrap_err();
        assert!(err.to_string().starts_with("clipboard unavailable"));
    }
}
