//! Status message shown under the playfield.

use crate::core::MessageSurface;

/// Holds the current status text. This is the presentation surface the
/// session controller writes to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBanner {
    text: String,
    /// Incremented on every change; lets the frame loop spot static frames.
    revision: u64,
}

impl MessageBanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Lines with leading/trailing whitespace removed.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines().map(str::trim)
    }

    pub fn line_count(&self) -> u16 {
        self.text.lines().count() as u16
    }

    /// Widest line in characters.
    pub fn width(&self) -> u16 {
        self.lines().map(|l| l.chars().count()).max().unwrap_or(0) as u16
    }
}

impl MessageSurface for MessageBanner {
    fn set_message(&mut self, text: &str) {
        if self.text == text {
            return;
        }
        self.text.clear();
        self.text.push_str(text);
        self.revision = self.revision.wrapping_add(1);
    }
}
