//! Shared types for text reconstruction.
//!
//! Fragments are produced by a [`PdfSource`](crate::pdf::PdfSource) and
//! consumed by the line reconstructor. Kept separate so PDF backends do
//! not depend on `lines.rs`.

use serde::{Deserialize, Serialize};

/// Whitespace as PDF text layers use it: Unicode `White_Space` plus the
/// byte-order mark, which some producers emit as a standalone run.
pub fn is_text_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// One run of characters at a given vertical baseline.
///
/// Order matters: a page's fragments are consumed in the order the PDF
/// backend produced them, which approximates reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedFragment {
    pub text: String,
    /// Baseline Y in page coordinate space. `None` means unknown, not zero.
    pub baseline_y: Option<f32>,
    /// Authoritative end-of-line flag from the source.
    pub ends_line: bool,
}

impl PositionedFragment {
    /// Fragment with a known baseline.
    pub fn new(text: impl Into<String>, baseline_y: f32) -> Self {
        Self {
            text: text.into(),
            baseline_y: Some(baseline_y),
            ends_line: false,
        }
    }

    /// Fragment with no position information.
    pub fn unpositioned(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            baseline_y: None,
            ends_line: false,
        }
    }

    /// Mark this fragment as the last one on its line.
    #[must_use]
    pub fn with_line_end(mut self) -> Self {
        self.ends_line = true;
        self
    }

    /// Whitespace-only fragments carry no content.
    pub fn is_blank(&self) -> bool {
        self.text.chars().all(is_text_whitespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fragments() {
        assert!(PositionedFragment::new("", 1.0).is_blank());
        assert!(PositionedFragment::new(" \t\u{3000}", 1.0).is_blank());
        assert!(PositionedFragment::new("\u{feff}", 1.0).is_blank());
        assert!(PositionedFragment::new(" \u{feff}\n", 1.0).is_blank());
        assert!(!PositionedFragment::new("\u{feff}x", 1.0).is_blank());
    }
}
