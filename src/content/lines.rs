//! Line reconstruction from positioned text fragments.
//!
//! Fragments are walked in source order. A new line starts when the
//! baseline moves by more than the tolerance, or when the source flags an
//! explicit end of line.
//!
//! ```text
//! fragments → baseline grouping → whitespace normalization → joined lines
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::types::{is_text_whitespace, PositionedFragment};

/// Baseline delta (PDF units) above which two fragments sit on different lines.
pub const DEFAULT_LINE_TOLERANCE: f32 = 4.0;

static EXCESS_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Groups fragments into lines by baseline proximity.
#[derive(Debug, Clone, Copy)]
pub struct LineReconstructor {
    tolerance: f32,
}

impl LineReconstructor {
    #[must_use]
    pub fn new(tolerance: f32) -> Self {
        Self { tolerance }
    }

    /// Reconstruct readable text from fragments in source order.
    ///
    /// Returns an empty string when no fragment carries content.
    pub fn reconstruct(&self, fragments: &[PositionedFragment]) -> String {
        let lines = self.lines(fragments);
        let joined = lines.join("\n");
        EXCESS_BLANK_LINES
            .replace_all(&joined, "\n\n")
            .trim_matches(is_text_whitespace)
            .to_string()
    }

    /// Normalized, non-empty lines in the order they were flushed.
    pub fn lines(&self, fragments: &[PositionedFragment]) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut last_baseline: Option<f32> = None;

        for fragment in fragments {
            if fragment.is_blank() {
                continue;
            }

            let should_break = match (last_baseline, fragment.baseline_y) {
                (Some(last), Some(y)) => (y - last).abs() > self.tolerance && !current.is_empty(),
                _ => false,
            };

            if should_break {
                flush(&mut current, &mut lines);
            }

            current.push(&fragment.text);
            // Unknown baselines never overwrite the tracker.
            if let Some(y) = fragment.baseline_y {
                last_baseline = Some(y);
            }

            if fragment.ends_line {
                flush(&mut current, &mut lines);
                last_baseline = None;
            }
        }

        flush(&mut current, &mut lines);
        lines
    }
}

impl Default for LineReconstructor {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_TOLERANCE)
    }
}

/// Reconstruct text with the default tolerance.
pub fn reconstruct(fragments: &[PositionedFragment]) -> String {
    LineReconstructor::default().reconstruct(fragments)
}

/// Collapse whitespace runs to single spaces and trim.
pub fn normalize_line(line: &str) -> String {
    line.split(is_text_whitespace)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn flush(current: &mut Vec<&str>, lines: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }
    let line = normalize_line(&current.concat());
    current.clear();
    if !line.is_empty() {
        lines.push(line);
    }
}
