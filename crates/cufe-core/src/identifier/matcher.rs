//! CUFE extraction from page text.
//!
//! A CUFE is a long hex string printed on the invoice, frequently wrapped
//! over several lines. Matching runs in two steps: [`HEX_RUN`] locates each
//! maximal run of hex digits and line breaks, then the run is split into its
//! hex lines and the identifier is searched for line by line. A candidate
//! starts and ends on whole lines, must stand on its own (no word glued to
//! its first or last line) and its hex length, line breaks removed, must fall
//! inside the configured bounds.
//!
//! The earliest starting line wins, and from it the longest span that fits.
//! A single line longer than the upper bound is never truncated.

use regex::Match;

use super::patterns::{is_line_break, is_word_char, HEX_RUN};
use super::{ExtractionMatch, FieldExtractor};
use crate::error::CufeError;
use crate::models::config::IdentifierConfig;

/// CUFE field extractor.
#[derive(Debug, Clone)]
pub struct CufeMatcher {
    min_length: usize,
    max_length: usize,
}

impl CufeMatcher {
    /// Create a matcher with the default 95..=100 hex character bounds.
    pub fn new() -> Self {
        let defaults = IdentifierConfig::default();
        Self {
            min_length: defaults.min_length,
            max_length: defaults.max_length,
        }
    }

    /// Create a matcher with custom inclusive bounds.
    pub fn with_bounds(min_length: usize, max_length: usize) -> Result<Self, CufeError> {
        if min_length == 0 || min_length > max_length {
            return Err(CufeError::Config(format!(
                "invalid identifier length bounds {}..={}",
                min_length, max_length
            )));
        }
        Ok(Self { min_length, max_length })
    }

    pub fn from_config(config: &IdentifierConfig) -> Result<Self, CufeError> {
        Self::with_bounds(config.min_length, config.max_length)
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Find the first identifier in `text`, line breaks removed.
    pub fn find(&self, text: &str) -> Option<String> {
        self.extract(text).map(|m| m.value)
    }

    fn qualify(&self, text: &str, run: Match<'_>) -> Option<ExtractionMatch<String>> {
        let lines = hex_lines(text, run);

        for (first, line) in lines.iter().enumerate() {
            if !line.opens {
                continue;
            }
            let mut len = 0;
            let mut last = None;
            for (i, next) in lines.iter().enumerate().skip(first) {
                len += next.end - next.start;
                if len > self.max_length {
                    break;
                }
                if next.closes && len >= self.min_length {
                    last = Some(i);
                }
            }
            if let Some(last) = last {
                let (start, end) = (line.start, lines[last].end);
                let raw = &text[start..end];
                let value: String = raw.chars().filter(|c| !is_line_break(*c)).collect();
                return Some(ExtractionMatch::new(value, raw).with_position(start, end));
            }
        }
        None
    }
}

/// One line of hex digits inside a run.
struct HexLine {
    start: usize,
    end: usize,
    /// Not glued to a preceding word.
    opens: bool,
    /// Not glued to a following word.
    closes: bool,
}

fn hex_lines(text: &str, run: Match<'_>) -> Vec<HexLine> {
    let mut lines = Vec::new();
    let mut offset = run.start();
    for piece in run.as_str().split(is_line_break) {
        let (start, end) = (offset, offset + piece.len());
        offset = end + 1;
        if piece.is_empty() {
            continue;
        }
        lines.push(HexLine {
            start,
            end,
            opens: !text[..start].chars().next_back().is_some_and(is_word_char),
            closes: !text[end..].chars().next().is_some_and(is_word_char),
        });
    }
    lines
}

impl Default for CufeMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CufeMatcher {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        HEX_RUN
            .find_iter(text)
            .find_map(|run| self.qualify(text, run))
    }
}

/// Extract a CUFE from text using the default bounds.
pub fn extract_cufe(text: &str) -> Option<String> {
    CufeMatcher::new().find(text)
}
