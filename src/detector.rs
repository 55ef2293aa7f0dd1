//! Phone number detection.
//!
//! The detector recognizes common North American phone formats:
//! `(NNN) NNN-NNNN`, `NNN-NNN-NNNN`, `NNN.NNN.NNNN`, `NNN NNN NNNN`, and the
//! bare ten-digit run, with an optional `1` / `+1` country-code prefix and an
//! optional `ext.` / `x` extension.
//!
//! Matching is strict about digit grouping so that ZIP codes, SSNs, dates,
//! and other digit runs are left alone. The `regex` crate has no look-around,
//! so the "not embedded in a longer digit run" rule is enforced by checking
//! the haystack characters adjacent to each candidate match.

use regex::Regex;

use crate::errors::{MaskError, MaskResult};

/// Candidate grammar. Separators are optional so a bare `4155552671` still
/// counts; digit-boundary rejection happens outside the pattern.
const PHONE_PATTERN: &str = r"(?:\+?(?P<cc>1)[-.\s]?)?(?:\((?P<area_paren>\d{3})\)\s?|(?P<area>\d{3})[-.\s]?)(?P<exchange>\d{3})[-.\s]?(?P<subscriber>\d{4})(?:\s?(?i:ext\.?|x)\s?(?P<ext>\d{1,5}))?";

/// A detected phone number and its decomposed parts.
///
/// All string fields borrow from the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneMatch<'t> {
    /// Byte offset of the first matched character.
    pub start: usize,
    /// Byte offset one past the last matched character.
    pub end: usize,
    /// The full matched substring, separators included.
    pub text: &'t str,
    /// Country-code digits, when a `1` / `+1` prefix was present.
    pub country_code: Option<&'t str>,
    /// Leading three-digit group after any country code.
    pub area_code: &'t str,
    /// Middle three-digit group.
    pub exchange: &'t str,
    /// Trailing four-digit group.
    pub subscriber: &'t str,
    /// Extension digits, when an `ext.` / `x` suffix was present.
    pub extension: Option<&'t str>,
}

/// Phone number detector with a pre-compiled pattern.
#[derive(Debug, Clone)]
pub struct PhoneDetector {
    pattern: Regex,
}

impl PhoneDetector {
    /// Compile the detection pattern.
    pub fn new() -> MaskResult<Self> {
        let pattern = Regex::new(PHONE_PATTERN).map_err(|e| MaskError::Pattern {
            pattern: PHONE_PATTERN.to_string(),
            error: e.to_string(),
        })?;
        Ok(Self { pattern })
    }

    /// Iterate over phone numbers in `text`, left to right, non-overlapping.
    ///
    /// The iterator is lazy; calling this again restarts the scan from the
    /// beginning. Overlapping candidates resolve to the leftmost-longest
    /// match (greedy optional prefix and extension).
    pub fn find_iter<'d, 't>(&'d self, text: &'t str) -> PhoneMatches<'d, 't> {
        PhoneMatches {
            detector: self,
            text,
            pos: 0,
        }
    }
}

/// Lazy iterator over [`PhoneMatch`]es, returned by
/// [`PhoneDetector::find_iter`].
#[derive(Debug, Clone)]
pub struct PhoneMatches<'d, 't> {
    detector: &'d PhoneDetector,
    text: &'t str,
    pos: usize,
}

impl<'t> Iterator for PhoneMatches<'_, 't> {
    type Item = PhoneMatch<'t>;

    fn next(&mut self) -> Option<PhoneMatch<'t>> {
        while self.pos <= self.text.len() {
            let caps = self.detector.pattern.captures_at(self.text, self.pos)?;
            let full = caps.get(0)?;

            // Candidates embedded in a longer digit run are near-misses, not
            // phone numbers. Resume one past the rejected start so shorter
            // candidates inside the span still get considered.
            if digit_adjacent(self.text, full.start(), full.end()) {
                self.pos = full.start() + 1;
                continue;
            }

            self.pos = full.end();

            let area = caps
                .name("area_paren")
                .or_else(|| caps.name("area"))
                .map(|m| m.as_str())?;

            return Some(PhoneMatch {
                start: full.start(),
                end: full.end(),
                text: full.as_str(),
                country_code: caps.name("cc").map(|m| m.as_str()),
                area_code: area,
                exchange: caps.name("exchange").map(|m| m.as_str())?,
                subscriber: caps.name("subscriber").map(|m| m.as_str())?,
                extension: caps.name("ext").map(|m| m.as_str()),
            });
        }
        None
    }
}

/// True when the span at `[start, end)` touches another ASCII digit.
fn digit_adjacent(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit());
    let after = text[end..].chars().next().is_some_and(|c| c.is_ascii_digit());
    before || after
}
