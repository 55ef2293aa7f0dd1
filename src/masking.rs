//! Masking engine: applies a [`MaskingPolicy`] to detected phone numbers.
//!
//! Two modes:
//! - Mask: every digit in the matched span becomes the mask character;
//!   separators (parentheses, dashes, dots, spaces, plus signs) survive, so
//!   output length equals input length.
//! - Replace: the digits are substituted with a synthesized number of the
//!   same group lengths, keeping the original separators in place. The area
//!   code is copied from the original when the policy says so; country-code
//!   and extension digits are always copied.
//!
//! Synthesis draws from a caller-supplied `rand::Rng` so tests can seed it.

use rand::Rng;
use tracing::debug;

use crate::config::{MaskMode, MaskingPolicy};
use crate::detector::{PhoneDetector, PhoneMatch};
use crate::errors::MaskResult;

/// Phone masking engine. Holds the compiled detector and the policy for one
/// run.
#[derive(Debug, Clone)]
pub struct MaskingEngine {
    policy: MaskingPolicy,
    detector: PhoneDetector,
}

impl MaskingEngine {
    /// Build an engine for the given policy.
    pub fn new(policy: MaskingPolicy) -> MaskResult<Self> {
        Ok(Self {
            detector: PhoneDetector::new()?,
            policy,
        })
    }

    /// The policy this engine applies.
    pub fn policy(&self) -> &MaskingPolicy {
        &self.policy
    }

    /// Transform every detected phone number in `text`.
    ///
    /// `rng` is only drawn from in replace mode.
    pub fn transform<R: Rng>(&self, text: &str, rng: &mut R) -> String {
        self.transform_counted(text, rng).0
    }

    /// Like [`transform`](Self::transform), also returning how many numbers
    /// were transformed.
    pub fn transform_counted<R: Rng>(&self, text: &str, rng: &mut R) -> (String, usize) {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut count = 0;

        for m in self.detector.find_iter(text) {
            out.push_str(&text[last..m.start]);
            let replacement = match self.policy.mode {
                MaskMode::Mask => mask_digits(m.text, self.policy.mask_char),
                MaskMode::Replace => self.synthesize(&m, rng),
            };
            debug!(start = m.start, end = m.end, "transformed phone number");
            out.push_str(&replacement);
            last = m.end;
            count += 1;
        }

        out.push_str(&text[last..]);
        (out, count)
    }

    /// Build a fake number shaped like the match: same digit-group lengths,
    /// same separators.
    fn synthesize<R: Rng>(&self, m: &PhoneMatch<'_>, rng: &mut R) -> String {
        // Replacement digits in match order: country code (copied), area code
        // (copied or synthesized), exchange + subscriber (synthesized),
        // extension (copied).
        let mut digits: Vec<u8> = Vec::with_capacity(12);

        if let Some(cc) = m.country_code {
            digits.extend(cc.bytes());
        }

        if self.policy.keep_area_code {
            digits.extend(m.area_code.bytes());
        } else {
            digits.extend(random_group(rng, 3, true));
        }

        let mut local = random_group(rng, 3, true);
        local.extend(random_group(rng, 4, false));
        displace_if_equal(&mut local, m.exchange, m.subscriber);
        digits.extend(local);

        if let Some(ext) = m.extension {
            digits.extend(ext.bytes());
        }

        let mut queue = digits.into_iter();
        m.text
            .chars()
            .map(|c| {
                if c.is_ascii_digit() {
                    queue.next().map(char::from).unwrap_or(c)
                } else {
                    c
                }
            })
            .collect()
    }
}

/// Replace every ASCII digit with the mask character, leaving everything
/// else in place.
fn mask_digits(text: &str, mask_char: char) -> String {
    text.chars()
        .map(|c| if c.is_ascii_digit() { mask_char } else { c })
        .collect()
}

/// Generate `len` random ASCII digits. NANP groups never start with 0 or 1,
/// so the leading digit is drawn from 2..=9 when `nanp_leading` is set.
fn random_group<R: Rng>(rng: &mut R, len: usize, nanp_leading: bool) -> Vec<u8> {
    (0..len)
        .map(|i| {
            let low = if i == 0 && nanp_leading { 2 } else { 0 };
            b'0' + rng.random_range(low..=9u8)
        })
        .collect()
}

/// A synthesized local part must not reproduce the real one. On a collision
/// the last subscriber digit is shifted by one.
fn displace_if_equal(local: &mut [u8], exchange: &str, subscriber: &str) {
    let original_len = exchange.len() + subscriber.len();
    if local.len() != original_len {
        return;
    }
    let matches_original = local[..exchange.len()] == *exchange.as_bytes()
        && local[exchange.len()..] == *subscriber.as_bytes();
    if matches_original {
        if let Some(last) = local.last_mut() {
            *last = b'0' + (*last - b'0' + 1) % 10;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MaskMode, MaskingPolicy};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use regex::Regex;

    fn engine(policy: MaskingPolicy) -> MaskingEngine {
        MaskingEngine::new(policy).unwrap()
    }

    fn mask_engine() -> MaskingEngine {
        engine(MaskingPolicy::default())
    }

    fn replace_engine(keep_area_code: bool) -> MaskingEngine {
        engine(MaskingPolicy {
            mode: MaskMode::Replace,
            keep_area_code,
            ..MaskingPolicy::default()
        })
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_mask_basic() {
        let out = mask_engine().transform("Call (415) 555-2671 now", &mut rng());
        assert_eq!(out, "Call (***) ***-**** now");
    }

    #[test]
    fn test_mask_preserves_length_and_separators() {
        let input = "+1 415.555.2671 ext. 42";
        let out = mask_engine().transform(input, &mut rng());
        assert_eq!(out.chars().count(), input.chars().count());
        for (i, o) in input.chars().zip(out.chars()) {
            if i.is_ascii_digit() {
                assert_eq!(o, '*');
            } else {
                assert_eq!(o, i);
            }
        }
    }

    #[test]
    fn test_mask_idempotent() {
        let once = mask_engine().transform("415-555-2671", &mut rng());
        let twice = mask_engine().transform(&once, &mut rng());
        assert_eq!(once, "***-***-****");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_digit_mask_char_applied_literally() {
        let policy = MaskingPolicy {
            mask_char: '0',
            ..MaskingPolicy::default()
        };
        let engine = engine(policy);
        assert_eq!(engine.policy().mask_char, '0');
        let out = engine.transform("415-555-2671", &mut rng());
        assert_eq!(out, "000-000-0000");
    }

    #[test]
    fn test_non_phone_digits_untouched() {
        let input = "ZIP 94103, SSN 123-45-6789, order 12345678901234";
        let out = mask_engine().transform(input, &mut rng());
        assert_eq!(out, input);
    }

    #[test]
    fn test_replace_keeps_area_code() {
        let out = replace_engine(true).transform("415-555-2671", &mut rng());
        let shape = Regex::new(r"^415-\d{3}-\d{4}$").unwrap();
        assert!(shape.is_match(&out), "unexpected shape: {}", out);
        // The displacement rule makes this a certainty, not a probability.
        assert_ne!(&out[4..], "555-2671");
    }

    #[test]
    fn test_replace_synthesizes_area_code_when_not_kept() {
        let out = replace_engine(false).transform("415-555-2671", &mut rng());
        let shape = Regex::new(r"^[2-9]\d{2}-[2-9]\d{2}-\d{4}$").unwrap();
        assert!(shape.is_match(&out), "unexpected shape: {}", out);
    }

    #[test]
    fn test_replace_preserves_country_code_and_extension() {
        let out = replace_engine(true).transform("+1 (415) 555-2671 ext. 89", &mut rng());
        let shape = Regex::new(r"^\+1 \(415\) \d{3}-\d{4} ext\. 89$").unwrap();
        assert!(shape.is_match(&out), "unexpected shape: {}", out);
    }

    #[test]
    fn test_replace_never_reproduces_local_digits() {
        // Exhaust a few seeds; the displacement rule guarantees the local
        // part differs even when the draw collides.
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = replace_engine(true).transform("415-555-2671", &mut rng);
            assert_ne!(out, "415-555-2671", "seed {} reproduced the input", seed);
        }
    }

    #[test]
    fn test_displace_if_equal_shifts_last_digit() {
        let mut local = *b"5552671";
        displace_if_equal(&mut local, "555", "2671");
        assert_eq!(&local, b"5552672");

        let mut wraps = *b"5552679";
        displace_if_equal(&mut wraps, "555", "2679");
        assert_eq!(&wraps, b"5552670");

        let mut differs = *b"8301447";
        displace_if_equal(&mut differs, "555", "2671");
        assert_eq!(&differs, b"8301447");
    }

    #[test]
    fn test_replace_deterministic_under_seed() {
        let a = replace_engine(false).transform("415-555-2671", &mut rng());
        let b = replace_engine(false).transform("415-555-2671", &mut rng());
        assert_eq!(a, b);
    }

    #[test]
    fn test_transform_counted() {
        let (out, count) = mask_engine()
            .transform_counted("415-555-2671 and (212) 664-7665", &mut rng());
        assert_eq!(count, 2);
        assert_eq!(out, "***-***-**** and (***) ***-****");
    }

    #[test]
    fn test_surrounding_text_untouched() {
        let out = mask_engine().transform("before 415-555-2671 after", &mut rng());
        assert_eq!(out, "before ***-***-**** after");
    }
}
