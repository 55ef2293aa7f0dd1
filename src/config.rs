//! Masking policy configuration.
//!
//! A [`MaskingPolicy`] is built from CLI flags, optionally seeded from a JSON
//! policy file. It is immutable for the duration of one run.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{MaskError, MaskResult};

/// How detected phone numbers are transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskMode {
    /// Replace every digit with a fixed mask character, keeping separators.
    Mask,
    /// Substitute a synthesized, format-consistent fake number.
    Replace,
}

impl Default for MaskMode {
    fn default() -> Self {
        Self::Mask
    }
}

/// Configuration choices for one masking run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskingPolicy {
    /// Transformation mode
    #[serde(default)]
    pub mode: MaskMode,

    /// Character substituted for each digit in mask mode. Any single
    /// character is accepted, including digits.
    #[serde(default = "default_mask_char")]
    pub mask_char: char,

    /// Keep the original area code when replacing
    #[serde(default)]
    pub keep_area_code: bool,
}

fn default_mask_char() -> char {
    '*'
}

impl Default for MaskingPolicy {
    fn default() -> Self {
        Self {
            mode: MaskMode::default(),
            mask_char: default_mask_char(),
            keep_area_code: false,
        }
    }
}

impl MaskingPolicy {
    /// Load a policy from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> MaskResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MaskError::io(path, e))?;
        serde_json::from_str(&content)
            .map_err(|e| MaskError::config(format!("{}: {}", path.display(), e)))
    }
}
