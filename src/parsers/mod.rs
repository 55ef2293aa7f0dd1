//! Per-format content traversal.
//!
//! Plain text is one haystack. JSON and XML inputs are walked so that only
//! values and text nodes are transformed; keys, tags, and attributes pass
//! through untouched. A file whose extension claims JSON or XML but whose
//! content does not parse is handled as plain text after a warning.

mod json;
mod xml;

use std::fmt;
use std::path::Path;

use rand::Rng;
use tracing::warn;

use crate::masking::MaskingEngine;

/// How an input buffer is traversed, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Text,
    Json,
    Xml,
}

impl ContentFormat {
    /// Pick the format for a path. Anything without a `.json` / `.xml`
    /// extension is plain text.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("xml") => Self::Xml,
            _ => Self::Text,
        }
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Xml => write!(f, "xml"),
        }
    }
}

/// Transform one buffer according to its format, returning the output and
/// the number of phone numbers transformed.
pub fn transform_content<R: Rng>(
    format: ContentFormat,
    content: &str,
    engine: &MaskingEngine,
    rng: &mut R,
) -> (String, usize) {
    match format {
        ContentFormat::Text => engine.transform_counted(content, rng),
        ContentFormat::Json => match json::transform_json(content, engine, rng) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "JSON parse failed, falling back to plain text");
                engine.transform_counted(content, rng)
            }
        },
        ContentFormat::Xml => match xml::transform_xml(content, engine, rng) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "XML parse failed, falling back to plain text");
                engine.transform_counted(content, rng)
            }
        },
    }
}
