//! Single-pass file processing: read, transform, write.

use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::debug;

use crate::errors::{MaskError, MaskResult};
use crate::masking::MaskingEngine;
use crate::parsers::{transform_content, ContentFormat};

/// Outcome of one processed file.
#[derive(Debug, Clone)]
pub struct ProcessReport {
    /// How the input was traversed.
    pub format: ContentFormat,
    /// Number of phone numbers transformed.
    pub matches: usize,
    /// Where the output was written.
    pub output_path: PathBuf,
}

/// Process one file: read it as UTF-8, transform every detected phone
/// number, write the result to `output` (the input path when `None`,
/// overwriting in place).
///
/// Unreadable or missing input, non-UTF-8 content, and write failures are
/// all fatal [`MaskError::Io`] errors.
pub fn process_file<R: Rng>(
    input: &Path,
    output: Option<&Path>,
    engine: &MaskingEngine,
    rng: &mut R,
) -> MaskResult<ProcessReport> {
    let content = fs::read_to_string(input).map_err(|e| MaskError::io(input, e))?;
    let format = ContentFormat::from_path(input);
    debug!(path = %input.display(), %format, bytes = content.len(), "read input");

    let (transformed, matches) = transform_content(format, &content, engine, rng);

    let output_path = output.unwrap_or(input);
    fs::write(output_path, transformed).map_err(|e| MaskError::io(output_path, e))?;
    debug!(path = %output_path.display(), matches, "wrote output");

    Ok(ProcessReport {
        format,
        matches,
        output_path: output_path.to_path_buf(),
    })
}
