//! Phone number masking for text and data files.
//!
//! This crate provides light-weight sanitization of phone numbers before
//! files are shared or analyzed:
//! - Format-preserving masking (digits become a fixed character, separators
//!   survive)
//! - Replacement with synthetic but plausibly formatted numbers, optionally
//!   keeping the original area code
//! - Plain text, JSON, and XML inputs

pub mod config;
pub mod detector;
pub mod errors;
pub mod masking;
pub mod parsers;
pub mod process;

pub use config::{MaskMode, MaskingPolicy};
pub use detector::{PhoneDetector, PhoneMatch};
pub use errors::{MaskError, MaskResult};
pub use masking::MaskingEngine;
pub use parsers::ContentFormat;
pub use process::{process_file, ProcessReport};
