//! Error types for the rcpt-core library.
//!
//! Parsing itself never fails: malformed OCR text degrades to missing items
//! or missing metadata. Errors only arise while loading or validating
//! configuration.

use thiserror::Error;

/// Main error type for the rcpt library.
#[derive(Error, Debug)]
pub enum RcptError {
    /// Lexicon table or pattern problem.
    #[error("lexicon error: {0}")]
    Lexicon(#[from] LexiconError),

    /// Malformed configuration JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while reading or writing configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration value out of range.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while validating or compiling a lexicon.
#[derive(Error, Debug)]
pub enum LexiconError {
    /// The lexicon was written for a newer table layout.
    #[error("unsupported lexicon version {found} (supported up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// An extra non-item pattern failed to compile.
    #[error("invalid non-item pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A table the classifier cannot work without is empty.
    #[error("lexicon table '{0}' is empty")]
    EmptyTable(&'static str),
}

/// Result type for the rcpt library.
pub type Result<T> = std::result::Result<T, RcptError>;
