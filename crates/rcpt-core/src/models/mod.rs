//! Data models for receipts and parser configuration.

pub mod config;
pub mod lexicon;
pub mod receipt;

pub use config::{ExtractionConfig, ParserConfig};
pub use lexicon::{Lexicon, LEXICON_VERSION};
pub use receipt::{ParsedItem, ReceiptLayout, ReceiptSummary};
