//! Translation key extraction.
//!
//! ## Module Structure
//!
//! - `call`: grammar of a single call, `extract_key_and_value`
//! - `scanner`: finds raw call sites in file content
//! - `collector`: deduplication and the conflict rule across files

pub mod call;
pub mod collector;
pub mod scanner;

pub use call::{GrammarError, ParsedCall, extract_key_and_value};
pub use collector::{ExtractedKey, Extraction, KeyCollector, extract};
pub use scanner::{CallScanner, RawCall};
