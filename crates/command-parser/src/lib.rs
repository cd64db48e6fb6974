//! Chat command parsing.
//!
//! This crate turns the raw text of a chat message into a structured command:
//! - Prefix recognition (messages without the prefix are not commands)
//! - Subcommand extraction
//! - Double-quoted positional arguments
//! - User-facing diagnostics for malformed commands

pub mod error;
pub mod outcome;
pub mod parser;

// Re-export main types
pub use error::SyntaxErrorKind;
pub use outcome::{ParseOutcome, ParsedCommand};
pub use parser::{parse, CommandParser, DEFAULT_PREFIX};
