//! Command parser and tokenizer.

use crate::error::{render_diagnostic, SyntaxErrorKind};
use crate::outcome::{ParseOutcome, ParsedCommand};

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "g!alias";

// ---------------------------------------------------------------------------
// Command parser
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandParser {
    prefix: String,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl CommandParser {
    /// The prefix must be non-empty and free of whitespace.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        debug_assert!(
            !prefix.is_empty() && !prefix.chars().any(char::is_whitespace),
            "command prefix must be a non-empty word"
        );
        Self { prefix }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Parse a raw chat message.
    ///
    /// Grammar: `<prefix> [subcommand] ("arg")*`, tokens separated by any
    /// amount of whitespace. Quoted arguments have no escape sequences.
    pub fn parse(&self, input: &str) -> ParseOutcome {
        let Some(mut cursor) = self.match_prefix(input) else {
            return ParseOutcome::NoMatch;
        };

        cursor = skip_whitespace(input, cursor);
        let (sub_command, next) = consume_word(input, cursor);
        cursor = next;

        let mut args = Vec::new();
        loop {
            cursor = skip_whitespace(input, cursor);
            let Some(ch) = input[cursor..].chars().next() else {
                break;
            };

            if ch != '"' {
                return syntax_error(
                    input,
                    cursor,
                    SyntaxErrorKind::UnquotedArgument { found: ch },
                );
            }

            match consume_quoted_argument(input, cursor) {
                Some((argument, next)) => {
                    args.push(argument.to_string());
                    cursor = next;
                }
                None => {
                    return syntax_error(
                        input,
                        input.len(),
                        SyntaxErrorKind::UnterminatedQuote,
                    );
                }
            }
        }

        ParseOutcome::Parsed(ParsedCommand {
            prefix: self.prefix.clone(),
            sub_command: sub_command.to_string(),
            args,
        })
    }

    /// Returns the byte offset right after the prefix, or `None` when the
    /// message is not addressed to us. The prefix must end at whitespace or
    /// at the end of input, so `g!aliases` does not match `g!alias`.
    fn match_prefix(&self, input: &str) -> Option<usize> {
        let start = skip_whitespace(input, 0);
        let rest = input[start..].strip_prefix(self.prefix.as_str())?;

        // A word glued to the prefix is ordinary chat or another bot's
        // command, never ours: `g!aliasfoo` must not run subcommand `foo`.

        match rest.chars().next() {
            Some(ch) if !ch.is_whitespace() => None,
            _ => Some(start + self.prefix.len()),
        }
    }
}

/// Parse `input` with [`DEFAULT_PREFIX`].
pub fn parse(input: &str) -> ParseOutcome {
    CommandParser::default().parse(input)
}

fn syntax_error(input: &str, position: usize, kind: SyntaxErrorKind) -> ParseOutcome {
    let column = input[..position].chars().count();
    ParseOutcome::ParseError {
        message: render_diagnostic(input, column, kind),
        kind,
    }
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

fn skip_whitespace(input: &str, mut cursor: usize) -> usize {
    while let Some(ch) = input[cursor..].chars().next() {
        if !ch.is_whitespace() {
            break;
        }
        cursor += ch.len_utf8();
    }
    cursor
}

/// Reads a run of non-whitespace characters. The word may be empty.
fn consume_word(input: &str, start: usize) -> (&str, usize) {
    let mut end = start;
    while let Some(ch) = input[end..].chars().next() {
        if ch.is_whitespace() {
            break;
        }
        end += ch.len_utf8();
    }
    (&input[start..end], end)
}

/// `start` must point at an opening quote. Returns the text between the
/// quotes and the offset after the closing one, or `None` if the quote is
/// never closed.
fn consume_quoted_argument(input: &str, start: usize) -> Option<(&str, usize)> {
    let body = start + '"'.len_utf8();
    let close = input[body..].find('"')?;
    let end = body + close;
    Some((&input[body..end], end + '"'.len_utf8()))
}
