/// Grammar violations a prefixed message can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxErrorKind {
    #[error("Expected '\"', but found '{found}'")]
    UnquotedArgument { found: char },

    #[error("Unexpected end of text while parsing a quoted argument")]
    UnterminatedQuote,
}

impl SyntaxErrorKind {
    /// One-line suggestion shown under the diagnostic.
    pub fn hint(self) -> &'static str {
        match self {
            Self::UnquotedArgument { .. } => "You probably forgot to quote the argument.",
            Self::UnterminatedQuote => "You probably forgot to put a double quote at the end.",
        }
    }
}

/// Renders the reply shown to a user whose command failed to parse.
///
/// `column` is a zero-based character offset into `origin`. The caret marker
/// is only drawn for single-line ASCII input, since wide characters shift it.
pub(crate) fn render_diagnostic(origin: &str, column: usize, kind: SyntaxErrorKind) -> String {
    let mut result = format!("```\nParsing Error(at column {column}): {kind}\n{origin}");

    if origin.chars().all(|ch| ch.is_ascii() && ch != '\n' && ch != '\r') {
        let marker = " ".repeat(column) + "^";
        result.push('\n');
        result.push_str(&marker);
    }

    result.push_str("\nhint: ");
    result.push_str(kind.hint());

    result.push_str("\n```");
    result
}
