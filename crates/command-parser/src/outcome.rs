use crate::error::SyntaxErrorKind;

/// A fully parsed command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// The prefix literal that marked the message as a command.
    pub prefix: String,
    /// First token after the prefix. Empty when nothing followed the prefix.
    pub sub_command: String,
    /// Quoted arguments in order of appearance, quotes stripped.
    pub args: Vec<String>,
}

/// Result of parsing one chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The message does not start with the prefix.
    NoMatch,
    /// The message starts with the prefix but breaks the grammar.
    ParseError {
        message: String,
        kind: SyntaxErrorKind,
    },
    Parsed(ParsedCommand),
}

impl ParseOutcome {
    /// True for anything addressed to the bot, well-formed or not.
    pub fn is_match(&self) -> bool {
        !matches!(self, Self::NoMatch)
    }

    pub fn parsed(&self) -> Option<&ParsedCommand> {
        match self {
            Self::Parsed(command) => Some(command),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::ParseError { message, .. } => Some(message),
            _ => None,
        }
    }
}
