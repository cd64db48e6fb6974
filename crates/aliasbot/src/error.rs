use std::fmt;

/// Unified error type for the aliasbot crate.
///
/// Malformed commands are not errors here; they become replies.
#[derive(Debug, Clone)]
pub enum CoreError {
    /// Invalid input provided by the caller or the environment.
    InvalidInput(String),
    /// The alias store failed to read or persist data.
    Storage(String),
    /// The messaging gateway failed to deliver or receive.
    Gateway(String),
    /// Internal error.
    Internal(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            CoreError::Storage(msg) => write!(f, "storage error: {msg}"),
            CoreError::Gateway(msg) => write!(f, "gateway error: {msg}"),
            CoreError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

/// Result type alias using [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;
