//! Error types for the circulation_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for circulation desk operations
///
/// The desk-level variants carry the exact wording the dispatcher shows to
/// the librarian, so callers can print `{error}` directly.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An operation that needs an open library was attempted while closed
    #[error("The library is not open.")]
    IllegalState,

    /// Check-out or check-in attempted with nobody at the desk
    #[error("No patron is currently being served.")]
    NoActiveMember,

    /// A check-in referenced a book number the patron does not have
    #[error("The patron does not have book {number}.")]
    InvalidReference { number: usize },

    /// Librarian input rejected before any state was touched
    #[error("{0}")]
    InvalidInput(String),

    /// Command text the dispatcher could not parse
    #[error("Sorry, I didn't understand: {0}")]
    UnknownCommand(String),

    /// A collection file line that is not a `(title, author)` pair
    #[error("Collection error on line {line}: {message}")]
    Collection { line: usize, message: String },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desk_errors_render_librarian_messages() {
        assert_eq!(Error::IllegalState.to_string(), "The library is not open.");
        assert_eq!(
            Error::NoActiveMember.to_string(),
            "No patron is currently being served."
        );
        assert_eq!(
            Error::InvalidReference { number: 4 }.to_string(),
            "The patron does not have book 4."
        );
        assert_eq!(
            Error::UnknownCommand("dance()".into()).to_string(),
            "Sorry, I didn't understand: dance()"
        );
    }
}
