//! Error types for release-date handling

use thiserror::Error;

/// Result type alias using DateError
pub type Result<T> = std::result::Result<T, DateError>;

/// Errors arising from release-date patterns and values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// The pattern itself does not expand as a date pattern
    #[error("invalid date pattern: {0}")]
    InvalidPattern(String),

    /// The input did not match the pattern
    #[error("failed to parse date '{input}' with pattern '{pattern}'")]
    ParseFailed { input: String, pattern: String },

    /// Lenient resolution produced a date outside the representable range
    #[error("date '{0}' is out of the representable range")]
    OutOfRange(String),

    /// The date could not be rendered with the pattern
    #[error("failed to format date with pattern '{0}'")]
    FormatFailed(String),
}
