//! Error types for the numrec-core library.

use thiserror::Error;

/// Main error type for the numrec library.
#[derive(Error, Debug)]
pub enum NumrecError {
    /// Value resolution failed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Locale lookup or compilation error.
    #[error("locale error: {0}")]
    Locale(#[from] LocaleError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while resolving an extraction result into a value.
///
/// "No match" is never an error: extractors return an empty list instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The locale has no strategy for the tag. Indicates an extractor/parser table mismatch.
    #[error("no parsing strategy for tag {tag}")]
    UnsupportedTag { tag: String },

    /// The text does not fit the selected strategy.
    #[error("malformed {strategy} text {text:?}: {reason}")]
    Malformed {
        strategy: &'static str,
        text: String,
        reason: String,
    },

    /// A fraction or ratio resolved to a zero denominator.
    #[error("zero denominator in {text:?}")]
    DivisionByZero { text: String },

    /// The value does not fit the decimal range.
    #[error("value out of range in {text:?}")]
    Overflow { text: String },
}

impl ParseError {
    pub(crate) fn malformed(
        strategy: &'static str,
        text: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Malformed {
            strategy,
            text: text.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn overflow(text: impl Into<String>) -> Self {
        Self::Overflow { text: text.into() }
    }

    /// Whether this error signals a configuration problem rather than bad input.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::UnsupportedTag { .. })
    }
}

/// Errors related to locale selection and pattern compilation.
#[derive(Error, Debug, Clone)]
pub enum LocaleError {
    /// No provider is registered for the culture identifier.
    #[error("unknown culture: {0}")]
    UnknownCulture(String),

    /// A pattern failed to compile. The pattern is skipped; the locale stays usable.
    #[error("invalid pattern for tag {tag}: {message}")]
    Pattern { tag: String, message: String },
}

/// Result type for the numrec library.
pub type Result<T> = std::result::Result<T, NumrecError>;
