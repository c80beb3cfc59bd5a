//! Error types shared by the expression compiler and value conversion.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::kind::ParameterKind;

/// Errors surfaced while turning a step expression into a regular expression.
///
/// Expression compilation itself is permissive: unknown `{...}` tokens and
/// stray braces are matched literally. The only failure left is the regex
/// engine rejecting the built source, for example when it exceeds the size
/// limit.
///
/// # Examples
/// ```
/// use suitegen_patterns::PatternError;
/// let err = PatternError::Regex {
///     source_text: "I have {int}".into(),
///     source: regex::Error::Syntax("bad".into()),
/// };
/// assert!(err.to_string().contains("I have {int}"));
/// ```
#[derive(Debug, Error)]
pub enum PatternError {
    /// The regex engine rejected the built source.
    #[error("step pattern '{source_text}' failed to compile: {source}")]
    Regex {
        /// Expression or regex source that was being compiled.
        source_text: String,
        /// Error reported by the regex engine.
        #[source]
        source: regex::Error,
    },
}

/// Raised when a captured value cannot be converted to its declared kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// An `{int}` capture is not a base-10 `i64`.
    #[error("cannot convert '{value}' to {kind}: {source}")]
    Int {
        /// Captured text.
        value: String,
        /// Kind declared by the expression.
        kind: ParameterKind,
        /// Parser failure, typically an overflow.
        #[source]
        source: ParseIntError,
    },
    /// A `{float}` capture is not a decimal number.
    #[error("cannot convert '{value}' to {kind}: {source}")]
    Float {
        /// Captured text.
        value: String,
        /// Kind declared by the expression.
        kind: ParameterKind,
        /// Parser failure.
        #[source]
        source: ParseFloatError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_the_offending_value() {
        let Err(source) = "99999999999999999999".parse::<i64>() else {
            panic!("value should overflow i64");
        };
        let err = ConversionError::Int {
            value: "99999999999999999999".into(),
            kind: ParameterKind::Int,
            source,
        };
        let message = err.to_string();
        assert!(message.starts_with("cannot convert '99999999999999999999' to int"));
    }

    #[test]
    fn forwards_regex_error_as_source() {
        let err = PatternError::Regex {
            source_text: "x".into(),
            source: regex::Error::Syntax("bad".into()),
        };
        assert!(std::error::Error::source(&err).is_some());
    }
}
