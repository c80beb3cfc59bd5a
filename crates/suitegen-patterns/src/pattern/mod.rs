//! Step-pattern lexing, compilation and matching.

mod compiler;
mod lexer;

use std::fmt;

use regex::Regex;

use crate::capture::{Capture, extract_captured_values};
use crate::errors::PatternError;
use crate::kind::ParameterInfo;

pub use compiler::{CompiledExpression, build_regex_from_expression, extract_parameter_types};

/// A step-matching pattern, tagged with where it came from.
///
/// Expression patterns know the kind of every capture group; precompiled
/// regular expressions do not, so their captures are handed to handlers as
/// plain text.
#[derive(Clone)]
pub enum StepPattern {
    /// Compiled from an expression such as `I have {int} cucumbers`.
    Expression {
        /// Expression as written by the step author.
        source: String,
        /// Parameters declared by the expression.
        parameters: Vec<ParameterInfo>,
        /// Anchored matcher built from the expression.
        regex: Regex,
        /// Parameter index owning each capture group.
        groups: Vec<usize>,
    },
    /// A regular expression supplied as is.
    Precompiled(Regex),
}

impl StepPattern {
    /// Compile a step expression.
    ///
    /// # Errors
    /// Returns [`PatternError::Regex`] when the regex engine rejects the built
    /// source, which in practice only happens for pathologically large
    /// expressions.
    ///
    /// # Examples
    /// ```
    /// use suitegen_patterns::StepPattern;
    ///
    /// let pattern = StepPattern::expression("I have {int} and {float}")
    ///     .expect("example ensures fallible call succeeds");
    /// assert!(pattern.is_match("I have 5 and 2.5"));
    /// assert!(!pattern.is_match("I have five and 2.5"));
    /// ```
    pub fn expression(source: &str) -> Result<Self, PatternError> {
        let CompiledExpression {
            regex,
            parameters,
            groups,
        } = build_regex_from_expression(source);
        let regex = Regex::new(&regex).map_err(|err| PatternError::Regex {
            source_text: source.to_string(),
            source: err,
        })?;
        Ok(Self::Expression {
            source: source.to_string(),
            parameters,
            regex,
            groups,
        })
    }

    /// Text the pattern was created from: the expression, or the regex source
    /// for precompiled patterns.
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::Expression { source, .. } => source,
            Self::Precompiled(regex) => regex.as_str(),
        }
    }

    /// Parameter declarations; empty for precompiled patterns.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterInfo] {
        match self {
            Self::Expression { parameters, .. } => parameters,
            Self::Precompiled(_) => &[],
        }
    }

    /// Matcher used for step text.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        match self {
            Self::Expression { regex, .. } | Self::Precompiled(regex) => regex,
        }
    }

    /// Return `true` when the pattern matches `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex().is_match(text)
    }

    /// Match `text` and return one [`Capture`] per capture group, or `None`
    /// when the pattern does not match.
    ///
    /// Each capture carries the declared kind of the parameter owning its
    /// group, if any.
    #[must_use]
    pub fn captures(&self, text: &str) -> Option<Vec<Capture>> {
        let values = extract_captured_values(self.regex(), text)?;
        let captures = match self {
            Self::Expression {
                parameters, groups, ..
            } => values
                .into_iter()
                .enumerate()
                .map(|(group, value)| {
                    let kind = groups
                        .get(group)
                        .and_then(|index| parameters.get(*index))
                        .map(|param| param.kind);
                    Capture { value, kind }
                })
                .collect(),
            Self::Precompiled(_) => values
                .into_iter()
                .map(|value| Capture { value, kind: None })
                .collect(),
        };
        Some(captures)
    }
}

impl From<Regex> for StepPattern {
    fn from(regex: Regex) -> Self {
        Self::Precompiled(regex)
    }
}

impl fmt::Debug for StepPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression {
                source, parameters, ..
            } => f
                .debug_struct("Expression")
                .field("source", source)
                .field("parameters", parameters)
                .finish_non_exhaustive(),
            Self::Precompiled(regex) => f.debug_tuple("Precompiled").field(regex).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ParameterKind;

    fn expect_pattern(source: &str) -> StepPattern {
        match StepPattern::expression(source) {
            Ok(pattern) => pattern,
            Err(err) => panic!("pattern should compile: {err}"),
        }
    }

    fn expect_captures(pattern: &StepPattern, text: &str) -> Vec<Capture> {
        pattern
            .captures(text)
            .unwrap_or_else(|| panic!("{text:?} should match {}", pattern.source()))
    }

    #[test]
    fn expression_requires_a_full_match() {
        let pattern = expect_pattern("I have {int}");
        assert!(pattern.is_match("I have 5"));
        assert!(!pattern.is_match("I have 5 apples"));
        assert!(!pattern.is_match("So I have 5"));
    }

    #[test]
    fn captures_carry_declared_kinds() {
        let pattern = expect_pattern("I have {int} and {float}");
        let captures = expect_captures(&pattern, "I have 5 and 2.5");
        assert_eq!(
            captures,
            vec![
                Capture {
                    value: Some("5".into()),
                    kind: Some(ParameterKind::Int),
                },
                Capture {
                    value: Some("2.5".into()),
                    kind: Some(ParameterKind::Float),
                },
            ]
        );
    }

    #[test]
    fn string_parameter_reports_the_non_participating_alternative() {
        let pattern = expect_pattern("user {string} is {int}");
        let captures = expect_captures(&pattern, "user 'bob' is 30");
        let values: Vec<_> = captures.iter().map(|c| c.value.as_deref()).collect();
        assert_eq!(values, [None, Some("bob"), Some("30")]);
        assert_eq!(
            captures.last().and_then(|c| c.kind),
            Some(ParameterKind::Int)
        );
    }

    #[test]
    fn precompiled_patterns_are_used_unmodified() {
        #[expect(clippy::expect_used, reason = "test regex is a constant")]
        let regex = Regex::new(r"total (\d+)").expect("test regex must compile");
        let pattern = StepPattern::from(regex);
        assert!(pattern.parameters().is_empty());
        assert_eq!(pattern.source(), r"total (\d+)");
        // Not anchored: the author controls anchoring.
        let captures = expect_captures(&pattern, "the total 12 apples");
        assert_eq!(
            captures,
            vec![Capture {
                value: Some("12".into()),
                kind: None,
            }]
        );
    }
}
