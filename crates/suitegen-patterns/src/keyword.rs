//! Step keywords.
//!
//! Feature steps and step definitions both carry a keyword. The generator
//! writes it into emitted source and the registry uses it to filter the
//! definitions a step may match.

use std::fmt;
use std::str::FromStr;

use gherkin::StepType;
use thiserror::Error;

/// Keyword of a feature step or of a step definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StepKeyword {
    /// `Given`.
    Given,
    /// `When`.
    When,
    /// `Then`.
    Then,
    /// `And`, and the bullet `*`.
    And,
    /// `But`.
    But,
}

/// Spellings accepted by [`StepKeyword::from_str`], compared without regard
/// to ASCII case.
const SPELLINGS: [(&str, StepKeyword); 6] = [
    ("Given", StepKeyword::Given),
    ("When", StepKeyword::When),
    ("Then", StepKeyword::Then),
    ("And", StepKeyword::And),
    ("But", StepKeyword::But),
    ("*", StepKeyword::And),
];

impl StepKeyword {
    /// Keyword as written in a feature file.
    ///
    /// # Examples
    /// ```
    /// use suitegen_patterns::StepKeyword;
    ///
    /// assert_eq!(StepKeyword::But.as_str(), "But");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }

    /// `And` and `But` continue the previous step instead of naming a step
    /// type.
    #[must_use]
    pub const fn is_join_word(self) -> bool {
        matches!(self, Self::And | Self::But)
    }

    /// Whether a step written with `self` may use a definition registered
    /// under `definition`: join words accept every definition, other keywords
    /// only their own.
    ///
    /// # Examples
    /// ```
    /// use suitegen_patterns::StepKeyword;
    ///
    /// assert!(StepKeyword::And.accepts(StepKeyword::Then));
    /// assert!(!StepKeyword::When.accepts(StepKeyword::Given));
    /// assert!(!StepKeyword::Given.accepts(StepKeyword::But));
    /// ```
    #[must_use]
    pub fn accepts(self, definition: Self) -> bool {
        self.is_join_word() || self == definition
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text that is not a step keyword.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid step keyword: '{0}'")]
pub struct StepKeywordParseError(pub String);

impl FromStr for StepKeyword {
    type Err = StepKeywordParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        SPELLINGS
            .iter()
            .find(|(spelling, _)| spelling.eq_ignore_ascii_case(value))
            .map(|&(_, keyword)| keyword)
            .ok_or_else(|| StepKeywordParseError(value.to_string()))
    }
}

/// A grammar step type with no keyword counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported step type: {0:?}")]
pub struct UnsupportedStepType(pub StepType);

impl TryFrom<StepType> for StepKeyword {
    type Error = UnsupportedStepType;

    /// Map the grammar's resolved step type. Join words have already been
    /// folded into the preceding type by the grammar, so only `Given`, `When`
    /// and `Then` come back.
    fn try_from(ty: StepType) -> Result<Self, Self::Error> {
        match ty {
            StepType::Given => Ok(Self::Given),
            StepType::When => Ok(Self::When),
            StepType::Then => Ok(Self::Then),
            #[expect(unreachable_patterns, reason = "StepType may grow variants")]
            other => Err(UnsupportedStepType(other)),
        }
    }
}
