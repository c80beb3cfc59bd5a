//! Parameter kinds recognised inside step expressions.

use std::fmt;
use std::str::FromStr;

/// Type of a `{...}` parameter token in a step expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// `{int}`: an optionally negative base-10 integer.
    Int,
    /// `{float}`: an optionally negative decimal number.
    Float,
    /// `{string}`: text wrapped in double or single quotes.
    String,
    /// `{word}`: a run of non-whitespace characters.
    Word,
}

impl ParameterKind {
    /// Every kind, in the order the lexer tries them.
    pub const ALL: [Self; 4] = [Self::Int, Self::Float, Self::String, Self::Word];

    /// Name used inside the braces, e.g. `int` for `{int}`.
    ///
    /// # Examples
    ///
    /// ```
    /// use suitegen_patterns::ParameterKind;
    ///
    /// assert_eq!(ParameterKind::Float.as_str(), "float");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Word => "word",
        }
    }

    /// The full token as written in an expression, e.g. `{int}`.
    #[must_use]
    pub const fn token(&self) -> &'static str {
        match self {
            Self::Int => "{int}",
            Self::Float => "{float}",
            Self::String => "{string}",
            Self::Word => "{word}",
        }
    }

    /// Regular-expression fragment substituted for the token.
    ///
    /// `{string}` expands to two alternative groups, one per quote style, so it
    /// contributes two capture groups to the compiled pattern.
    #[must_use]
    pub const fn regex_fragment(&self) -> &'static str {
        match self {
            Self::Int => r"(-?\d+)",
            Self::Float => r"(-?\d+\.?\d*)",
            Self::String => r#"(?:"([^"]*)"|'([^']*)')"#,
            Self::Word => r"(\S+)",
        }
    }

    /// Number of capture groups [`regex_fragment`](Self::regex_fragment) opens.
    #[must_use]
    pub const fn capture_groups(&self) -> usize {
        match self {
            Self::String => 2,
            Self::Int | Self::Float | Self::Word => 1,
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown parameter type '{s}'"))
    }
}

/// A parameter declared by an expression, with its zero-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterInfo {
    /// Declared kind of the parameter.
    pub kind: ParameterKind,
    /// Position of the parameter in order of appearance.
    pub index: usize,
}

impl ParameterInfo {
    /// Pair a kind with its position.
    #[must_use]
    pub const fn new(kind: ParameterKind, index: usize) -> Self {
        Self { kind, index }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("int", ParameterKind::Int)]
    #[case("float", ParameterKind::Float)]
    #[case("string", ParameterKind::String)]
    #[case("word", ParameterKind::Word)]
    fn parses_kind_names(#[case] name: &str, #[case] expected: ParameterKind) {
        assert_eq!(name.parse::<ParameterKind>(), Ok(expected));
        assert_eq!(expected.token(), format!("{{{name}}}"));
    }

    #[test]
    fn rejects_unknown_kind_names() {
        let Err(err) = "u32".parse::<ParameterKind>() else {
            panic!("u32 is not a parameter kind");
        };
        assert!(err.contains("u32"));
    }

    #[test]
    fn string_fragment_opens_two_groups() {
        #[expect(clippy::expect_used, reason = "fragment is a constant")]
        let regex = regex::Regex::new(ParameterKind::String.regex_fragment())
            .expect("string fragment must compile");
        assert_eq!(
            regex.captures_len() - 1,
            ParameterKind::String.capture_groups()
        );
    }
}
