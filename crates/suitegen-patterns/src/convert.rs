//! Conversion of captured text into typed values.

use crate::errors::ConversionError;
use crate::kind::ParameterKind;

/// A captured value after conversion to its declared kind.
#[derive(Debug, Clone, PartialEq)]
pub enum CapturedValue {
    /// Result of an `{int}` parameter.
    Int(i64),
    /// Result of a `{float}` parameter.
    Float(f64),
    /// Result of `{string}` and `{word}` parameters and of untyped captures.
    Text(String),
}

/// Convert `value` according to `kind`.
///
/// `{int}` parses base 10, `{float}` parses a decimal number, `{string}` has
/// one layer of matching quotes stripped before being unescaped and `{word}`
/// is passed through.
///
/// # Errors
/// Returns [`ConversionError`] when a numeric capture does not fit the target
/// type.
///
/// # Examples
/// ```
/// use suitegen_patterns::{CapturedValue, ParameterKind, convert};
///
/// assert_eq!(convert("-12", ParameterKind::Int), Ok(CapturedValue::Int(-12)));
/// assert_eq!(
///     convert(r"tab\there", ParameterKind::String),
///     Ok(CapturedValue::Text("tab\there".into()))
/// );
/// ```
pub fn convert(value: &str, kind: ParameterKind) -> Result<CapturedValue, ConversionError> {
    match kind {
        ParameterKind::Int => value
            .parse()
            .map(CapturedValue::Int)
            .map_err(|source| ConversionError::Int {
                value: value.to_string(),
                kind,
                source,
            }),
        ParameterKind::Float => value
            .parse()
            .map(CapturedValue::Float)
            .map_err(|source| ConversionError::Float {
                value: value.to_string(),
                kind,
                source,
            }),
        ParameterKind::String => Ok(CapturedValue::Text(unescape_string(strip_quotes(value)))),
        ParameterKind::Word => Ok(CapturedValue::Text(value.to_string())),
    }
}

fn strip_quotes(value: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|quote| {
            value
                .strip_prefix(quote)
                .and_then(|inner| inner.strip_suffix(quote))
        })
        .unwrap_or(value)
}

/// Resolve the escape sequences `\n`, `\r`, `\t`, `\"`, `\'` and `\\`.
///
/// The input is scanned once from left to right, so an escaped backslash never
/// starts a second escape. Unknown sequences are kept verbatim.
///
/// # Examples
/// ```
/// use suitegen_patterns::unescape_string;
///
/// assert_eq!(unescape_string(r#"say \"hi\"\n"#), "say \"hi\"\n");
/// assert_eq!(unescape_string(r"C:\\new"), r"C:\new");
/// ```
#[must_use]
pub fn unescape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(escaped @ ('"' | '\'' | '\\')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("5", CapturedValue::Int(5))]
    #[case("-42", CapturedValue::Int(-42))]
    #[case("2.5", CapturedValue::Float(2.5))]
    #[case("3.", CapturedValue::Float(3.0))]
    #[case("-0.25", CapturedValue::Float(-0.25))]
    fn converts_numbers(#[case] input: &str, #[case] expected: CapturedValue) {
        let kind = match expected {
            CapturedValue::Int(_) => ParameterKind::Int,
            _ => ParameterKind::Float,
        };
        assert_eq!(convert(input, kind), Ok(expected));
    }

    #[test]
    fn reports_integer_overflow() {
        let result = convert("92233720368547758070", ParameterKind::Int);
        assert!(matches!(result, Err(ConversionError::Int { .. })));
    }

    #[rstest]
    #[case(r#""quoted""#, "quoted")]
    #[case("'single'", "single")]
    #[case(r#""mixed'"#, r#""mixed'"#)]
    #[case("plain", "plain")]
    #[case(r#""""#, "")]
    fn strips_one_layer_of_matching_quotes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(
            convert(input, ParameterKind::String),
            Ok(CapturedValue::Text(expected.into()))
        );
    }

    #[rstest]
    #[case(r"a\nb", "a\nb")]
    #[case(r"a\rb", "a\rb")]
    #[case(r"a\tb", "a\tb")]
    #[case(r#"\"x\""#, "\"x\"")]
    #[case(r"it\'s", "it's")]
    #[case(r"\\n", r"\n")]
    #[case(r"keep \q", r"keep \q")]
    #[case("trailing \\", "trailing \\")]
    fn unescapes_known_sequences(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(unescape_string(input), expected);
    }

    #[test]
    fn words_pass_through() {
        assert_eq!(
            convert(r"a\nb", ParameterKind::Word),
            Ok(CapturedValue::Text(r"a\nb".into()))
        );
    }
}
