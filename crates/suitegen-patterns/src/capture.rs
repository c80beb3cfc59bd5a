//! Capture-group extraction.

use regex::Regex;

use crate::kind::ParameterKind;

/// One capture group of a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// Matched text, or `None` when the group did not participate.
    pub value: Option<String>,
    /// Declared kind of the parameter owning the group, when known.
    pub kind: Option<ParameterKind>,
}

/// Text of every capture group of `re` in `text`, or `None` without a match.
///
/// The whole-match group is left out. A group that sat in an untaken branch,
/// like the unused quote style of a `{string}` parameter, is reported as
/// `None` so positions line up with the pattern's groups.
///
/// ```
/// use regex::Regex;
/// use suitegen_patterns::extract_captured_values;
///
/// let re = Regex::new(r"^(\d+) (?:(apples)|(pears))$").expect("regex compiles");
/// assert_eq!(
///     extract_captured_values(&re, "3 pears"),
///     Some(vec![Some("3".to_string()), None, Some("pears".to_string())])
/// );
/// assert_eq!(extract_captured_values(&re, "3 plums"), None);
/// ```
#[must_use]
pub fn extract_captured_values(re: &Regex, text: &str) -> Option<Vec<Option<String>>> {
    re.captures(text).map(|found| {
        found
            .iter()
            .skip(1)
            .map(|group| group.map(|m| m.as_str().to_owned()))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn regex(source: &str) -> Regex {
        Regex::new(source).unwrap_or_else(|err| panic!("{source:?} should compile: {err}"))
    }

    #[rstest]
    #[case(r"^(\w+)-(\d+)$", "release-42", Some(vec![Some("release"), Some("42")]))]
    #[case(r"^(x)?(y)?$", "y", Some(vec![None, Some("y")]))]
    #[case(r"^no groups$", "no groups", Some(vec![]))]
    #[case(r"^(\d+)$", "forty", None)]
    fn extracts_groups_in_order(
        #[case] source: &str,
        #[case] text: &str,
        #[case] expected: Option<Vec<Option<&str>>>,
    ) {
        let expected = expected.map(|groups| {
            groups
                .into_iter()
                .map(|group| group.map(str::to_owned))
                .collect::<Vec<_>>()
        });
        assert_eq!(extract_captured_values(&regex(source), text), expected);
    }

    #[test]
    fn unanchored_patterns_match_inside_text() {
        assert_eq!(
            extract_captured_values(&regex(r"total (\d+)"), "the total 12 apples"),
            Some(vec![Some("12".to_owned())])
        );
    }
}
