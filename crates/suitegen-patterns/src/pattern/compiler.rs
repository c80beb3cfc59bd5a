//! Convert lexed tokens into anchored regular-expression sources.

use crate::kind::ParameterInfo;

use super::lexer::{Token, lex_expression};

/// Regex source built from an expression together with the metadata needed to
/// interpret its capture groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledExpression {
    /// Anchored regular-expression source.
    pub regex: String,
    /// Parameters declared by the expression, in order of appearance.
    pub parameters: Vec<ParameterInfo>,
    /// Parameter index owning each capture group; entry `n` describes
    /// capture group `n + 1`.
    pub groups: Vec<usize>,
}

/// Extract the parameter declarations of an expression.
///
/// # Examples
/// ```
/// use suitegen_patterns::{ParameterKind, extract_parameter_types};
///
/// let params = extract_parameter_types("{word} has {int} items");
/// let kinds: Vec<_> = params.iter().map(|p| (p.kind, p.index)).collect();
/// assert_eq!(kinds, [(ParameterKind::Word, 0), (ParameterKind::Int, 1)]);
/// ```
#[must_use]
pub fn extract_parameter_types(expression: &str) -> Vec<ParameterInfo> {
    build_regex_from_expression(expression).parameters
}

/// Build an anchored regular expression from a step expression.
///
/// Literal text is escaped, parameter tokens are replaced by their capture
/// fragments and the result is wrapped in `^...$` so only full-text matches
/// succeed. Compilation is permissive and never fails at this stage.
///
/// # Examples
/// ```
/// use suitegen_patterns::build_regex_from_expression;
///
/// let compiled = build_regex_from_expression("I have {int} cukes.");
/// assert_eq!(compiled.regex, r"^I have (-?\d+) cukes\.$");
/// assert_eq!(compiled.groups, [0]);
/// ```
#[must_use]
pub fn build_regex_from_expression(expression: &str) -> CompiledExpression {
    let mut regex = String::with_capacity(expression.len().saturating_mul(2) + 2);
    let mut parameters = Vec::new();
    let mut groups = Vec::new();
    regex.push('^');

    for token in lex_expression(expression) {
        match token {
            Token::Literal(text) => regex.push_str(&regex::escape(&text)),
            Token::Parameter(kind) => {
                let index = parameters.len();
                regex.push_str(kind.regex_fragment());
                groups.extend(std::iter::repeat_n(index, kind.capture_groups()));
                parameters.push(ParameterInfo::new(kind, index));
            }
        }
    }

    regex.push('$');
    CompiledExpression {
        regex,
        parameters,
        groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ParameterKind;

    #[test]
    fn compiles_literal_expressions() {
        let compiled = build_regex_from_expression("a step (with) [brackets]");
        assert_eq!(compiled.regex, r"^a step \(with\) \[brackets\]$");
        assert!(compiled.parameters.is_empty());
    }

    #[test]
    fn string_parameters_own_both_alternative_groups() {
        let compiled = build_regex_from_expression("{string} then {int}");
        assert_eq!(compiled.groups, [0, 0, 1]);
        assert_eq!(
            compiled.parameters,
            [
                ParameterInfo::new(ParameterKind::String, 0),
                ParameterInfo::new(ParameterKind::Int, 1),
            ]
        );
    }

    #[test]
    fn escapes_stray_braces() {
        let compiled = build_regex_from_expression("{nope} {int");
        assert_eq!(compiled.regex, r"^\{nope\} \{int$");
        assert!(compiled.groups.is_empty());
    }
}
