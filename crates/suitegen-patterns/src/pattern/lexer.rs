//! Expression lexer splitting literal text from parameter tokens.

use crate::kind::ParameterKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Literal(String),
    Parameter(ParameterKind),
}

fn strip_parameter(rest: &str) -> Option<(ParameterKind, &str)> {
    ParameterKind::ALL
        .into_iter()
        .find_map(|kind| rest.strip_prefix(kind.token()).map(|tail| (kind, tail)))
}

/// Scan `expression` left to right, emitting a parameter token for every
/// `{int}`, `{float}`, `{string}` or `{word}` and literal text for
/// everything else. Unknown `{...}` sequences and stray braces stay literal.
pub(crate) fn lex_expression(expression: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut rest = expression;

    while !rest.is_empty() {
        if rest.starts_with('{') {
            if let Some((kind, tail)) = strip_parameter(rest) {
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(Token::Parameter(kind));
                rest = tail;
                continue;
            }
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            literal.push(ch);
        }
        rest = chars.as_str();
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenises_literals_and_parameters() {
        assert_eq!(
            lex_expression("I have {int} and {float}"),
            vec![
                Token::Literal("I have ".into()),
                Token::Parameter(ParameterKind::Int),
                Token::Literal(" and ".into()),
                Token::Parameter(ParameterKind::Float),
            ]
        );
    }

    #[test]
    fn keeps_unknown_placeholders_literal() {
        assert_eq!(
            lex_expression("{count} {word}{"),
            vec![
                Token::Literal("{count} ".into()),
                Token::Parameter(ParameterKind::Word),
                Token::Literal("{".into()),
            ]
        );
    }

    #[test]
    fn handles_adjacent_tokens_and_multibyte_text() {
        assert_eq!(
            lex_expression("{string}{int}€"),
            vec![
                Token::Parameter(ParameterKind::String),
                Token::Parameter(ParameterKind::Int),
                Token::Literal("€".into()),
            ]
        );
    }

    #[test]
    fn empty_expression_has_no_tokens() {
        assert!(lex_expression("").is_empty());
    }
}
