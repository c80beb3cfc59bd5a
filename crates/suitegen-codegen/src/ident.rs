//! Rust identifiers derived from feature, rule and scenario titles.

use hashbrown::HashSet;

/// Words that cannot be used as plain identifiers.
const RESERVED: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "static", "struct", "super", "trait", "true", "try", "type", "typeof",
    "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Turn a title into a snake-case identifier.
///
/// ASCII letters and digits are kept (lowercased), every other run of
/// characters becomes a single underscore and trailing underscores are
/// dropped. Identifiers starting with a digit or spelling a keyword gain a
/// leading underscore; titles with nothing usable become `unnamed`.
pub(crate) fn sanitize_ident(title: &str) -> String {
    let mut ident = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            ident.push(ch.to_ascii_lowercase());
        } else if !ident.is_empty() && !ident.ends_with('_') {
            ident.push('_');
        }
    }
    let trimmed = ident.trim_end_matches('_');
    if trimmed.is_empty() {
        return "unnamed".to_string();
    }
    let starts_with_digit = trimmed.starts_with(|ch: char| ch.is_ascii_digit());
    if starts_with_digit || RESERVED.contains(&trimmed) {
        format!("_{trimmed}")
    } else {
        trimmed.to_string()
    }
}

/// Reserve a unique name derived from `base` within `used`, appending `_2`,
/// `_3` and so on when `base` is taken.
pub(crate) fn dedupe_name(base: &str, used: &mut HashSet<String>) -> String {
    if used.insert(base.to_string()) {
        return base.to_string();
    }
    let mut suffix = 2_usize;
    loop {
        let candidate = format!("{base}_{suffix}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        suffix = suffix.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Hello world!", "hello_world")]
    #[case("  Leading space", "leading_space")]
    #[case("123abc", "_123abc")]
    #[case("Crème brûlée", "cr_me_br_l_e")]
    #[case("a--b__c", "a_b_c")]
    #[case("fn", "_fn")]
    #[case("Self", "_self")]
    #[case("Example: n=1, double=2", "example_n_1_double_2")]
    #[case("", "unnamed")]
    #[case("!!!", "unnamed")]
    fn sanitizes_titles(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_ident(input), expected);
    }

    #[test]
    fn dedupes_with_numeric_suffixes() {
        let mut used = HashSet::new();
        used.insert("addition_2".to_string());
        assert_eq!(dedupe_name("addition", &mut used), "addition");
        assert_eq!(dedupe_name("addition", &mut used), "addition_3");
        assert_eq!(dedupe_name("addition", &mut used), "addition_4");
        assert_eq!(dedupe_name("other", &mut used), "other");
    }
}
