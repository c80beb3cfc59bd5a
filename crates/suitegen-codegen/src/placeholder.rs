//! `<placeholder>` substitution for outline steps.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::{DocString, Step};

/// `<name>` with a non-blank first character; the name is group 1.
const PLACEHOLDER: &str = r"<([^>\s][^>]*)>";

#[expect(clippy::expect_used, reason = "constant pattern covered by unit tests")]
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER).expect("placeholder pattern compiles"));

/// One examples row keyed by its header names.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ExampleRow<'a> {
    headers: &'a [String],
    values: &'a [String],
}

impl<'a> ExampleRow<'a> {
    pub(crate) fn new(headers: &'a [String], values: &'a [String]) -> Self {
        Self { headers, values }
    }

    /// Value for `header`; a short row yields an empty string.
    fn value(&self, header: &str) -> Option<&'a str> {
        let index = self.headers.iter().position(|h| h == header)?;
        Some(self.values.get(index).map_or("", String::as_str))
    }

    /// Test title for the row, `Example: h1=v1, h2=v2` in header order.
    pub(crate) fn title(&self) -> String {
        let pairs: Vec<String> = self
            .headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                let value = self.values.get(index).map_or("", String::as_str);
                format!("{header}={value}")
            })
            .collect();
        format!("Example: {}", pairs.join(", "))
    }

    /// Replace every known placeholder in `text` in a single pass; unknown
    /// placeholders stay literal and substituted values are never rescanned.
    pub(crate) fn substitute(&self, text: &str) -> String {
        PLACEHOLDER_RE
            .replace_all(text, |caps: &Captures<'_>| {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                caps.get(1)
                    .and_then(|name| self.value(name.as_str()))
                    .unwrap_or(whole)
                    .to_string()
            })
            .into_owned()
    }

    /// Substitute the step text, table cells and doc string content.
    pub(crate) fn substitute_step(&self, step: &Step) -> Step {
        Step {
            keyword: step.keyword,
            text: self.substitute(&step.text),
            table: step.table.as_ref().map(|rows| {
                rows.iter()
                    .map(|row| row.iter().map(|cell| self.substitute(cell)).collect())
                    .collect()
            }),
            doc_string: step.doc_string.as_ref().map(|doc| DocString {
                content: self.substitute(&doc.content),
                content_type: doc.content_type.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use suitegen_patterns::StepKeyword;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn placeholder_pattern_compiles() {
        assert!(Regex::new(PLACEHOLDER).is_ok());
        assert!(PLACEHOLDER_RE.is_match("<total>"));
        assert!(!PLACEHOLDER_RE.is_match("< total>"));
    }

    #[test]
    fn substitutes_known_placeholders() {
        let headers = strings(&["count", "item name"]);
        let values = strings(&["5", "apples"]);
        let row = ExampleRow::new(&headers, &values);
        assert_eq!(
            row.substitute("I have <count> <item name>"),
            "I have 5 apples"
        );
    }

    #[test]
    fn leaves_unknown_placeholders_literal() {
        let headers = strings(&["a"]);
        let values = strings(&["1"]);
        let row = ExampleRow::new(&headers, &values);
        assert_eq!(row.substitute("<a> < b> <c>"), "1 < b> <c>");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let headers = strings(&["a", "b"]);
        let values = strings(&["<b>", "x"]);
        let row = ExampleRow::new(&headers, &values);
        assert_eq!(row.substitute("<a><b>"), "<b>x");
    }

    #[test]
    fn titles_render_pairs_in_header_order() {
        let headers = strings(&["n", "double", "note"]);
        let values = strings(&["1", "2"]);
        let row = ExampleRow::new(&headers, &values);
        assert_eq!(row.title(), "Example: n=1, double=2, note=");
        assert_eq!(row.substitute("[<note>]"), "[]");
    }

    #[test]
    fn substitutes_step_arguments() {
        let headers = strings(&["user"]);
        let values = strings(&["ann"]);
        let row = ExampleRow::new(&headers, &values);
        let step = Step {
            keyword: StepKeyword::Given,
            text: "a user <user>".into(),
            table: Some(vec![strings(&["name"]), strings(&["<user>"])]),
            doc_string: Some(DocString {
                content: "hello <user>".into(),
                content_type: Some("text".into()),
            }),
        };
        let substituted = row.substitute_step(&step);
        assert_eq!(substituted.text, "a user ann");
        assert_eq!(
            substituted.table,
            Some(vec![strings(&["name"]), strings(&["ann"])])
        );
        assert_eq!(
            substituted.doc_string.map(|doc| doc.content),
            Some("hello ann".to_string())
        );
    }
}
