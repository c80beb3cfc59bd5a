//! Feature data model consumed by the code generator.
//!
//! The parser adapter maps the grammar parser's document onto these types;
//! the generator never sees parser types directly.

use suitegen_patterns::StepKeyword;

/// A parsed `.feature` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    /// Feature title, or `Unnamed Feature`.
    pub name: String,
    /// Free text below the title.
    pub description: Option<String>,
    /// Tags written above the feature, including the `@`.
    pub tags: Vec<String>,
    /// Steps run before every scenario of the feature.
    pub background: Option<Background>,
    /// Scenarios declared directly under the feature.
    pub scenarios: Vec<Scenario>,
    /// Rules grouping further scenarios.
    pub rules: Vec<Rule>,
}

impl Feature {
    /// Number of test cases the feature expands to, counting one per plain
    /// scenario and one per examples row of every outline.
    #[must_use]
    pub fn test_count(&self) -> usize {
        self.scenarios
            .iter()
            .chain(self.rules.iter().flat_map(|rule| &rule.scenarios))
            .map(Scenario::test_count)
            .sum()
    }
}

/// Steps shared by the scenarios of a feature or rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Background {
    /// Background steps in source order.
    pub steps: Vec<Step>,
}

/// A named group of scenarios inside a feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Rule title, or `Unnamed Rule`.
    pub name: String,
    /// Tags written above the rule.
    pub tags: Vec<String>,
    /// Steps run before every scenario of the rule, after the feature's.
    pub background: Option<Background>,
    /// Scenarios of the rule.
    pub scenarios: Vec<Scenario>,
}

/// A scenario or scenario outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// Scenario title, or `Unnamed Scenario`.
    pub name: String,
    /// Tags written above the scenario.
    pub tags: Vec<String>,
    /// Steps in source order, placeholders unresolved.
    pub steps: Vec<Step>,
    /// Examples blocks; non-empty exactly for outlines.
    pub examples: Vec<Examples>,
}

impl Scenario {
    /// Returns `true` when the scenario has examples to expand.
    #[must_use]
    pub fn is_outline(&self) -> bool {
        !self.examples.is_empty()
    }

    /// Number of generated tests: the examples rows of an outline, else one.
    #[must_use]
    pub fn test_count(&self) -> usize {
        if self.is_outline() {
            self.examples.iter().map(|examples| examples.rows.len()).sum()
        } else {
            1
        }
    }
}

/// One `Examples:` block of an outline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Examples {
    /// Tags written above the block.
    pub tags: Vec<String>,
    /// Placeholder names from the header row.
    pub headers: Vec<String>,
    /// Body rows.
    pub rows: Vec<Vec<String>>,
}

/// A step line with its attachments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Keyword as written; `*` is read as `And`.
    pub keyword: StepKeyword,
    /// Step text after the keyword.
    pub text: String,
    /// Data table rows, when present.
    pub table: Option<Vec<Vec<String>>>,
    /// Doc string, when present.
    pub doc_string: Option<DocString>,
}

/// A doc string attached to a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocString {
    /// Text between the delimiters.
    pub content: String,
    /// Media type written after the opening delimiter.
    pub content_type: Option<String>,
}
